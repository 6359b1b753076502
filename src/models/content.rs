use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Email,
    Blog,
    Social,
    Response,
    /// Any type without a dedicated template.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentLength {
    Short,
    Long,
    /// Also used for unrecognised lengths.
    #[default]
    #[serde(other)]
    Medium,
}

impl ContentLength {
    pub fn max_tokens(&self) -> usize {
        match self {
            ContentLength::Short => 150,
            ContentLength::Medium => 300,
            ContentLength::Long => 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    pub prompt: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub length: ContentLength,
}

/// Where a piece of generated text came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum GeneratedContent {
    AiGenerated {
        content: String,
        model: String,
        tokens_used: Option<u32>,
    },
    TemplateGenerated {
        content: String,
        note: String,
    },
}

impl GeneratedContent {
    pub fn content(&self) -> &str {
        match self {
            GeneratedContent::AiGenerated { content, .. } => content,
            GeneratedContent::TemplateGenerated { content, .. } => content,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            GeneratedContent::AiGenerated { model, .. } => model,
            GeneratedContent::TemplateGenerated { .. } => "template",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Sentiment,
    Keywords,
    Summary,
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sentiment" => Ok(AnalysisType::Sentiment),
            "keywords" => Ok(AnalysisType::Keywords),
            "summary" => Ok(AnalysisType::Summary),
            _ => Err("Invalid analysis type".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    pub analysis_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "analysis_type", rename_all = "snake_case")]
pub enum TextAnalysis {
    Sentiment {
        sentiment: Sentiment,
        confidence: f64,
        positive_indicators: usize,
        negative_indicators: usize,
    },
    Keywords {
        keywords: Vec<KeywordCount>,
        total_words: usize,
    },
    Summary {
        summary: String,
        original_length: usize,
        summary_length: usize,
        reduction: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub ai_enabled: bool,
    pub content_types: Vec<ContentType>,
    pub tones: Vec<Tone>,
    pub analysis_types: Vec<AnalysisType>,
    pub setup_hint: Option<String>,
}
