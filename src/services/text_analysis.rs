//! Rule-based text analysis. None of this calls the language model.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{AnalysisType, KeywordCount, Sentiment, TextAnalysis};
use crate::services::indicators::round2;

const POSITIVE_WORDS: [&str; 10] = [
    "great", "excellent", "amazing", "good", "love", "best", "fantastic", "wonderful", "happy", "pleased",
];

const NEGATIVE_WORDS: [&str; 10] = [
    "bad", "terrible", "awful", "poor", "hate", "worst", "disappointed", "unhappy", "frustrated", "angry",
];

const STOP_WORDS: [&str; 55] = [
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "need", "dare", "to",
    "of", "in", "for", "on", "with", "at", "by", "from", "or", "and", "but", "if", "then", "else", "when",
    "up", "down", "out", "this", "that", "these", "those", "i", "you", "we", "they", "it",
];

const MAX_KEYWORDS: usize = 10;

fn word_regex() -> Option<&'static Regex> {
    static WORD_RE: OnceLock<Option<Regex>> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"\b[a-zA-Z]{3,}\b").ok()).as_ref()
}

pub fn analyze(text: &str, analysis_type: AnalysisType) -> TextAnalysis {
    match analysis_type {
        AnalysisType::Sentiment => sentiment(text),
        AnalysisType::Keywords => keywords(text),
        AnalysisType::Summary => summary(text),
    }
}

/// Counts how many listed words occur anywhere in the text (case-insensitive).
pub fn sentiment(text: &str) -> TextAnalysis {
    let lower = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();

    let (sentiment, confidence) = if positive > negative {
        (Sentiment::Positive, (positive as f64 * 0.2).min(1.0))
    } else if negative > positive {
        (Sentiment::Negative, (negative as f64 * 0.2).min(1.0))
    } else {
        (Sentiment::Neutral, 0.5)
    };

    TextAnalysis::Sentiment {
        sentiment,
        confidence: round2(confidence),
        positive_indicators: positive,
        negative_indicators: negative,
    }
}

/// Most frequent non-stop-words of three or more letters.
///
/// Ties keep the order in which the words first appear. `total_words` counts
/// every matched word, stop-words included.
pub fn keywords(text: &str) -> TextAnalysis {
    let lower = text.to_lowercase();
    let words: Vec<&str> = word_regex()
        .map(|re| re.find_iter(&lower).map(|m| m.as_str()).collect())
        .unwrap_or_default();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();
    for word in words.iter().copied().filter(|w| !STOP_WORDS.contains(w)) {
        match index.get(word) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(word, counts.len());
                counts.push(KeywordCount { word: word.to_string(), count: 1 });
            }
        }
    }

    // stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(MAX_KEYWORDS);

    TextAnalysis::Keywords {
        keywords: counts,
        total_words: words.len(),
    }
}

/// First and last sentence when the text has more than two; otherwise the text itself.
pub fn summary(text: &str) -> TextAnalysis {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let summary = match sentences.as_slice() {
        [first, .., last] if sentences.len() > 2 => format!("{}. {}.", first, last),
        _ => text.to_string(),
    };

    let original_length = text.chars().count();
    let summary_length = summary.chars().count();

    TextAnalysis::Summary {
        reduction: format!("{}%", reduction_percent(original_length, summary_length)),
        original_length,
        summary_length,
        summary,
    }
}

/// Whole-percent shrinkage, ties to even; 0 for empty input.
fn reduction_percent(original_length: usize, summary_length: usize) -> i64 {
    if original_length == 0 {
        return 0;
    }
    let kept = summary_length as f64 / original_length as f64;
    ((1.0 - kept) * 100.0).round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_positive() {
        let result = sentiment("Great work, the team was excellent and we love it");
        assert_eq!(
            result,
            TextAnalysis::Sentiment {
                sentiment: Sentiment::Positive,
                confidence: 0.6,
                positive_indicators: 3,
                negative_indicators: 0,
            }
        );
    }

    #[test]
    fn test_sentiment_confidence_caps_at_one() {
        let text = "great excellent amazing good love best";
        match sentiment(text) {
            TextAnalysis::Sentiment { confidence, .. } => assert_eq!(confidence, 1.0),
            other => panic!("unexpected analysis: {:?}", other),
        }
    }

    #[test]
    fn test_sentiment_tie_is_neutral() {
        match sentiment("Good idea but poor execution") {
            TextAnalysis::Sentiment { sentiment, confidence, .. } => {
                assert_eq!(sentiment, Sentiment::Neutral);
                assert_eq!(confidence, 0.5);
            }
            other => panic!("unexpected analysis: {:?}", other),
        }
    }

    #[test]
    fn test_keywords_skip_stop_words_and_short_words() {
        let result = keywords("The website and the app. Website design is key for an app launch.");
        match result {
            TextAnalysis::Keywords { keywords, total_words } => {
                let words: Vec<(&str, usize)> = keywords.iter().map(|k| (k.word.as_str(), k.count)).collect();
                assert_eq!(
                    words,
                    vec![("website", 2), ("app", 2), ("design", 1), ("key", 1), ("launch", 1)]
                );
                // the, website, and, the, app, website, design, key, for, app, launch
                assert_eq!(total_words, 11);
            }
            other => panic!("unexpected analysis: {:?}", other),
        }
    }

    #[test]
    fn test_keywords_limited_to_ten() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        match keywords(text) {
            TextAnalysis::Keywords { keywords, .. } => {
                assert_eq!(keywords.len(), 10);
                assert_eq!(keywords[0].word, "alpha");
                assert_eq!(keywords[9].word, "juliet");
            }
            other => panic!("unexpected analysis: {:?}", other),
        }
    }

    #[test]
    fn test_summary_first_and_last_sentence() {
        let text = "We launched. Traffic grew! Are leads up? Yes they are.";
        match summary(text) {
            TextAnalysis::Summary { summary, original_length, summary_length, reduction } => {
                assert_eq!(summary, "We launched. Yes they are.");
                assert_eq!(original_length, text.len());
                assert_eq!(summary_length, summary.len());
                // 26 of 54 characters kept
                assert_eq!(reduction, "52%");
            }
            other => panic!("unexpected analysis: {:?}", other),
        }
    }

    #[test]
    fn test_summary_short_text_unchanged() {
        let text = "One sentence. Two sentences.";
        match summary(text) {
            TextAnalysis::Summary { summary, reduction, .. } => {
                assert_eq!(summary, text);
                assert_eq!(reduction, "0%");
            }
            other => panic!("unexpected analysis: {:?}", other),
        }
    }

    #[test]
    fn test_summary_of_empty_text() {
        match summary("") {
            TextAnalysis::Summary { summary, original_length, reduction, .. } => {
                assert_eq!(summary, "");
                assert_eq!(original_length, 0);
                assert_eq!(reduction, "0%");
            }
            other => panic!("unexpected analysis: {:?}", other),
        }
    }

    #[test]
    fn test_analyze_dispatches() {
        assert!(matches!(analyze("", AnalysisType::Keywords), TextAnalysis::Keywords { total_words: 0, .. }));
        assert!(matches!(analyze("", AnalysisType::Summary), TextAnalysis::Summary { original_length: 0, .. }));
    }
}
