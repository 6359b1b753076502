use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::errors::LlmError;
use crate::models::{ContentRequest, GeneratedContent};
use crate::services::content_templates;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const TEMPLATE_NOTE: &str = "Configure OPENAI_API_KEY for AI-generated content";

/// Configuration for LLM service
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub model: String,
    pub tokens_used: Option<u32>,
}

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate_completion(
        &self,
        system: String,
        prompt: String,
        max_tokens: usize,
    ) -> Result<Completion, LlmError>;
}

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Serialize, Clone)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    model: Option<String>,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    total_tokens: u32,
}

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    temperature: f32,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, temperature: f32, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        Ok(Self {
            api_key,
            model,
            temperature,
            client,
        })
    }

    async fn call_openai_with_retry(&self, request: OpenAiRequest) -> Result<OpenAiResponse, LlmError> {
        let max_retries = 3;
        let mut retry_count = 0;
        let mut delay = Duration::from_secs(1);

        loop {
            match self.call_openai(&request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    retry_count += 1;
                    if retry_count >= max_retries {
                        error!("OpenAI API call failed after {} attempts: {}", max_retries, e);
                        return Err(e);
                    }

                    warn!(
                        "OpenAI API call failed (attempt {}/{}): {}. Retrying in {:?}...",
                        retry_count, max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    async fn call_openai(&self, request: &OpenAiRequest) -> Result<OpenAiResponse, LlmError> {
        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ApiError(format!("HTTP {}: {}", status, error_text)));
        }

        response
            .json::<OpenAiResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate_completion(
        &self,
        system: String,
        prompt: String,
        max_tokens: usize,
    ) -> Result<Completion, LlmError> {
        info!("Generating LLM completion (model: {}, max_tokens: {})", self.model, max_tokens);

        let request = OpenAiRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: system,
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            max_tokens,
            temperature: self.temperature,
        };

        let response = self.call_openai_with_retry(request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?
            .message
            .content;

        let tokens_used = response.usage.map(|u| u.total_tokens);
        if let Some(tokens) = tokens_used {
            info!("LLM completion generated. Tokens used: {}", tokens);
        }

        Ok(Completion {
            content,
            model: response.model.unwrap_or_else(|| self.model.clone()),
            tokens_used,
        })
    }
}

#[derive(Debug, Clone)]
struct CachedCompletion {
    completion: Completion,
    created_at: Instant,
}

/// Completion cache with TTL
pub struct LlmCache {
    cache: Arc<RwLock<HashMap<String, CachedCompletion>>>,
    ttl: Duration,
}

impl LlmCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<Completion> {
        let cache = self.cache.read().await;
        cache
            .get(key)
            .filter(|cached| cached.created_at.elapsed() < self.ttl)
            .map(|cached| cached.completion.clone())
    }

    pub async fn set(&self, key: String, completion: Completion) {
        let mut cache = self.cache.write().await;
        cache.retain(|_, v| v.created_at.elapsed() < self.ttl);
        cache.insert(
            key,
            CachedCompletion {
                completion,
                created_at: Instant::now(),
            },
        );
    }
}

/// Content generation with an optional model behind it.
///
/// Without a provider, or when the provider fails, requests are answered from
/// the built-in templates instead of surfacing an error.
pub struct LlmService {
    provider: Option<Arc<dyn LlmProvider>>,
    cache: LlmCache,
}

impl LlmService {
    pub fn new(config: &LlmConfig) -> Self {
        let provider = match (config.enabled, config.api_key.as_ref()) {
            (true, Some(api_key)) => {
                match OpenAiProvider::new(
                    api_key.clone(),
                    config.model.clone(),
                    config.temperature,
                    Duration::from_secs(config.timeout_secs),
                ) {
                    Ok(provider) => {
                        info!("🤖 LLM content generation enabled (model: {})", config.model);
                        Some(Arc::new(provider) as Arc<dyn LlmProvider>)
                    }
                    Err(e) => {
                        warn!("Failed to initialise OpenAI client: {}. Using templates only.", e);
                        None
                    }
                }
            }
            _ => {
                info!("LLM API key not configured. Using template content generation.");
                None
            }
        };

        Self {
            provider,
            cache: LlmCache::new(Duration::from_secs(3600)),
        }
    }

    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
            cache: LlmCache::new(Duration::from_secs(3600)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn generate_content(&self, request: &ContentRequest) -> GeneratedContent {
        let Some(provider) = self.provider.as_ref() else {
            return Self::from_template(request);
        };

        let system = format!(
            "You are a professional content writer for Quantalyze Digital Agency. \
             Generate {} content with a {} tone. Keep the length {}.",
            label(&request.content_type),
            label(&request.tone),
            label(&request.length)
        );

        let cache_key = format!("{}:{}", Self::hash_prompt(&system), Self::hash_prompt(&request.prompt));
        if let Some(cached) = self.cache.get(&cache_key).await {
            info!("Serving cached completion");
            return Self::from_completion(cached);
        }

        match provider
            .generate_completion(system, request.prompt.clone(), request.length.max_tokens())
            .await
        {
            Ok(completion) => {
                self.cache.set(cache_key, completion.clone()).await;
                Self::from_completion(completion)
            }
            Err(e) => {
                warn!("LLM generation failed, falling back to template: {}", e);
                Self::from_template(request)
            }
        }
    }

    fn from_completion(completion: Completion) -> GeneratedContent {
        GeneratedContent::AiGenerated {
            content: completion.content,
            model: completion.model,
            tokens_used: completion.tokens_used,
        }
    }

    fn from_template(request: &ContentRequest) -> GeneratedContent {
        GeneratedContent::TemplateGenerated {
            content: content_templates::render(request),
            note: TEMPLATE_NOTE.to_string(),
        }
    }

    fn hash_prompt(prompt: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        prompt.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }
}

fn label(value: &impl std::fmt::Debug) -> String {
    format!("{:?}", value).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentLength, ContentType, Tone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        async fn generate_completion(
            &self,
            _system: String,
            prompt: String,
            max_tokens: usize,
        ) -> Result<Completion, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LlmError::RateLimited);
            }
            Ok(Completion {
                content: format!("AI: {} ({})", prompt, max_tokens),
                model: "stub-model".to_string(),
                tokens_used: Some(42),
            })
        }
    }

    fn request() -> ContentRequest {
        ContentRequest {
            prompt: "Launch announcement".to_string(),
            content_type: ContentType::Social,
            tone: Tone::Professional,
            length: ContentLength::Short,
        }
    }

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_disabled_service_uses_templates() {
        let service = LlmService::new(&LlmConfig::default());
        assert!(!service.is_enabled());

        let content = service.generate_content(&request()).await;
        assert!(matches!(content, GeneratedContent::TemplateGenerated { .. }));
        assert!(content.content().contains("Launch announcement"));
        assert_eq!(content.model(), "template");
    }

    #[tokio::test]
    async fn test_provider_success_is_ai_generated_and_cached() {
        let stub = Arc::new(StubProvider { calls: AtomicUsize::new(0), fail: false });
        let service = LlmService::with_provider(stub.clone());

        let first = service.generate_content(&request()).await;
        let second = service.generate_content(&request()).await;

        assert_eq!(
            first,
            GeneratedContent::AiGenerated {
                content: "AI: Launch announcement (150)".to_string(),
                model: "stub-model".to_string(),
                tokens_used: Some(42),
            }
        );
        assert_eq!(first, second);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_template() {
        let stub = Arc::new(StubProvider { calls: AtomicUsize::new(0), fail: true });
        let service = LlmService::with_provider(stub);

        let content = service.generate_content(&request()).await;
        assert!(matches!(content, GeneratedContent::TemplateGenerated { .. }));
        assert!(content.content().starts_with("🚀 Launch announcement"));
    }

    #[tokio::test]
    async fn test_cache_expires() {
        let cache = LlmCache::new(Duration::from_millis(50));
        let completion = Completion { content: "x".into(), model: "m".into(), tokens_used: None };
        cache.set("key".to_string(), completion.clone()).await;
        assert_eq!(cache.get("key").await, Some(completion));

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(cache.get("key").await, None);
    }
}
