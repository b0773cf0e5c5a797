//! GenerateHandler - Command handler for producing one domain object.
//!
//! Flow for a single command:
//!
//! 1. Validate the request (rejected before any provider call)
//! 2. Consult the response cache for cacheable kinds
//! 3. Build the prompt and make exactly one provider call, bounded by the
//!    configured timeout and the caller's cancellation future
//! 4. Run the recovery pipeline on the returned text
//! 5. Store genuine model results in the cache
//!
//! Provider failures and timeouts are returned as errors. They are never
//! masked by a fallback object.

use std::future::{self, Future};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::foundation::ValidationError;
use crate::domain::recovery::{ErrorKind, RecoveryOutcome, RecoveryPipeline};
use crate::domain::study::{build_prompt, CacheKey, DomainKind, DomainObject, GenerationRequest};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, MessageRole, RequestMetadata,
    ResponseCache,
};

/// Command to generate one domain object.
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    pub request: GenerationRequest,
    /// Correlates the log lines of one run.
    pub trace_id: String,
}

impl GenerateCommand {
    /// Creates a command with a fresh trace id.
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            request,
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }
}

/// Where a returned object came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationSource {
    Parsed,
    RepairedAndParsed,
    Fallback,
    Cached,
}

impl GenerationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationSource::Parsed => "parsed",
            GenerationSource::RepairedAndParsed => "repaired_and_parsed",
            GenerationSource::Fallback => "fallback",
            GenerationSource::Cached => "cached",
        }
    }
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub object: DomainObject,
    pub source: GenerationSource,
}

/// User-visible generation failures.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    #[error("AI provider request failed: {0}")]
    Provider(String),

    #[error("AI provider did not respond in time")]
    ProviderTimeout,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            GenerationError::Provider(_) => ErrorKind::ProviderError,
            GenerationError::ProviderTimeout => ErrorKind::ProviderTimeout,
        }
    }
}

impl From<AIError> for GenerationError {
    fn from(err: AIError) -> Self {
        match err.kind() {
            ErrorKind::ProviderTimeout => GenerationError::ProviderTimeout,
            _ => GenerationError::Provider(err.to_string()),
        }
    }
}

/// Tuning for provider calls.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Upper bound on one provider call.
    pub timeout: Duration,
    pub study_plan_max_tokens: u32,
    pub flashcards_max_tokens: u32,
    pub quiz_max_tokens: u32,
    pub temperature: Option<f32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            study_plan_max_tokens: 4000,
            flashcards_max_tokens: 2000,
            quiz_max_tokens: 4000,
            temperature: None,
        }
    }
}

impl GenerationSettings {
    /// Token budget for a domain kind.
    pub fn max_tokens_for(&self, kind: DomainKind) -> u32 {
        match kind {
            DomainKind::StudyPlan => self.study_plan_max_tokens,
            DomainKind::FlashcardSet => self.flashcards_max_tokens,
            DomainKind::Quiz => self.quiz_max_tokens,
        }
    }
}

/// Handler for generation commands.
pub struct GenerateHandler {
    provider: Arc<dyn AIProvider>,
    pipeline: RecoveryPipeline,
    cache: Option<Arc<dyn ResponseCache>>,
    settings: GenerationSettings,
}

impl GenerateHandler {
    pub fn new(
        provider: Arc<dyn AIProvider>,
        pipeline: RecoveryPipeline,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            provider,
            pipeline,
            cache: None,
            settings,
        }
    }

    /// Enables result caching for cacheable kinds.
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub async fn handle(&self, cmd: GenerateCommand) -> Result<GenerateResult, GenerationError> {
        self.handle_until(cmd, future::pending()).await
    }

    /// Like [`handle`](Self::handle), but gives up with `ProviderTimeout`
    /// as soon as `cancel` completes.
    pub async fn handle_until<C>(
        &self,
        cmd: GenerateCommand,
        cancel: C,
    ) -> Result<GenerateResult, GenerationError>
    where
        C: Future<Output = ()> + Send,
    {
        let GenerateCommand { request, trace_id } = cmd;
        let kind = request.kind();

        // 1. Validate before spending a provider call
        request.validate()?;

        // 2. Cache lookup
        let cache_key = self.cache_key(&request);
        if let (Some(cache), Some(key)) = (&self.cache, &cache_key) {
            if let Some(object) = cache.get(key).await {
                info!(%kind, %trace_id, key = %key, "Serving cached generation result");
                return Ok(GenerateResult {
                    object,
                    source: GenerationSource::Cached,
                });
            }
        }

        // 3. Single provider call
        let completion = self.completion_request(&request, &trace_id);
        let response = self.call_provider(completion, cancel).await.map_err(|e| {
            error!(%kind, %trace_id, error = %e, "Generation failed at provider call");
            e
        })?;
        debug!(
            %kind,
            %trace_id,
            model = %response.model,
            tokens = response.usage.total_tokens,
            "Provider returned completion"
        );

        // 4. Recovery
        let (object, source) = match self.pipeline.recover(&response.content, &request) {
            RecoveryOutcome::Parsed(object) => (object, GenerationSource::Parsed),
            RecoveryOutcome::RepairedAndParsed(object) => {
                (object, GenerationSource::RepairedAndParsed)
            }
            RecoveryOutcome::Fallback(object) => (object, GenerationSource::Fallback),
            RecoveryOutcome::Rejected(reason) => {
                return Err(GenerationError::InvalidRequest(
                    ValidationError::invalid_format("request", reason.as_str()),
                ));
            }
        };

        // 5. Only genuine model output is cached
        if source != GenerationSource::Fallback {
            if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
                cache.put(key, object.clone()).await;
            }
        }

        info!(%kind, %trace_id, outcome = source.as_str(), "Generation completed");

        Ok(GenerateResult { object, source })
    }

    fn cache_key(&self, request: &GenerationRequest) -> Option<CacheKey> {
        self.cache.as_ref().and(CacheKey::for_request(request))
    }

    fn completion_request(&self, request: &GenerationRequest, trace_id: &str) -> CompletionRequest {
        let kind = request.kind();
        let prompt = build_prompt(request, self.pipeline.locale());

        let completion = CompletionRequest::new(RequestMetadata::new(kind, trace_id))
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(self.settings.max_tokens_for(kind));

        match self.settings.temperature {
            Some(temperature) => completion.with_temperature(temperature),
            None => completion,
        }
    }

    async fn call_provider<C>(
        &self,
        completion: CompletionRequest,
        cancel: C,
    ) -> Result<CompletionResponse, GenerationError>
    where
        C: Future<Output = ()> + Send,
    {
        let call = tokio::time::timeout(self.settings.timeout, self.provider.complete(completion));

        tokio::select! {
            biased;
            _ = cancel => {
                warn!("Generation cancelled before the provider responded");
                Err(GenerationError::ProviderTimeout)
            }
            result = call => match result {
                Ok(response) => Ok(response?),
                Err(_) => {
                    warn!(
                        timeout_secs = self.settings.timeout.as_secs(),
                        "Provider call timed out"
                    );
                    Err(GenerationError::ProviderTimeout)
                }
            },
        }
    }
}
