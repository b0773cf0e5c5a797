//! Study Buddy HTTP server.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use study_buddy::adapters::ai::{AnthropicConfig, AnthropicProvider, OpenAIConfig, OpenAIProvider};
use study_buddy::adapters::cache::InMemoryResponseCache;
use study_buddy::adapters::http::generation::RECOVERY_OUTCOME_HEADER;
use study_buddy::adapters::http::{generation_routes, GenerationHandlers};
use study_buddy::application::{GenerateHandler, GenerationSettings};
use study_buddy::config::{
    AiConfig, AiProvider, AppConfig, ConfigError, ServerConfig, ValidationError,
};
use study_buddy::domain::recovery::RecoveryPipeline;
use study_buddy::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate().map_err(ConfigError::from)?;

    let provider = build_provider(&config.ai)?;
    let provider_info = provider.provider_info();
    info!(
        provider = %provider_info.name,
        model = %provider_info.model,
        locale = ?config.generation.locale,
        "AI provider configured"
    );

    let settings = GenerationSettings {
        timeout: config.ai.timeout(),
        study_plan_max_tokens: config.generation.study_plan_max_tokens,
        flashcards_max_tokens: config.generation.flashcards_max_tokens,
        quiz_max_tokens: config.generation.quiz_max_tokens,
        temperature: config.generation.temperature,
    };
    let mut handler = GenerateHandler::new(
        provider,
        RecoveryPipeline::new(config.generation.locale),
        settings,
    );
    if config.generation.cache_flashcards {
        handler = handler.with_cache(Arc::new(InMemoryResponseCache::new()));
    }

    let handlers = GenerationHandlers::new(Arc::new(handler), provider_info);
    let app = build_app(generation_routes(handlers), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Study Buddy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_provider(ai: &AiConfig) -> Result<Arc<dyn AIProvider>, ConfigError> {
    let api_key = ai
        .primary_api_key()
        .ok_or(ValidationError::MissingRequired("AI_API_KEY"))?
        .to_string();

    let provider: Arc<dyn AIProvider> = match ai.primary_provider {
        AiProvider::Anthropic => {
            let mut config = AnthropicConfig::new(api_key).with_timeout(ai.timeout());
            if let Some(model) = &ai.model {
                config = config.with_model(model);
            }
            if let Some(url) = &ai.base_url {
                config = config.with_base_url(url);
            }
            Arc::new(AnthropicProvider::new(config))
        }
        AiProvider::OpenAI => {
            let mut config = OpenAIConfig::new(api_key).with_timeout(ai.timeout());
            if let Some(model) = &ai.model {
                config = config.with_model(model);
            }
            if let Some(url) = &ai.base_url {
                config = config.with_base_url(url);
            }
            Arc::new(OpenAIProvider::new(config))
        }
    };

    Ok(provider)
}

fn build_app(routes: Router, server: &ServerConfig) -> Router {
    routes
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(RECOVERY_OUTCOME_HEADER)]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
