use std::sync::Arc;

use crate::config::Config;
use crate::generation::ContentGenerator;
use crate::workflow::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Stateless; shared by every session.
    pub generator: Arc<ContentGenerator>,
    pub config: Config,
}

#[cfg(test)]
pub(crate) fn test_state(generator: ContentGenerator) -> AppState {
    use std::time::Duration;

    use crate::llm_client::ANTHROPIC_API_URL;
    use crate::locale::Language;

    AppState {
        sessions: SessionStore::new(Duration::from_secs(3600)),
        generator: Arc::new(generator),
        config: Config {
            anthropic_api_key: "test-key".to_string(),
            anthropic_api_url: ANTHROPIC_API_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            llm_max_attempts: 3,
            llm_backoff_base: Duration::ZERO,
            default_language: Language::En,
            session_ttl: Duration::from_secs(3600),
        },
    }
}
