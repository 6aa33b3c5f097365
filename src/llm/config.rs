//! Oracle configuration and construction

use super::gemini::{GeminiModel, GeminiService};
use super::{LlmService, LoggingService};
use std::sync::Arc;

/// Configuration for the extraction oracle
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub gemini_api_key: Option<String>,
    /// Model override (`gemini-2.5-flash` is the default)
    pub model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            model: std::env::var("ORACLE_MODEL").ok(),
        }
    }
}

/// Build the oracle service from configuration.
///
/// Returns None when no API key is configured; callers degrade to the
/// fallback re-prompt path rather than failing startup.
pub fn build_oracle(config: &LlmConfig) -> Option<Arc<dyn LlmService>> {
    let api_key = config.gemini_api_key.as_ref()?;
    if api_key.is_empty() {
        return None;
    }

    let model = match config.model.as_deref() {
        Some("gemini-2.5-pro") => GeminiModel::Pro25,
        Some(other) if other != "gemini-2.5-flash" => {
            tracing::warn!(model = %other, "Unknown ORACLE_MODEL, using gemini-2.5-flash");
            GeminiModel::Flash25
        }
        _ => GeminiModel::Flash25,
    };

    let service = Arc::new(GeminiService::new(api_key.clone(), model));
    Some(Arc::new(LoggingService::new(service)))
}
