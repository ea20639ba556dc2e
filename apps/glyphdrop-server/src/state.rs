//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::ocr::{GeminiProvider, OcrError, OcrProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    provider: Arc<dyn OcrProvider>,
}

impl AppState {
    /// Create application state backed by the Gemini provider
    pub fn new(config: Config) -> Result<Self, OcrError> {
        let provider = GeminiProvider::new(config.gemini.clone())?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create application state with an explicit provider
    pub fn with_provider(config: Config, provider: Arc<dyn OcrProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, provider }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the OCR provider
    pub fn provider(&self) -> &dyn OcrProvider {
        self.inner.provider.as_ref()
    }
}
