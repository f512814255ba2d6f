use scout::providers::configs::ProviderConfig;
use scout::search::tavily::TavilyConfig;

use crate::configuration::Settings;

/// Shared application state
///
/// Only configuration is shared; every request builds its own provider clients from it.
#[derive(Clone)]
pub struct AppState {
    pub provider_config: ProviderConfig,
    pub search_config: Option<TavilyConfig>,
    pub allowed_models: Vec<String>,
}

impl AppState {
    pub fn is_allowed_model(&self, model: &str) -> bool {
        self.allowed_models.is_empty() || self.allowed_models.iter().any(|m| m == model)
    }
}

impl From<Settings> for AppState {
    fn from(settings: Settings) -> Self {
        Self {
            provider_config: settings.provider.into_config(),
            search_config: settings.search.map(|search| search.into_config()),
            allowed_models: settings.allowed_models,
        }
    }
}
