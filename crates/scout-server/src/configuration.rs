use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment};
use scout::providers::{
    configs::{GroqProviderConfig, OpenAiProviderConfig, ProviderConfig},
    factory::ProviderType,
    groq, openai,
};
use scout::search::tavily::{self, TavilyConfig};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ProviderSettings {
    Groq {
        #[serde(default = "default_groq_host")]
        host: String,
        api_key: String,
    },
    OpenAi {
        #[serde(default = "default_openai_host")]
        host: String,
        api_key: String,
    },
}

impl ProviderSettings {
    pub fn provider_type(&self) -> ProviderType {
        match self {
            ProviderSettings::Groq { .. } => ProviderType::Groq,
            ProviderSettings::OpenAi { .. } => ProviderType::OpenAi,
        }
    }

    // Convert to the scout ProviderConfig
    pub fn into_config(self) -> ProviderConfig {
        match self {
            ProviderSettings::Groq { host, api_key } => {
                ProviderConfig::Groq(GroqProviderConfig { host, api_key })
            }
            ProviderSettings::OpenAi { host, api_key } => {
                ProviderConfig::OpenAi(OpenAiProviderConfig { host, api_key })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_tavily_host")]
    pub host: String,
    pub api_key: String,
}

impl SearchSettings {
    pub fn into_config(self) -> TavilyConfig {
        TavilyConfig {
            host: self.host,
            api_key: self.api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    /// Web search is disabled for every request when this section is absent
    #[serde(default)]
    pub search: Option<SearchSettings>,
    /// Models callers may ask for; an empty list allows any model
    #[serde(default = "default_allowed_models")]
    pub allowed_models: Vec<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        // Start with default configuration
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            // Provider defaults
            .set_default("provider.type", ProviderType::Groq.to_string())?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("SCOUT")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_models")
                    .try_parsing(true),
            )
            .build()?;

        // Try to deserialize the configuration
        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        // Handle missing field errors specially
        match result {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                if let Some(field) = missing_field_path(&err.to_string()) {
                    let env_var = to_env_var(&field);
                    Err(ConfigError::MissingEnvVar { env_var })
                } else if let config::ConfigError::NotFound(field) = &err {
                    let env_var = to_env_var(field);
                    Err(ConfigError::MissingEnvVar { env_var })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

/// Recover the dotted key path from a "missing field `x` [for key `y`]" message
fn missing_field_path(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    let (field, rest) = rest.split_once('`')?;
    match rest
        .trim_start()
        .strip_prefix("for key `")
        .and_then(|key| key.split_once('`'))
    {
        Some((parent, _)) => Some(format!("{}.{}", parent, field)),
        None => Some(field.to_string()),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_groq_host() -> String {
    groq::GROQ_HOST.to_string()
}

fn default_openai_host() -> String {
    openai::OPENAI_HOST.to_string()
}

fn default_tavily_host() -> String {
    tavily::TAVILY_HOST.to_string()
}

fn default_allowed_models() -> Vec<String> {
    vec![
        groq::GROQ_MODEL.to_string(),
        "llama-3.1-8b-instant".to_string(),
    ]
}
