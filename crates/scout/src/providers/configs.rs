use crate::providers::groq::GROQ_HOST;
use crate::providers::openai::OPENAI_HOST;

// Unified enum to wrap different provider configurations
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Groq(GroqProviderConfig),
    OpenAi(OpenAiProviderConfig),
}

#[derive(Debug, Clone)]
pub struct GroqProviderConfig {
    pub host: String,
    pub api_key: String,
}

impl GroqProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: GROQ_HOST.to_string(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
}

impl OpenAiProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: OPENAI_HOST.to_string(),
            api_key: api_key.into(),
        }
    }
}
