use anyhow::{Context, Result};
use bat::PrettyPrinter;
use cliclack::spinner;
use console::style;
use scout::{
    agent::{Agent, AgentRequest},
    models::query::Query,
    providers::{
        configs::{GroqProviderConfig, OpenAiProviderConfig, ProviderConfig},
        factory::ProviderType,
    },
    search::tavily::TavilyConfig,
};
use std::env;

pub struct AskOptions {
    pub messages: Vec<String>,
    pub provider: ProviderType,
    pub model: String,
    pub system: Option<String>,
    pub search: bool,
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub search_api_key: Option<String>,
}

impl AskOptions {
    fn provider_config(&self) -> Result<ProviderConfig> {
        let config = match self.provider {
            ProviderType::Groq => {
                let api_key = flag_or_env(&self.api_key, "GROQ_API_KEY")?;
                let mut config = GroqProviderConfig::new(api_key);
                if let Some(host) = &self.host {
                    config.host = host.clone();
                }
                ProviderConfig::Groq(config)
            }
            ProviderType::OpenAi => {
                let api_key = flag_or_env(&self.api_key, "OPENAI_API_KEY")?;
                let mut config = OpenAiProviderConfig::new(api_key);
                if let Some(host) = &self.host {
                    config.host = host.clone();
                }
                ProviderConfig::OpenAi(config)
            }
        };
        Ok(config)
    }

    /// Search is only wired up when it was asked for and a key is available
    fn search_config(&self) -> Option<TavilyConfig> {
        if !self.search {
            return None;
        }
        flag_or_env(&self.search_api_key, "TAVILY_API_KEY")
            .ok()
            .map(TavilyConfig::new)
    }

    /// Search is dropped from the request when no search client could be configured,
    /// so the missing key is reported once by the notice in `execute`
    fn request(&self, search_available: bool) -> AgentRequest {
        AgentRequest {
            model: self.model.clone(),
            query: Some(Query::from(self.messages.clone())),
            allow_search: self.search && search_available,
            system_prompt: self.system.clone(),
        }
    }
}

fn flag_or_env(flag: &Option<String>, env_var: &str) -> Result<String> {
    match flag {
        Some(value) => Ok(value.clone()),
        None => env::var(env_var).with_context(|| {
            format!("No API key provided. Pass it as a flag or set {}", env_var)
        }),
    }
}

pub async fn execute(options: AskOptions) -> Result<()> {
    let search_config = options.search_config();
    if options.search && search_config.is_none() {
        eprintln!(
            "{}",
            style("TAVILY_API_KEY is not set, answering without web search").yellow()
        );
    }

    let request = options.request(search_config.is_some());
    let agent = Agent::from_configs(options.provider_config()?, search_config)?;

    let spin = spinner();
    spin.start("awaiting reply");
    let result = agent.respond(&request).await;
    spin.stop("");

    render(&result?)?;
    println!();
    Ok(())
}

fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()?;
    Ok(())
}
