use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure reported by the LLM provider, passed through untouched
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
