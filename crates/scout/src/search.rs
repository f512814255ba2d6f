//! Web search capability used to augment a request with fresh context
pub mod base;
pub mod tavily;

#[cfg(test)]
pub mod mock;
