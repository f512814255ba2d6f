//! These models represent the objects passed between callers, the responder and the LLM
//!
//! There are a few related formats we need to interact with:
//! - incoming agent requests, where the query may be a single string or a list of values
//! - openai compatible chat messages, sent from the responder to the LLM
//! - chat completion replies, which may or may not carry a text content field
//!
//! We convert those formats into the internal structs as soon as they cross a boundary,
//! so the responder only ever deals with the types below.
pub mod message;
pub mod query;
pub mod reply;
pub mod role;
