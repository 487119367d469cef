//! Wing Analyst LLM
//!
//! Everything that talks to the Gemini API: the HTTP client, the request
//! and response wire types, the prompt contracts and the advisor service
//! wrapping the three operations (profile completeness check, wing
//! analysis, follow-up chat).

pub mod advisor;
pub mod gemini;
pub mod http_client;
pub mod prompts;
pub mod types;

// Re-export main types
pub use advisor::WingAdvisor;
pub use gemini::{GeminiClient, GeminiReply};
pub use http_client::build_http_client;
pub use types::{GeminiConfig, ModelRequest};
