//! Client Types
//!
//! Configuration and per-request options for the Gemini client.

use wing_analyst_core::{AiError, ChatMessage, ChatRole};

/// Model used for the profile completeness check and the follow-up chat.
pub const FLASH_MODEL: &str = "gemini-3-flash-preview";
/// Model used for the wing analysis (web grounding + extended thinking).
pub const PRO_MODEL: &str = "gemini-3-pro-preview";
/// Thinking budget for the analysis request, in tokens.
pub const ANALYSIS_THINKING_BUDGET: u32 = 8000;

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini client configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` when the environment carries no key. Calls made
    /// without a key fail with an invalid-credential classification.
    pub api_key: Option<String>,
    /// Endpoint base URL
    pub base_url: String,
}

impl GeminiConfig {
    /// Read `GEMINI_API_KEY` (or the legacy `API_KEY`) and the optional
    /// `GEMINI_BASE_URL` override.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let base_url = std::env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { api_key, base_url }
    }
}

/// Error for a call attempted without a configured key. Carries the
/// guidance the banner shows to the user.
pub fn missing_api_key_error() -> AiError {
    AiError::InvalidCredential {
        message: "Aucune clé API configurée (variable d'environnement GEMINI_API_KEY)"
            .to_string(),
    }
}

/// One fully-specified generation request, independent of the wire format.
#[derive(Debug, Clone, Default)]
pub struct ModelRequest {
    /// Conversation turns, oldest first. A single-element history is a
    /// plain prompt.
    pub turns: Vec<ChatMessage>,
    /// Optional system instruction
    pub system: Option<String>,
    /// Request strict JSON output
    pub json_output: bool,
    /// Enable the Google Search grounding tool
    pub web_grounding: bool,
    /// Extended thinking budget in tokens
    pub thinking_budget: Option<u32>,
}

impl ModelRequest {
    /// A single-prompt request with default options.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatMessage {
                role: ChatRole::User,
                text: text.into(),
            }],
            ..Default::default()
        }
    }

    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    pub fn with_web_grounding(mut self) -> Self {
        self.web_grounding = true;
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_builder() {
        let request = ModelRequest::prompt("Analyse ce profil")
            .with_json_output()
            .with_thinking_budget(8000);
        assert_eq!(request.turns.len(), 1);
        assert!(request.json_output);
        assert!(!request.web_grounding);
        assert_eq!(request.thinking_budget, Some(8000));
    }

    #[test]
    fn test_missing_key_is_invalid_credential() {
        assert!(matches!(
            missing_api_key_error(),
            AiError::InvalidCredential { .. }
        ));
    }
}
