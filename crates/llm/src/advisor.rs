//! Advisor Service
//!
//! The three operations the workflow issues against the model, each with
//! its own failure policy:
//!
//! - completeness check: fails open (profile treated as complete) except
//!   for quota/credential failures, which propagate;
//! - wing analysis: propagates every classified failure;
//! - follow-up chat: propagates, the caller contains the failure inside
//!   the chat panel.

use tracing::{info, warn};

use wing_analyst_core::parser::parse_analysis_response;
use wing_analyst_core::{
    AiError, AnalysisResult, ChatHistory, PilotProfile, ProfileCompleteness, WingSelection,
};

use crate::gemini::GeminiClient;
use crate::prompts;
use crate::types::{
    GeminiConfig, ModelRequest, ANALYSIS_THINKING_BUDGET, FLASH_MODEL, PRO_MODEL,
};

/// High-level client for the three AI operations.
pub struct WingAdvisor {
    client: GeminiClient,
}

impl WingAdvisor {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: GeminiClient::new(config),
        }
    }

    /// Ask whether the profile carries enough information, with up to three
    /// clarifying questions.
    ///
    /// Fail-open policy: a malformed response or a generic transport
    /// failure yields `Ok(complete)` so the workflow advances; only the
    /// two distinguished kinds reach the controller as errors.
    pub async fn check_profile_completeness(
        &self,
        profile: &PilotProfile,
    ) -> Result<ProfileCompleteness, AiError> {
        let request = ModelRequest::prompt(prompts::completeness_prompt(profile)).with_json_output();
        match self.client.generate(FLASH_MODEL, &request).await {
            Ok(reply) => match serde_json::from_str::<ProfileCompleteness>(reply.text.trim()) {
                Ok(completeness) => Ok(completeness),
                Err(err) => {
                    warn!(error = %err, "completeness check returned non-JSON, treating profile as complete");
                    Ok(ProfileCompleteness::complete())
                }
            },
            Err(err) if err.is_distinguished() => Err(err),
            Err(err) => {
                warn!(error = %err, "completeness check failed, treating profile as complete");
                Ok(ProfileCompleteness::complete())
            }
        }
    }

    /// Run the full wing analysis and parse the response into a dossier,
    /// chart dataset and grounding sources.
    pub async fn analyze_wings(
        &self,
        profile: &PilotProfile,
        selection: &WingSelection,
    ) -> Result<AnalysisResult, AiError> {
        let request = ModelRequest::prompt(prompts::analysis_prompt(profile, selection))
            .with_web_grounding()
            .with_thinking_budget(ANALYSIS_THINKING_BUDGET);
        let reply = self.client.generate(PRO_MODEL, &request).await?;
        if reply.text.trim().is_empty() {
            return Err(AiError::MalformedResponse {
                message: "réponse vide du service d'analyse".to_string(),
            });
        }
        info!(
            chars = reply.text.len(),
            sources = reply.sources.len(),
            "analysis response received"
        );
        Ok(parse_analysis_response(&reply.text, reply.sources))
    }

    /// One follow-up chat turn. The system context is rebuilt from the
    /// live editable dossier on every send; the prior history is replayed
    /// in full.
    pub async fn ask_follow_up(
        &self,
        history: &ChatHistory,
        dossier: &str,
    ) -> Result<String, AiError> {
        let request = ModelRequest {
            turns: history.messages().to_vec(),
            system: Some(prompts::chat_system_prompt(dossier)),
            ..Default::default()
        };
        let reply = self.client.generate(FLASH_MODEL, &request).await?;
        if reply.text.trim().is_empty() {
            return Err(AiError::MalformedResponse {
                message: "réponse vide de l'expert".to_string(),
            });
        }
        Ok(reply.text)
    }
}
