//! Workflow Controller
//!
//! Single-threaded five-step sequencer owning the profile, the wing
//! selection, the clarifying questions, the chat history, the analysis
//! result and the one process-wide error banner.
//!
//! Transitions:
//!
//! ```text
//! Profile --submit--> (completeness check) --> Questions | Wings
//! Questions --back--> Profile
//! Questions --validate--> Wings (clarifications folded into the profile)
//! Wings --back--> Profile
//! Wings --launch--> Analyzing
//! Analyzing --> Result (success) | Wings (failure, selection intact)
//! Result --reset--> Profile (fresh session)
//! ```
//!
//! `Analyzing` is always transient: the only exit is
//! [`Workflow::complete_analysis`], and both arms leave it. The banner slot
//! holds at most one message; it is cleared when a profile is submitted or
//! an analysis is launched, and set by the distinguished failure kinds.

use crate::analysis::AnalysisResult;
use crate::chat::ChatHistory;
use crate::error::{AiError, CoreError, CoreResult};
use crate::profile::{PilotProfile, ProfileCompleteness};
use crate::wings::WingSelection;

/// Upper bound on clarifying questions displayed to the pilot.
const MAX_QUESTIONS: usize = 3;

/// The five linear screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Profile,
    Questions,
    Wings,
    Analyzing,
    Result,
}

/// The workflow state machine.
#[derive(Debug, Default)]
pub struct Workflow {
    step: Step,
    profile: Option<PilotProfile>,
    questions: Vec<String>,
    selection: WingSelection,
    result: Option<AnalysisResult>,
    chat: ChatHistory,
    banner: Option<String>,
    return_to_top: bool,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Current banner message, if any. Latest failure wins.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Clarifying questions for the `Questions` screen.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// The pilot profile, once submitted.
    pub fn profile(&self) -> Option<&PilotProfile> {
        self.profile.as_ref()
    }

    /// The wing selection; survives analysis failures for resubmission.
    pub fn selection(&self) -> &WingSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut WingSelection {
        &mut self.selection
    }

    /// The analysis result; `Some` exactly when the step is `Result`.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn chat(&self) -> &ChatHistory {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatHistory {
        &mut self.chat
    }

    /// Consume the pending return-to-top request raised by the last step
    /// transition. The front end scrolls (or clears the screen) when this
    /// returns true.
    pub fn take_return_to_top(&mut self) -> bool {
        std::mem::take(&mut self.return_to_top)
    }

    /// Called when the profile form is submitted, before the completeness
    /// check is issued. Stores the profile and clears the banner.
    pub fn submit_profile(&mut self, profile: PilotProfile) -> CoreResult<()> {
        self.expect_step(Step::Profile, "submit_profile")?;
        self.banner = None;
        self.profile = Some(profile);
        Ok(())
    }

    /// Apply the outcome of the completeness check.
    ///
    /// Incomplete profiles with questions detour through `Questions`;
    /// everything else advances to `Wings`. Checker failures are non-fatal:
    /// the two distinguished kinds surface a banner, any other error
    /// advances silently (the checker already failed open).
    pub fn apply_completeness(
        &mut self,
        outcome: Result<ProfileCompleteness, AiError>,
    ) -> CoreResult<()> {
        self.expect_step(Step::Profile, "apply_completeness")?;
        if self.profile.is_none() {
            return Err(CoreError::validation(
                "completeness outcome without a submitted profile",
            ));
        }
        match outcome {
            Ok(completeness) if completeness.needs_clarification() => {
                self.questions = completeness.questions;
                self.questions.truncate(MAX_QUESTIONS);
                self.goto(Step::Questions);
            }
            Ok(_) => self.goto(Step::Wings),
            Err(err) => {
                if err.is_distinguished() {
                    self.banner = Some(banner_message(&err));
                }
                self.goto(Step::Wings);
            }
        }
        Ok(())
    }

    /// Back to the profile form from `Questions` or `Wings`.
    pub fn back_to_profile(&mut self) -> CoreResult<()> {
        match self.step() {
            Step::Questions | Step::Wings => {
                self.questions.clear();
                self.goto(Step::Profile);
                Ok(())
            }
            step => Err(CoreError::validation(format!(
                "back_to_profile is not available from {step:?}"
            ))),
        }
    }

    /// Validate the clarification answers: fold them into the profile's
    /// experience field and advance to `Wings`.
    pub fn validate_clarifications(&mut self, answers: &str) -> CoreResult<()> {
        self.expect_step(Step::Questions, "validate_clarifications")?;
        if let Some(profile) = self.profile.as_mut() {
            profile.append_clarifications(answers);
        }
        self.questions.clear();
        self.goto(Step::Wings);
        Ok(())
    }

    /// Launch the analysis with the current selection. Clears the banner and
    /// enters the transient `Analyzing` step; the caller issues the external
    /// call and reports back through [`Workflow::complete_analysis`].
    ///
    /// Returns the finalized profile to embed in the request.
    pub fn launch_analysis(&mut self) -> CoreResult<PilotProfile> {
        self.expect_step(Step::Wings, "launch_analysis")?;
        let profile = self
            .profile
            .clone()
            .ok_or_else(|| CoreError::validation("analysis launched without a profile"))?;
        self.banner = None;
        self.goto(Step::Analyzing);
        Ok(profile)
    }

    /// Resolve the `Analyzing` step: `Result` on success, back to `Wings`
    /// with a banner on any failure. The selection is kept intact either
    /// way.
    pub fn complete_analysis(
        &mut self,
        outcome: Result<AnalysisResult, AiError>,
    ) -> CoreResult<()> {
        self.expect_step(Step::Analyzing, "complete_analysis")?;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.goto(Step::Result);
            }
            Err(err) => {
                self.banner = Some(banner_message(&err));
                self.goto(Step::Wings);
            }
        }
        Ok(())
    }

    /// Start a fresh session from the result screen: back to `Profile` with
    /// wings, clarifications, result, chat and banner cleared.
    pub fn reset(&mut self) -> CoreResult<()> {
        self.expect_step(Step::Result, "reset")?;
        self.profile = None;
        self.questions.clear();
        self.selection = WingSelection::default();
        self.result = None;
        self.chat.clear();
        self.banner = None;
        self.goto(Step::Profile);
        Ok(())
    }

    fn goto(&mut self, step: Step) {
        self.step = step;
        // every step change brings the viewport back to the top
        self.return_to_top = true;
    }

    fn expect_step(&self, expected: Step, operation: &str) -> CoreResult<()> {
        if self.step() == expected {
            Ok(())
        } else {
            Err(CoreError::validation(format!(
                "{operation} requires step {expected:?}, current step is {:?}",
                self.step()
            )))
        }
    }
}

/// User-facing banner text for a distinguished or analysis failure.
fn banner_message(err: &AiError) -> String {
    match err {
        AiError::QuotaExceeded { .. } => {
            "Quota du service IA dépassé. Réessayez dans quelques minutes.".to_string()
        }
        AiError::InvalidCredential { .. } => {
            "Clé API absente ou refusée. Vérifiez la variable d'environnement \
             GEMINI_API_KEY puis relancez l'application."
                .to_string()
        }
        AiError::MalformedResponse { message } | AiError::Transport { message } => {
            format!("Une erreur technique est survenue : {message}")
        }
    }
}
