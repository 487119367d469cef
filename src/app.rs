//! Application Loop
//!
//! Drives the workflow controller through the terminal screens. The screens
//! are purely interactive; all AI calls are issued here (or from the loading
//! screen) and reported back into the controller, which is the only place
//! deciding where to go next. Calls are strictly sequential: one request is
//! in flight at any time.

use anyhow::Context;
use console::{style, Term};
use tracing::debug;

use wing_analyst_core::{Step, Workflow};
use wing_analyst_llm::{GeminiConfig, WingAdvisor};

use crate::screens;
use crate::screens::questions::QuestionsAction;
use crate::screens::result::ResultAction;
use crate::screens::wings::WingsAction;

pub struct App {
    workflow: Workflow,
    advisor: WingAdvisor,
    term: Term,
}

impl App {
    /// Build the application with credentials from the environment.
    pub fn from_env() -> Self {
        Self {
            workflow: Workflow::new(),
            advisor: WingAdvisor::new(GeminiConfig::from_env()),
            term: Term::stdout(),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        self.term.write_line(&format!(
            "{}",
            style("Wing Analyst — L'IA t'aide à choisir ta prochaine voile !")
                .bold()
                .cyan()
        ))?;
        self.term.write_line("")?;

        loop {
            if self.workflow.take_return_to_top() {
                self.term.clear_screen()?;
            }
            if let Some(banner) = self.workflow.banner() {
                self.term
                    .write_line(&format!("{}", style(banner).red().bold()))?;
                self.term.write_line("")?;
            }
            debug!(step = ?self.workflow.step(), "entering step");

            match self.workflow.step() {
                Step::Profile => {
                    let profile = screens::profile::collect(&self.term)?;
                    self.workflow.submit_profile(profile.clone())?;
                    let outcome = screens::loading::with_spinner(
                        "Vérification du profil...",
                        self.advisor.check_profile_completeness(&profile),
                    )
                    .await;
                    self.workflow.apply_completeness(outcome)?;
                }
                Step::Questions => {
                    match screens::questions::run(&self.term, self.workflow.questions())? {
                        QuestionsAction::Back => self.workflow.back_to_profile()?,
                        QuestionsAction::Validate(answers) => {
                            self.workflow.validate_clarifications(&answers)?;
                        }
                    }
                }
                Step::Wings => {
                    match screens::wings::run(&self.term, self.workflow.selection_mut())? {
                        WingsAction::Back => self.workflow.back_to_profile()?,
                        WingsAction::Launch => {
                            self.workflow.launch_analysis()?;
                        }
                    }
                }
                Step::Analyzing => {
                    let profile = self
                        .workflow
                        .profile()
                        .cloned()
                        .context("analyse en cours sans profil")?;
                    let selection = self.workflow.selection().clone();
                    let outcome = screens::loading::run_analysis(
                        &self.term,
                        &self.advisor,
                        &profile,
                        &selection,
                    )
                    .await?;
                    self.workflow.complete_analysis(outcome)?;
                }
                Step::Result => {
                    match screens::result::run(&self.term, &self.advisor, &mut self.workflow)
                        .await?
                    {
                        ResultAction::NewSession => self.workflow.reset()?,
                        ResultAction::Quit => break,
                    }
                }
            }
        }

        self.term
            .write_line(&format!("{}", style("Bons vols !").bold().cyan()))?;
        Ok(())
    }
}
