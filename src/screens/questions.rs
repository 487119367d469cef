//! Questions Screen
//!
//! Shows the clarifying questions raised by the completeness check and
//! collects one free-text answer block, folded into the profile by the
//! workflow.

use std::io;

use console::{style, Term};

pub enum QuestionsAction {
    /// Fix the profile instead of answering
    Back,
    /// Answers to fold into the experience field, may be empty
    Validate(String),
}

pub fn run(term: &Term, questions: &[String]) -> io::Result<QuestionsAction> {
    super::heading(term, "Quelques précisions pour affiner l'analyse")?;
    term.write_line("")?;
    for (index, question) in questions.iter().enumerate() {
        term.write_line(&format!("  {}. {question}", index + 1))?;
    }
    term.write_line("")?;
    term.write_line(&format!(
        "{}",
        style(
            "Réponds librement ci-dessous (ligne vide pour valider, \
             'retour' pour modifier ton profil) :"
        )
        .bold()
    ))?;

    let first = term.read_line()?;
    let first = first.trim_end().to_string();
    if first.trim().eq_ignore_ascii_case("retour") {
        return Ok(QuestionsAction::Back);
    }
    if first.trim().is_empty() {
        return Ok(QuestionsAction::Validate(String::new()));
    }
    let rest = super::read_paragraph(term)?;
    let answers = if rest.is_empty() {
        first
    } else {
        format!("{first}\n{rest}")
    };
    Ok(QuestionsAction::Validate(answers))
}
