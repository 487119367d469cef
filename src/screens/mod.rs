//! Terminal Screens
//!
//! One module per workflow step, plus the shared line-input helpers. Every
//! screen draws with [`console`] and reads whole lines; nothing here talks
//! to the model directly except the loading screen, which owns the spinner
//! around the long analysis call.

pub mod loading;
pub mod profile;
pub mod questions;
pub mod result;
pub mod wings;

use std::io;

use console::{style, Term};

/// Screen title banner.
pub fn heading(term: &Term, title: &str) -> io::Result<()> {
    term.write_line(&format!("{}", style(title).bold().cyan()))?;
    term.write_line(&format!("{}", style("─".repeat(title.chars().count())).dim()))
}

/// Prompt for one line; returns the trimmed input, or the default when the
/// pilot just presses enter.
pub fn prompt_line(term: &Term, label: &str, default: &str) -> io::Result<String> {
    if default.is_empty() {
        term.write_line(&format!("{}", style(label).bold()))?;
    } else {
        term.write_line(&format!("{} {}", style(label).bold(), style(format!("[{default}]")).dim()))?;
    }
    let input = term.read_line()?;
    let input = input.trim();
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input.to_string())
    }
}

/// Prompt until the pilot types something non-empty.
pub fn required_line(term: &Term, label: &str) -> io::Result<String> {
    loop {
        let input = prompt_line(term, label, "")?;
        if !input.is_empty() {
            return Ok(input);
        }
        term.write_line(&format!("{}", style("Ce champ est requis.").red()))?;
    }
}

/// Read lines until an empty one, joined with newlines.
pub fn read_paragraph(term: &Term) -> io::Result<String> {
    let mut lines: Vec<String> = Vec::new();
    loop {
        let line = term.read_line()?;
        let line = line.trim_end();
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}
