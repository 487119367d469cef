//! Profile Screen
//!
//! Collects the pilot profile: experience, current wing, flight weight,
//! practice tags and ambitions.

use std::io;

use console::{style, Term};

use wing_analyst_core::{FlightType, PilotProfile};

pub fn collect(term: &Term) -> io::Result<PilotProfile> {
    super::heading(term, "Ton profil de pilote")?;
    term.write_line("")?;

    let mut profile = PilotProfile::default();
    profile.experience = super::required_line(
        term,
        "Ton expérience (heures de vol, stages, SIV, progression...)",
    )?;
    term.write_line("")?;
    profile.current_wing = super::prompt_line(term, "Ta voile actuelle (modèle et taille)", "")?;
    term.write_line("")?;
    profile.ptv = prompt_ptv(term, profile.ptv)?;
    term.write_line("")?;
    collect_flight_types(term, &mut profile)?;
    term.write_line("")?;
    profile.ambitions =
        super::required_line(term, "Tes ambitions (progression, cross, compétition...)")?;
    Ok(profile)
}

fn prompt_ptv(term: &Term, default: u32) -> io::Result<u32> {
    loop {
        let input = super::prompt_line(term, "Ton PTV en kg (pilote + sellette + voile)", &default.to_string())?;
        match input.parse::<u32>() {
            Ok(ptv) if ptv > 0 => return Ok(ptv),
            _ => term.write_line(&format!(
                "{}",
                style("Entre un poids en kilogrammes, par exemple 95.").red()
            ))?,
        }
    }
}

/// Numbered toggle list; the pilot types indices to flip tags and validates
/// with an empty line.
fn collect_flight_types(term: &Term, profile: &mut PilotProfile) -> io::Result<()> {
    term.write_line(&format!(
        "{}",
        style("Tes pratiques (tape les numéros pour cocher/décocher, entrée pour valider) :").bold()
    ))?;
    loop {
        for (index, flight_type) in FlightType::ALL.iter().enumerate() {
            let mark = if profile.flight_types.contains(flight_type) {
                style("[x]").green()
            } else {
                style("[ ]").dim()
            };
            term.write_line(&format!("  {}. {mark} {flight_type}", index + 1))?;
        }
        let input = term.read_line()?;
        if input.trim().is_empty() {
            return Ok(());
        }
        for token in input.split_whitespace() {
            match token.parse::<usize>() {
                Ok(n) if (1..=FlightType::ALL.len()).contains(&n) => {
                    profile.toggle_flight_type(FlightType::ALL[n - 1]);
                }
                _ => term.write_line(&format!(
                    "{}",
                    style(format!("Numéro invalide : {token}")).red()
                ))?,
            }
        }
    }
}
