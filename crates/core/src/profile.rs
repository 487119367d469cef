//! Pilot Profile
//!
//! The pilot attributes collected by the first screen, and the strict JSON
//! contract of the profile completeness check.

use serde::{Deserialize, Serialize};

/// Separator header prepended to clarification answers when they are folded
/// into the experience field.
const CLARIFICATION_HEADER: &str = "\n\nCompléments: ";

/// Practice tags offered by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightType {
    Mountain,
    WinchPlain,
    CrossCountry,
    HikeAndFly,
    Soaring,
    Freestyle,
}

impl FlightType {
    /// All tags, in form display order.
    pub const ALL: [FlightType; 6] = [
        FlightType::Mountain,
        FlightType::WinchPlain,
        FlightType::CrossCountry,
        FlightType::HikeAndFly,
        FlightType::Soaring,
        FlightType::Freestyle,
    ];

    /// Display label, as shown on the form and embedded in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            FlightType::Mountain => "Montagne",
            FlightType::WinchPlain => "Plaine (Treuil)",
            FlightType::CrossCountry => "XC (Cross)",
            FlightType::HikeAndFly => "Hike & Fly",
            FlightType::Soaring => "Soaring",
            FlightType::Freestyle => "Freestyle",
        }
    }
}

impl std::fmt::Display for FlightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pilot profile collected by the first screen.
///
/// Read-only after collection except for the one controlled mutation:
/// [`PilotProfile::append_clarifications`], applied at most once before the
/// analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotProfile {
    /// Free-text experience description; clarification answers accumulate here
    pub experience: String,
    /// Current wing model, may be empty
    pub current_wing: String,
    /// Flight weight in kilograms (pilot + gear)
    pub ptv: u32,
    /// Practice tags, no duplicates
    pub flight_types: Vec<FlightType>,
    /// Free-text goals
    pub ambitions: String,
    #[serde(default, skip_serializing)]
    clarified: bool,
}

impl Default for PilotProfile {
    fn default() -> Self {
        Self {
            experience: String::new(),
            current_wing: String::new(),
            ptv: 80,
            flight_types: Vec::new(),
            ambitions: String::new(),
            clarified: false,
        }
    }
}

impl PilotProfile {
    /// Toggle a practice tag: adds it when absent, removes it when present.
    pub fn toggle_flight_type(&mut self, flight_type: FlightType) {
        if let Some(pos) = self.flight_types.iter().position(|t| *t == flight_type) {
            self.flight_types.remove(pos);
        } else {
            self.flight_types.push(flight_type);
        }
    }

    /// Comma-separated practice labels for prompt embedding.
    pub fn flight_types_label(&self) -> String {
        self.flight_types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Fold clarification answers into the experience field, once.
    ///
    /// Empty or whitespace-only answers are ignored. A second call is a
    /// no-op: the experience text accumulates clarifications at most once.
    pub fn append_clarifications(&mut self, answers: &str) {
        let answers = answers.trim();
        if answers.is_empty() || self.clarified {
            return;
        }
        self.experience.push_str(CLARIFICATION_HEADER);
        self.experience.push_str(answers);
        self.clarified = true;
    }
}

/// Strict JSON shape returned by the profile completeness check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompleteness {
    /// Whether the profile carries enough information for a reliable analysis
    pub is_complete: bool,
    /// Clarifying questions, at most three
    #[serde(default)]
    pub questions: Vec<String>,
}

impl ProfileCompleteness {
    /// The fail-open value: profile treated as complete, no questions.
    pub fn complete() -> Self {
        Self {
            is_complete: true,
            questions: Vec::new(),
        }
    }

    /// Whether the workflow should detour through the questions screen.
    pub fn needs_clarification(&self) -> bool {
        !self.is_complete && !self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ptv_is_80() {
        assert_eq!(PilotProfile::default().ptv, 80);
    }

    #[test]
    fn test_toggle_flight_type() {
        let mut profile = PilotProfile::default();
        profile.toggle_flight_type(FlightType::CrossCountry);
        profile.toggle_flight_type(FlightType::Soaring);
        assert_eq!(profile.flight_types.len(), 2);
        // toggling again removes, never duplicates
        profile.toggle_flight_type(FlightType::CrossCountry);
        assert_eq!(profile.flight_types, vec![FlightType::Soaring]);
    }

    #[test]
    fn test_flight_types_label() {
        let mut profile = PilotProfile::default();
        profile.toggle_flight_type(FlightType::CrossCountry);
        profile.toggle_flight_type(FlightType::HikeAndFly);
        assert_eq!(profile.flight_types_label(), "XC (Cross), Hike & Fly");
    }

    #[test]
    fn test_append_clarifications_once() {
        let mut profile = PilotProfile {
            experience: "150h de vol".to_string(),
            ..Default::default()
        };
        profile.append_clarifications("40h/an, SIV en 2023");
        assert_eq!(
            profile.experience,
            "150h de vol\n\nCompléments: 40h/an, SIV en 2023"
        );

        // second append is a no-op
        profile.append_clarifications("encore");
        assert_eq!(
            profile.experience,
            "150h de vol\n\nCompléments: 40h/an, SIV en 2023"
        );
    }

    #[test]
    fn test_append_blank_clarifications_ignored() {
        let mut profile = PilotProfile {
            experience: "100h".to_string(),
            ..Default::default()
        };
        profile.append_clarifications("   \n ");
        assert_eq!(profile.experience, "100h");
        // still eligible for a real append afterwards
        profile.append_clarifications("vol en plaine");
        assert!(profile.experience.ends_with("Compléments: vol en plaine"));
    }

    #[test]
    fn test_completeness_parsing() {
        let parsed: ProfileCompleteness =
            serde_json::from_str(r#"{"isComplete": false, "questions": ["Combien d'heures par an ?"]}"#)
                .unwrap();
        assert!(parsed.needs_clarification());

        let complete: ProfileCompleteness =
            serde_json::from_str(r#"{"isComplete": true}"#).unwrap();
        assert!(!complete.needs_clarification());
        assert!(complete.questions.is_empty());
    }
}
