//! Wing Analyst Core
//!
//! Foundational types for the Wing Analyst workspace: the pilot data model,
//! the workflow state machine, the analysis response parser and the radar
//! chart model. This crate has no knowledge of HTTP, the Gemini API or the
//! terminal front end.
//!
//! ## Module Organization
//!
//! - `error` - Error taxonomy (`AiError`, `CoreError`, `CoreResult`)
//! - `profile` - Pilot profile and completeness-check contract
//! - `wings` - Wing selection (ordered, deduplicated)
//! - `analysis` - Analysis result and grounding sources
//! - `parser` - Structured-data block extraction from raw responses
//! - `chart` - Radar chart dataset, geometry and SVG rendering
//! - `chat` - Append-only follow-up conversation history
//! - `report` - Editable report view with sentinel-marker substitution
//! - `workflow` - The five-step workflow controller
//!
//! ## Design Principles
//!
//! 1. **Dependency-light** - serde/thiserror/tracing only, keeps build times minimal
//! 2. **Synchronous state machine** - async orchestration lives in the application
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod analysis;
pub mod chart;
pub mod chat;
pub mod error;
pub mod parser;
pub mod profile;
pub mod report;
pub mod wings;
pub mod workflow;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{AiError, CoreError, CoreResult};

// ── Data Model ─────────────────────────────────────────────────────────
pub use analysis::{AnalysisResult, GroundingSource};
pub use chart::{RadarData, RadarMetrics};
pub use chat::{ChatHistory, ChatMessage, ChatRole};
pub use profile::{FlightType, PilotProfile, ProfileCompleteness};
pub use wings::WingSelection;

// ── Workflow ───────────────────────────────────────────────────────────
pub use report::ReportView;
pub use workflow::{Step, Workflow};
