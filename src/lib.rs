//! Wing Analyst Application
//!
//! Terminal front end for the wing advisor: drives the workflow controller
//! through the five screens, issues the AI calls and exports the final
//! report.

pub mod app;
pub mod export;
pub mod screens;
