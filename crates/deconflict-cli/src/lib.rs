//! Deconfliction CLI - I/O around the deconfliction core.
//!
//! This crate provides the pieces the `deconflict` binary is built from:
//! - config: environment and flag layering into detection settings
//! - input: fleet file loading and validation
//! - interactive: prompt-driven fleet entry
//! - output: text and JSON report rendering
//! - scenarios: canned fleets

pub mod config;
pub mod input;
pub mod interactive;
pub mod output;
pub mod scenarios;

pub use config::{log_filter, Config, Dimensions};
pub use input::{load_fleet, FleetFile, InputError};
pub use interactive::{Prompter, Session};
pub use output::{render_json, render_text, OutputFormat};
pub use scenarios::{Scenario, ScenarioKind};
