//! Report rendering for terminals and machine consumers.

use chrono::{DateTime, Utc};
use deconflict_core::{DetectionSettings, Point, Report, ReportSummary, Status};
use serde::Serialize;
use std::fmt::Write;

/// How to print a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Numbered, human-readable conflict list
    #[default]
    Text,
    /// Rounded report summary as pretty JSON
    Json,
}

impl OutputFormat {
    /// Whether interactive prompts must stay off stdout so the report
    /// on stdout remains parseable.
    pub fn prompts_on_stderr(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// JSON document written for `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a, P> {
    pub generated_at: DateTime<Utc>,
    pub dimensions: usize,
    pub aircraft: usize,
    pub settings: &'a DetectionSettings,
    #[serde(flatten)]
    pub report: ReportSummary<P>,
}

fn format_coords(coords: &[f64]) -> String {
    let parts: Vec<String> = coords.iter().map(|v| format!("{v:.2}")).collect();
    format!("({})", parts.join(", "))
}

/// Plain-text rendering of a report.
pub fn render_text<P: Point>(report: &Report<P>) -> String {
    let mut out = String::from("--- RESULT ---\n");
    let summary = report.summary();
    if summary.status == Status::Clear {
        out.push_str("NO CONFLICT - ALL PATHS SAFE\n");
        return out;
    }

    let _ = writeln!(out, "{} CONFLICT(S) DETECTED\n", summary.conflicts.len());
    for (idx, conflict) in summary.conflicts.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. Time: {:.2} | Location: {} | Distance: {:.2} m | Between: {} <-> {}",
            idx + 1,
            conflict.time,
            format_coords(&conflict.location.coords()),
            conflict.distance,
            conflict.between.0,
            conflict.between.1
        );
    }

    let pairs = report.conflicting_pairs();
    let _ = writeln!(out, "\n{} conflicting pair(s)", pairs.len());
    if let Some(closest) = report.closest() {
        let _ = writeln!(
            out,
            "Closest approach: {:.2} m at t={:.2}s ({} <-> {})",
            closest.distance_m(),
            closest.time_s(),
            closest.drone1_id(),
            closest.drone2_id()
        );
    }
    out
}

/// Pretty JSON rendering with run metadata.
pub fn render_json<P: Point + Serialize>(
    report: &Report<P>,
    settings: &DetectionSettings,
    aircraft: usize,
) -> Result<String, serde_json::Error> {
    let document = JsonReport {
        generated_at: Utc::now(),
        dimensions: P::DIMENSIONS,
        aircraft,
        settings,
        report: report.summary(),
    };
    serde_json::to_string_pretty(&document)
}
