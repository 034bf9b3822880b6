//! Per-step results of a build run.

use super::plan::{Step, StepKind};
use anyhow::{Context, Result};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Clone, Debug, Serialize)]
pub struct StepRecord {
    pub kind: StepKind,
    pub command: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u128,
}

impl StepRecord {
    pub fn new(step: &Step, error: Option<anyhow::Error>, elapsed: Duration) -> Self {
        Self {
            kind: step.kind,
            command: step.invocation.to_string(),
            success: error.is_none(),
            error: error.map(|e| format!("{e:#}")),
            elapsed_ms: elapsed.as_millis(),
        }
    }
}

/// Outcome of running one target's plan.
#[derive(Clone, Debug, Serialize)]
pub struct BuildReport {
    pub target: &'static str,
    pub started_at: String,
    steps: Vec<StepRecord>,
}

impl BuildReport {
    pub fn new(target: &'static str) -> Self {
        Self {
            target,
            started_at: chrono::Local::now().to_rfc3339(),
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|r| !r.success)
    }

    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(|r| r.success)
    }

    /// One-line summary, e.g. `libretro: 2/3 steps succeeded (failed: install)`.
    pub fn summary(&self) -> String {
        let ok = self.steps().iter().filter(|r| r.success).count();
        let mut line = format!("{}: {ok}/{} steps succeeded", self.target, self.steps().len());

        let failed: Vec<_> = self.failures().map(|r| r.kind.as_str()).collect();
        if !failed.is_empty() {
            line.push_str(&format!(" (failed: {})", failed.join(", ")));
        }
        line
    }
}

/// Process exit status for a set of reports.
///
/// Step failures never change the status unless `strict` is set.
pub fn exit_code(reports: &[BuildReport], strict: bool) -> ExitCode {
    if strict && !reports.iter().all(BuildReport::succeeded) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

pub fn to_json(reports: &[BuildReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("Serializing build report")
}
