//! Step sequences and their best-effort execution.

use super::command::{CommandRunner, Invocation};
use super::report::{BuildReport, StepRecord};
use super::workspace;
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

/// What a step contributes to the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Configure,
    Compile,
    Install,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Configure => "configure",
            StepKind::Compile => "compile",
            StepKind::Install => "install",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub invocation: Invocation,
}

impl Step {
    pub fn new(kind: StepKind, invocation: Invocation) -> Self {
        Self { kind, invocation }
    }
}

/// Fixed, ordered steps for one target.
#[derive(Clone, Debug)]
pub struct Plan {
    pub target: &'static str,
    pub build_dir: PathBuf,
    pub steps: Vec<Step>,
}

impl Plan {
    /// Ensure the build directory, then run every step in order.
    ///
    /// A failing step is printed to stderr and recorded, and the next step
    /// runs anyway. Only a failure to create the build directory is returned as an error.
    pub fn execute(&self, runner: &dyn CommandRunner) -> Result<BuildReport> {
        workspace::ensure_build_directory(&self.build_dir)?;

        let mut report = BuildReport::new(self.target);
        for step in &self.steps {
            log::info!("[step] {}: {}", step.kind, step.invocation);

            let started = Instant::now();
            let result = runner.run(&step.invocation);
            let elapsed = started.elapsed();

            if let Err(e) = &result {
                eprintln!("Error occurred while executing: {}", step.invocation);
                eprintln!("Error details: {e:#}");
            }
            report.push(StepRecord::new(step, result.err(), elapsed));
        }

        Ok(report)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (build dir: {})", self.target, self.build_dir.display())?;
        for (i, step) in self.steps.iter().enumerate() {
            write!(f, "  {}. {:9} {}", i + 1, step.kind, step.invocation)?;
            if let Some(cwd) = step.invocation.cwd() {
                write!(f, "  (in {})", cwd.display())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;

    /// Records every invocation and fails the ones whose program is listed.
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<Invocation>>,
        failing: Vec<String>,
        fail_all: bool,
    }

    impl RecordingRunner {
        pub fn failing(programs: &[&str]) -> Self {
            Self {
                failing: programs.iter().map(ToString::to_string).collect(),
                ..Self::default()
            }
        }

        pub fn failing_all() -> Self {
            Self {
                fail_all: true,
                ..Self::default()
            }
        }

        pub fn programs(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(|inv| inv.program().to_string())
                .collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, inv: &Invocation) -> Result<()> {
            self.calls.borrow_mut().push(inv.clone());
            if self.fail_all || self.failing.iter().any(|p| p == inv.program()) {
                bail!("Command failed with status exit status: 1");
            }
            Ok(())
        }
    }
}
