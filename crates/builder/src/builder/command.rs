//! External command invocation.
//!
//! Every external tool (cmake, msbuild, the platform move command) is run
//! through a [`CommandRunner`] so the step sequence can be exercised without
//! the real toolchain installed.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A single external program invocation: program, argument tokens, and the
/// directory it runs in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the program from `dir` instead of the orchestrator's own working
    /// directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Build the `std::process::Command` for this invocation.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.get_args());
        if let Some(dir) = self.cwd() {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(token: &str) -> String {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        format!("\"{token}\"")
    } else {
        token.to_string()
    }
}

/// Executes invocations, blocking until each one finishes.
pub trait CommandRunner {
    /// Run `inv` to completion. `Ok` only when the program exited successfully.
    fn run(&self, inv: &Invocation) -> Result<()>;
}

/// Runs invocations as real child processes.
///
/// Child stdout is sent to stderr; stdout carries only the build report.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, inv: &Invocation) -> Result<()> {
        let status = inv
            .to_command()
            .stdout(Stdio::from(io::stderr()))
            .status()
            .with_context(|| format!("Spawning {}", inv.program()))?;

        if !status.success() {
            bail!("Command failed with status {status}");
        }
        Ok(())
    }
}
