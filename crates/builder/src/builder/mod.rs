//! Build orchestration for the Knowboy front-ends.
//!
//! Structure:
//! - `targets/` - libretro and SDL step sequences, plus the registry
//! - `plan` - ordered steps and their best-effort execution
//! - `command` - external invocations and the runner seam
//! - `report` - per-step results and exit status policy
//! - `workspace` - build directory ensure/status/clean
//! - `doctor` - host toolchain checks

pub mod command;
pub mod doctor;
pub mod plan;
pub mod report;
pub mod targets;
pub mod workspace;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use command::CommandRunner;
use report::BuildReport;
use std::path::PathBuf;
use targets::{registry, Target};

const DEFAULT_INSTALL_PATH: &str = r"C:\RetroArch-Win64\cores\knowboy_libretro.dll";

/// Build commands for the CLI.
#[derive(Subcommand)]
pub enum BuildCommands {
    /// Configure, compile and install the libretro core into RetroArch
    Libretro,
    /// Configure and compile the standalone SDL front-end
    Sdl,
    /// Build every target in order
    All,
    /// Print the steps a target would run, without running them
    Plan {
        /// Target name (libretro, sdl)
        target: String,
    },
    /// Show build directory and artifact status
    Status,
    /// Remove the build directory
    Clean,
    /// Check that cmake and msbuild are available
    Doctor,
}

/// Paths and tools used by every target.
///
/// Defaults build from the current directory into `build/` in `Release`.
#[derive(Args, Clone, Debug)]
pub struct BuildConfig {
    /// Build directory, relative to the invoking directory
    #[arg(long, env = "KNOWBOY_BUILD_DIR", default_value = "build", global = true)]
    pub build_dir: PathBuf,

    /// Directory holding the front-end's CMakeLists.txt
    #[arg(long, env = "KNOWBOY_SOURCE_DIR", default_value = ".", global = true)]
    pub source_dir: PathBuf,

    /// Build configuration passed to msbuild
    #[arg(long, env = "KNOWBOY_CONFIGURATION", default_value = "Release", global = true)]
    pub configuration: String,

    /// Solution file generated by cmake
    #[arg(long, env = "KNOWBOY_SOLUTION", default_value = "Knowboy.sln", global = true)]
    pub solution: String,

    /// Project configuration tool
    #[arg(long, env = "KNOWBOY_CMAKE", default_value = "cmake", global = true)]
    pub cmake: String,

    /// Compilation tool
    #[arg(long, env = "KNOWBOY_MSBUILD", default_value = "msbuild", global = true)]
    pub msbuild: String,

    /// libretro core, relative to the build directory
    #[arg(
        long,
        env = "KNOWBOY_ARTIFACT",
        default_value = "bin/Release/knowboy_libretro.dll",
        global = true
    )]
    pub artifact: PathBuf,

    /// Where the libretro core is moved after a build
    #[arg(long, env = "KNOWBOY_INSTALL_PATH", default_value = DEFAULT_INSTALL_PATH, global = true)]
    pub install_path: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            source_dir: PathBuf::from("."),
            configuration: "Release".to_string(),
            solution: "Knowboy.sln".to_string(),
            cmake: "cmake".to_string(),
            msbuild: "msbuild".to_string(),
            artifact: PathBuf::from("bin/Release/knowboy_libretro.dll"),
            install_path: PathBuf::from(DEFAULT_INSTALL_PATH),
        }
    }
}

impl BuildConfig {
    /// msbuild property selecting the build configuration.
    pub fn configuration_property(&self) -> String {
        format!("/p:Configuration={}", self.configuration)
    }
}

/// Run each target's plan in turn. Step failures are recorded in the
/// returned reports; only build directory failures abort.
pub fn build(
    targets: &[&dyn Target],
    config: &BuildConfig,
    runner: &dyn CommandRunner,
) -> Result<Vec<BuildReport>> {
    let mut reports = Vec::with_capacity(targets.len());

    for target in targets {
        log::info!("=== Building {} ({}) ===", target.name(), target.description());

        let report = target.plan(config).execute(runner)?;
        if report.succeeded() {
            log::info!("{}", report.summary());
        } else {
            log::warn!("{}", report.summary());
        }
        reports.push(report);
    }

    Ok(reports)
}

/// Build every registered target.
pub fn build_all(config: &BuildConfig, runner: &dyn CommandRunner) -> Result<Vec<BuildReport>> {
    build(registry::TARGETS, config, runner)
}

/// Print a target's plan.
pub fn show_plan(name: &str, config: &BuildConfig) -> Result<()> {
    let target = registry::get(name).ok_or_else(|| {
        anyhow!(
            "Unknown target: {name} (known: {})",
            registry::names().collect::<Vec<_>>().join(", ")
        )
    })?;
    print!("{}", target.plan(config));
    Ok(())
}
