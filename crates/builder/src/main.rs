//! # Knowboy Builder
//!
//! Configure, compile and install the Knowboy emulator front-ends.
//!
//! ## Usage
//!
//! ```bash
//! builder libretro         # cmake + msbuild, then move the core into RetroArch
//! builder sdl              # cmake + msbuild for the standalone front-end
//! builder all              # Both, in order
//! builder plan libretro    # Show the steps without running them
//! builder status           # Show build directory and artifact status
//! builder clean            # Remove the build directory
//! builder doctor           # Check cmake/msbuild are installed
//! ```
//!
//! A failing cmake or msbuild step is logged and the next step still runs.
//! The exit status stays successful unless `--strict` is given.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod builder;

use builder::command::SystemRunner;
use builder::report;
use builder::targets::{Libretro, Sdl};

#[derive(Parser)]
#[command(name = "builder", about = "Knowboy front-end build orchestrator")]
struct Cli {
    #[command(subcommand)]
    command: builder::BuildCommands,

    #[command(flatten)]
    config: builder::BuildConfig,

    /// Exit with a failure status when any build step fails
    #[arg(long, global = true)]
    strict: bool,

    /// Print the build report as JSON on stdout
    #[arg(long, global = true)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = &cli.config;

    let reports = match cli.command {
        builder::BuildCommands::Libretro => builder::build(&[&Libretro], config, &SystemRunner)?,
        builder::BuildCommands::Sdl => builder::build(&[&Sdl], config, &SystemRunner)?,
        builder::BuildCommands::All => builder::build_all(config, &SystemRunner)?,
        builder::BuildCommands::Plan { target } => {
            builder::show_plan(&target, config)?;
            return Ok(ExitCode::SUCCESS);
        }
        builder::BuildCommands::Status => {
            builder::workspace::status(config)?;
            return Ok(ExitCode::SUCCESS);
        }
        builder::BuildCommands::Clean => {
            builder::workspace::clean(&config.build_dir)?;
            return Ok(ExitCode::SUCCESS);
        }
        builder::BuildCommands::Doctor => {
            builder::doctor::run(config)?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    if cli.json {
        println!("{}", report::to_json(&reports)?);
    }

    Ok(report::exit_code(&reports, cli.strict))
}
