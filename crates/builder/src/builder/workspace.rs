//! Build directory management (ensure, status, clean).

#![allow(clippy::cast_precision_loss)] // Directory sizes don't need u64 precision for display

use super::BuildConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Create `path` (and any missing parents) if nothing exists there yet.
///
/// Anything already at `path` is left alone, even if it is not a directory.
/// Creation failures are returned to the caller; they are the one failure
/// that stops a build.
pub fn ensure_build_directory(path: &Path) -> Result<()> {
    if path.exists() {
        log::debug!("{} already exists", path.display());
        return Ok(());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Creating build directory {}", path.display()))?;
    log::info!("Created {}", path.display());
    Ok(())
}

/// Show the state of the build directory and the libretro artifact.
pub fn status(config: &BuildConfig) -> Result<()> {
    println!("Build Status:\n");

    let build_dir = &config.build_dir;
    if build_dir.is_dir() {
        let size = dir_size(build_dir)?;
        println!(
            "  {:12} [present] {} ({:.1} MB)",
            "build dir",
            build_dir.display(),
            size as f64 / 1_000_000.0
        );
    } else {
        println!("  {:12} [missing] {}", "build dir", build_dir.display());
    }

    let artifact = build_dir.join(&config.artifact);
    let state = if artifact.is_file() { "built" } else { "missing" };
    println!("  {:12} [{state}] {}", "artifact", artifact.display());

    let state = if config.install_path.is_file() {
        "installed"
    } else {
        "missing"
    };
    println!("  {:12} [{state}] {}", "installed", config.install_path.display());

    Ok(())
}

/// Remove the build directory and everything in it.
pub fn clean(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).with_context(|| format!("Removing {}", path.display()))?;
        println!("Cleaned: {}", path.display());
    } else {
        println!("{} not present", path.display());
    }
    Ok(())
}

/// Total size in bytes of the regular files under `path`.
fn dir_size(path: &Path) -> Result<u64> {
    let mut total = 0;
    for entry in fs::read_dir(path).with_context(|| format!("Reading {}", path.display()))? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if meta.is_dir() {
            total += dir_size(&entry.path())?;
        } else {
            total += meta.len();
        }
    }
    Ok(total)
}
