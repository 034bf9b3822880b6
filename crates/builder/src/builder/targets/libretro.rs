//! libretro core (RetroArch plugin).
//!
//! Configured from inside the build directory, then the built core is moved
//! into RetroArch's `cores/` directory.

use super::Target;
use crate::builder::command::Invocation;
use crate::builder::plan::{Plan, Step, StepKind};
use crate::builder::BuildConfig;
use std::path::{Component, Path, PathBuf};

/// libretro core target.
pub struct Libretro;

impl Target for Libretro {
    fn name(&self) -> &'static str {
        "libretro"
    }

    fn description(&self) -> &'static str {
        "libretro core, installed into RetroArch"
    }

    fn plan(&self, config: &BuildConfig) -> Plan {
        let build_dir = &config.build_dir;
        let source = source_from_build_dir(build_dir, &config.source_dir);

        let configure = Invocation::new(tool_from_build_dir(&config.cmake))
            .arg(source.display().to_string())
            .current_dir(build_dir);

        let compile = Invocation::new(tool_from_build_dir(&config.msbuild))
            .arg(config.solution.clone())
            .arg(config.configuration_property())
            .current_dir(build_dir);

        let install = move_file(&native(&config.artifact), &absolute(&config.install_path))
            .current_dir(build_dir);

        Plan {
            target: self.name(),
            build_dir: build_dir.clone(),
            steps: vec![
                Step::new(StepKind::Configure, configure),
                Step::new(StepKind::Compile, compile),
                Step::new(StepKind::Install, install),
            ],
        }
    }
}

/// Path of `source_dir` as seen from inside `build_dir`.
///
/// Falls back to an absolute path when `build_dir` is not a plain relative
/// path.
fn source_from_build_dir(build_dir: &Path, source_dir: &Path) -> PathBuf {
    if source_dir.is_absolute() {
        return source_dir.to_path_buf();
    }

    let mut depth = 0;
    for component in build_dir.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            _ => return absolute(source_dir),
        }
    }

    let mut rel: PathBuf = std::iter::repeat("..").take(depth).collect();
    rel.extend(
        source_dir
            .components()
            .filter(|c| !matches!(c, Component::CurDir)),
    );
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

/// Tool name as it must be spelled from inside the build directory.
///
/// Bare names are left for `PATH` lookup; anything with a separator is a
/// path relative to the invoking directory and is made absolute.
fn tool_from_build_dir(tool: &str) -> String {
    if Path::new(tool).components().count() > 1 {
        absolute(Path::new(tool)).display().to_string()
    } else {
        tool.to_string()
    }
}

/// `path` resolved against the invoking directory. Drive-letter paths are
/// kept verbatim on every host.
fn absolute(path: &Path) -> PathBuf {
    if has_drive_prefix(path) {
        return path.to_path_buf();
    }
    std::path::absolute(path).unwrap_or_else(|_| path.into())
}

fn has_drive_prefix(path: &Path) -> bool {
    let bytes = path.as_os_str().as_encoded_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes[2], b'\\' | b'/')
}

/// Rebuild `path` with the host's separator.
fn native(path: &Path) -> PathBuf {
    path.components().collect()
}

fn move_file(src: &Path, dst: &Path) -> Invocation {
    let src = src.display().to_string();
    let dst = dst.display().to_string();
    if cfg!(windows) {
        Invocation::new("cmd").args(["/C", "move", "/Y"]).args([src, dst])
    } else {
        Invocation::new("mv").args([src, dst])
    }
}
