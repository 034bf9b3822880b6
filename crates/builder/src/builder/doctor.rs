//! Host toolchain checks.

use super::BuildConfig;
use anyhow::{bail, Result};

/// Check that the configure and compile tools resolve on `PATH`.
pub fn run(config: &BuildConfig) -> Result<()> {
    let mut ok = true;

    for tool in required_tools(config) {
        match which::which(tool) {
            Ok(path) => eprintln!("[OK] {tool} ({})", path.display()),
            Err(_) => {
                eprintln!("[FAIL] missing `{tool}` in PATH");
                ok = false;
            }
        }
    }

    if config.source_dir.join("CMakeLists.txt").is_file() {
        eprintln!("[OK] {}", config.source_dir.join("CMakeLists.txt").display());
    } else {
        eprintln!(
            "[FAIL] no CMakeLists.txt in {}",
            config.source_dir.display()
        );
        ok = false;
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(())
}

fn required_tools(config: &BuildConfig) -> [&str; 2] {
    [config.cmake.as_str(), config.msbuild.as_str()]
}
