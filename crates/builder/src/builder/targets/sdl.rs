//! Standalone SDL front-end.

use super::Target;
use crate::builder::command::Invocation;
use crate::builder::plan::{Plan, Step, StepKind};
use crate::builder::BuildConfig;

/// Standalone SDL target. Both directories are passed explicitly, so every
/// step runs from the invoking directory.
pub struct Sdl;

impl Target for Sdl {
    fn name(&self) -> &'static str {
        "sdl"
    }

    fn description(&self) -> &'static str {
        "standalone SDL executable"
    }

    fn plan(&self, config: &BuildConfig) -> Plan {
        let build_dir = &config.build_dir;

        let configure = Invocation::new(&config.cmake)
            .arg(format!("-B{}", build_dir.display()))
            .arg(format!("-H{}", config.source_dir.display()));

        let compile = Invocation::new(&config.msbuild)
            .arg(build_dir.join(&config.solution).display().to_string())
            .arg(config.configuration_property());

        Plan {
            target: self.name(),
            build_dir: build_dir.clone(),
            steps: vec![
                Step::new(StepKind::Configure, configure),
                Step::new(StepKind::Compile, compile),
            ],
        }
    }
}
