//! Target registry - single source of truth for all buildable targets.

use super::{Libretro, Sdl, Target};

/// All registered targets.
///
/// Order matters for `build_all`.
pub static TARGETS: &[&dyn Target] = &[&Libretro, &Sdl];

/// Get target by name.
#[must_use]
pub fn get(name: &str) -> Option<&'static dyn Target> {
    TARGETS.iter().find(|t| t.name() == name).copied()
}

/// List all target names.
pub fn names() -> impl Iterator<Item = &'static str> {
    TARGETS.iter().map(|t| t.name())
}
