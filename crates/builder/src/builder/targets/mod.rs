//! Buildable front-end targets.
//!
//! Each target turns a [`BuildConfig`] into a fixed [`Plan`].

pub mod libretro;
pub mod registry;
pub mod sdl;

use super::plan::Plan;
use super::BuildConfig;

pub use libretro::Libretro;
pub use sdl::Sdl;

/// A front-end that can be configured and compiled.
pub trait Target: Sync {
    /// Short name used on the command line.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// The steps this target runs, in order.
    fn plan(&self, config: &BuildConfig) -> Plan;
}
