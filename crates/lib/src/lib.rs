//! cpbuild-lib: configuration, targets and the build engine for cpbuild.
//!
//! - `config`: flag, environment, dotfile and VERSION resolution into a `BuildConfig`
//! - `target`: build artifacts and the recipes that produce them
//! - `graph`: the target registry and its dependency edges
//! - `build`: depth-first building with existence-based skipping
//! - `toolchain`: compiler and archiver invocation
//! - `project`: the graph for the cp project layout

pub mod build;
pub mod config;
pub mod consts;
pub mod graph;
pub mod platform;
pub mod project;
pub mod target;
pub mod toolchain;
pub mod util;
