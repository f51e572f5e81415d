//! Content loaders for reading combat data from files.
//!
//! This module provides loaders that convert TOML/RON files into fight-core
//! types ready to hand to a [`fight_core::Match`].

pub mod config;
pub mod factory;
pub mod script;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use script::{InputScript, ScriptLoader, ScriptSegment};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
