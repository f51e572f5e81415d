//! Content factory for loading combat data from a data directory.

use std::path::{Path, PathBuf};

use fight_core::CombatConfig;

use crate::loaders::{ConfigLoader, InputScript, LoadResult, ScriptLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// └── scripts/
///     └── demo.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat configuration from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("combat.toml"))
    }

    /// Load an input script from `scripts/{name}.ron`.
    pub fn load_script(&self, name: &str) -> LoadResult<InputScript> {
        let path = self.data_dir.join("scripts").join(format!("{}.ron", name));
        ScriptLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
