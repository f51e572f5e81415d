//! Combat configuration loader.

use std::path::Path;

use fight_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a combat configuration from a TOML file.
    ///
    /// Sections and fields that are left out keep their default values, so an
    /// empty file yields [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate a combat configuration from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use fight_core::ConfigError;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[round]\nround_seconds = 99\n\n[hit]\nchip_ratio = 0.25"
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.round.round_seconds, 99);
        assert_eq!(config.round.rounds_to_win, 2);
        assert_eq!(config.hit.chip_ratio, 0.25);
        assert_eq!(config.stage, CombatConfig::default().stage);
    }

    #[test]
    fn empty_file_is_the_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(
            ConfigLoader::load(file.path()).unwrap(),
            CombatConfig::default()
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[round]\nrounds_to_win = 0").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ZeroRoundsToWin)
        );
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = ConfigLoader::parse("[round\nrounds_to_win = ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn shipped_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/combat.toml");
        assert_eq!(ConfigLoader::load(&path).unwrap(), CombatConfig::default());
    }
}
