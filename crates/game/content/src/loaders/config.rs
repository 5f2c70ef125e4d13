//! Game configuration loader.

use std::path::Path;

use crawler_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Sections and keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.ai.ranged_min_distance > config.ai.ranged_max_distance {
            anyhow::bail!(
                "ai.ranged_min_distance ({}) exceeds ai.ranged_max_distance ({})",
                config.ai.ranged_min_distance,
                config.ai.ranged_max_distance
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::from_toml_str(
            r#"
            [boss]
            telegraph_chance = 0
            "#,
        )
        .expect("valid config");

        assert_eq!(config.boss.telegraph_chance, 0);
        assert_eq!(config.boss.summon_template, "dragon_whelp");
        assert_eq!(config.ai, crawler_core::AiConfig::default());
    }

    #[test]
    fn inverted_ranged_band_is_rejected() {
        let err = ConfigLoader::from_toml_str(
            r#"
            [ai]
            ranged_min_distance = 7
            ranged_max_distance = 2
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ranged_min_distance"));
    }

    #[test]
    fn malformed_toml_reports_a_parse_error() {
        let err = ConfigLoader::from_toml_str("[combat\n").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config TOML"));
    }
}
