//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use crawler_core::{GameConfig, GridMap};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader, MonsterLoader};
use crate::monsters::MonsterCatalog;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── monsters.ron
/// └── maps/
///     └── dragon_lair.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load game configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the monster catalog from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<MonsterCatalog> {
        let path = self.data_dir.join("monsters.ron");
        MonsterLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `map_name` - Name of the map file (without `.ron` extension)
    pub fn load_map(&self, map_name: &str) -> LoadResult<GridMap> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().expect("defaults"), GameConfig::default());
    }

    #[test]
    fn missing_map_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ContentFactory::new(dir.path())
            .load_map("nowhere")
            .unwrap_err();
        assert!(err.to_string().contains("nowhere.ron"));
    }
}
