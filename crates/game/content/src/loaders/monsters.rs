//! Monster catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::monsters::{MonsterCatalog, MonsterTemplate};

/// Monster catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MonsterCatalogRon {
    monsters: BTreeMap<String, MonsterTemplate>,
}

/// Loader for monster templates from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load a monster catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> LoadResult<MonsterCatalog> {
        let data: MonsterCatalogRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        for (key, template) in &data.monsters {
            if template.hp == 0 {
                anyhow::bail!("monster template '{}' has zero hp", key);
            }
        }

        Ok(data.monsters.into_iter().collect())
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> LoadResult<MonsterCatalog> {
        Self::from_ron_str(include_str!("../../data/monsters.ron"))
    }
}
