//! Map data loader.
//!
//! Maps are stored as ASCII rows per floor (see `TileKind::glyph`); every
//! floor of one map must share the same dimensions.

use std::path::Path;

use crawler_core::GridMap;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    floors: Vec<Vec<String>>,
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a multi-floor grid map from a RON file.
    pub fn load(path: &Path) -> LoadResult<GridMap> {
        let content = read_file(path)?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> LoadResult<GridMap> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let mut floors = data.floors.iter();
        let first = floors
            .next()
            .ok_or_else(|| anyhow::anyhow!("map defines no floors"))?;
        let mut map = GridMap::from_rows(first)
            .map_err(|e| anyhow::anyhow!("Invalid layout for floor 0: {}", e))?;

        for (index, rows) in floors.enumerate() {
            map.push_floor(rows)
                .map_err(|e| anyhow::anyhow!("Invalid layout for floor {}: {}", index + 1, e))?;
        }

        Ok(map)
    }
}
