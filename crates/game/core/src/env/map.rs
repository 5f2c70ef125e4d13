use crate::state::Position;

/// Static map oracle exposing the immutable tile layout of every floor.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Tile at `position` on `floor`, or `None` outside the grid or for an unknown floor.
    fn tile(&self, floor: u32, position: Position) -> Option<TileKind>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    fn is_walkable(&self, floor: u32, position: Position) -> bool {
        self.tile(floor, position).is_some_and(TileKind::is_walkable)
    }

    /// Out-of-bounds cells block sight.
    fn is_opaque(&self, floor: u32, position: Position) -> bool {
        self.tile(floor, position).is_none_or(TileKind::is_opaque)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Canonical tile classes produced by dungeon generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    Door,
    StairsDown,
    StairsUp,
    Corridor,
    Water,
    Trap,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            TileKind::Floor
                | TileKind::Door
                | TileKind::StairsDown
                | TileKind::StairsUp
                | TileKind::Corridor
                | TileKind::Trap
        )
    }

    pub fn is_opaque(self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Door)
    }

    /// ASCII glyph used by [`GridMap::from_rows`].
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Door => '+',
            TileKind::StairsDown => '>',
            TileKind::StairsUp => '<',
            TileKind::Corridor => ',',
            TileKind::Water => '~',
            TileKind::Trap => '^',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Some(match glyph {
            '#' => TileKind::Wall,
            '.' => TileKind::Floor,
            '+' => TileKind::Door,
            '>' => TileKind::StairsDown,
            '<' => TileKind::StairsUp,
            ',' => TileKind::Corridor,
            '~' => TileKind::Water,
            '^' => TileKind::Trap,
            _ => return None,
        })
    }
}

/// Error produced when parsing an ASCII layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridParseError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile glyph '{glyph}' at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    #[error("floor has size {found:?}, expected {expected:?}")]
    SizeMismatch {
        expected: MapDimensions,
        found: MapDimensions,
    },
}

/// In-memory tile grid with one layer per floor. All floors share dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    dimensions: MapDimensions,
    floors: Vec<Vec<TileKind>>,
}

impl GridMap {
    /// A single floor of open floor tiles.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            floors: vec![vec![TileKind::Floor; (width * height) as usize]],
        }
    }

    /// Parses one floor from ASCII rows (see [`TileKind::glyph`]).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridParseError> {
        let (dimensions, tiles) = parse_rows(rows)?;
        Ok(Self {
            dimensions,
            floors: vec![tiles],
        })
    }

    /// Appends another floor parsed from ASCII rows, returning its index.
    pub fn push_floor<S: AsRef<str>>(&mut self, rows: &[S]) -> Result<u32, GridParseError> {
        let (dimensions, tiles) = parse_rows(rows)?;
        if dimensions != self.dimensions {
            return Err(GridParseError::SizeMismatch {
                expected: self.dimensions,
                found: dimensions,
            });
        }
        self.floors.push(tiles);
        Ok(self.floors.len() as u32 - 1)
    }

    pub fn floor_count(&self) -> u32 {
        self.floors.len() as u32
    }

    /// Overwrites one tile. Returns false when the cell or floor does not exist.
    pub fn set_tile(&mut self, floor: u32, position: Position, kind: TileKind) -> bool {
        let Some(index) = self.index(position) else {
            return false;
        };
        match self.floors.get_mut(floor as usize) {
            Some(tiles) => {
                tiles[index] = kind;
                true
            }
            None => false,
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<(MapDimensions, Vec<TileKind>), GridParseError> {
    let width = rows.first().ok_or(GridParseError::Empty)?.as_ref().chars().count();
    let mut tiles = Vec::with_capacity(width * rows.len());

    for (y, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let found = row.chars().count();
        if found != width {
            return Err(GridParseError::RaggedRow {
                row: y,
                expected: width,
                found,
            });
        }
        for (x, glyph) in row.chars().enumerate() {
            let kind =
                TileKind::from_glyph(glyph).ok_or(GridParseError::UnknownGlyph { glyph, x, y })?;
            tiles.push(kind);
        }
    }

    Ok((MapDimensions::new(width as u32, rows.len() as u32), tiles))
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, floor: u32, position: Position) -> Option<TileKind> {
        let index = self.index(position)?;
        self.floors.get(floor as usize).map(|tiles| tiles[index])
    }
}
