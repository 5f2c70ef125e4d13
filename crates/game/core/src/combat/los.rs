//! Bresenham rasterisation and line-of-sight.

use crate::env::MapOracle;
use crate::state::Position;

/// Every cell on the Bresenham line from `from` to `to`, both ends included.
pub fn bresenham_line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut points = Vec::with_capacity(dx.max(dy) as usize + 1);
    let mut err = dx - dy;
    let mut current = from;

    loop {
        points.push(current);
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            current.x += sx;
        }
        if e2 < dx {
            err += dx;
            current.y += sy;
        }
    }
    points
}

/// True when no interior cell of the line is opaque or off the map.
///
/// The endpoints are never checked: actors standing in doorways can still see
/// and be seen.
pub fn has_line_of_sight<M>(map: &M, floor: u32, from: Position, to: Position) -> bool
where
    M: MapOracle + ?Sized,
{
    let line = bresenham_line(from, to);
    let interior = line.len().saturating_sub(1);
    line.iter()
        .take(interior)
        .skip(1)
        .all(|&cell| !map.is_opaque(floor, cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridMap;

    #[test]
    fn line_includes_both_ends() {
        let line = bresenham_line(Position::new(0, 0), Position::new(3, 1));
        assert_eq!(line.first(), Some(&Position::new(0, 0)));
        assert_eq!(line.last(), Some(&Position::new(3, 1)));
        assert_eq!(line.len(), 4);
        assert_eq!(bresenham_line(Position::new(2, 2), Position::new(2, 2)).len(), 1);
    }

    #[test]
    fn wall_between_blocks_sight() {
        let map = GridMap::from_rows(&[".....", "..#..", "....."]).unwrap();
        assert!(!has_line_of_sight(&map, 0, Position::new(0, 1), Position::new(4, 1)));
        assert!(has_line_of_sight(&map, 0, Position::new(0, 0), Position::new(4, 0)));
    }

    #[test]
    fn endpoints_are_not_checked() {
        let map = GridMap::from_rows(&["#.#"]).unwrap();
        assert!(has_line_of_sight(&map, 0, Position::new(0, 0), Position::new(2, 0)));
        assert!(has_line_of_sight(&map, 0, Position::new(0, 0), Position::new(1, 0)));
    }

    #[test]
    fn closed_door_is_opaque() {
        let map = GridMap::from_rows(&[".+."]).unwrap();
        assert!(!has_line_of_sight(&map, 0, Position::new(0, 0), Position::new(2, 0)));
    }
}
