//! Integer grid metrics and neighbour enumeration.
//!
//! All functions are pure and operate on [`Position`]s of a single floor.

use crate::env::MapDimensions;
use crate::state::Position;

/// Compass offsets in N, NE, E, SE, S, SW, W, NW order.
pub const COMPASS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Cardinal offsets in N, E, S, W order.
pub const CARDINAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

pub fn manhattan(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub fn euclidean(a: Position, b: Position) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

/// `max(|dx|, |dy|)`: the number of king moves between two cells.
pub fn chebyshev(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

/// All eight neighbours in compass order. Bounds are not checked.
pub fn neighbors(pos: Position) -> [Position; 8] {
    COMPASS.map(|(dx, dy)| pos.offset(dx, dy))
}

pub fn cardinal_neighbors(pos: Position) -> [Position; 4] {
    CARDINAL.map(|(dx, dy)| pos.offset(dx, dy))
}

pub fn in_bounds(pos: Position, dimensions: MapDimensions) -> bool {
    dimensions.contains(pos)
}

/// Unit step (per axis sign) that moves `from` toward `to`.
pub fn step_toward(from: Position, to: Position) -> (i32, i32) {
    ((to.x - from.x).signum(), (to.y - from.y).signum())
}

/// Unit step (per axis sign) that moves `from` away from `threat`.
pub fn step_away(from: Position, threat: Position) -> (i32, i32) {
    ((from.x - threat.x).signum(), (from.y - threat.y).signum())
}
