//! Positional helpers for monster behaviours.

use crate::env::MapOracle;
use crate::geometry::{chebyshev, in_bounds, neighbors, step_away};
use crate::state::{Actor, GameState, Position};

fn is_free<M: MapOracle + ?Sized>(map: &M, state: &GameState, floor: u32, cell: Position) -> bool {
    in_bounds(cell, map.dimensions())
        && map.is_walkable(floor, cell)
        && !state.is_occupied(floor, cell)
}

/// Tile adjacent to `target` farthest from `mover`, approximating "behind".
///
/// Candidates must be walkable and unoccupied, except by the mover itself.
/// Ties keep the first candidate in compass order.
pub fn find_flank_position<M: MapOracle + ?Sized>(
    map: &M,
    state: &GameState,
    mover: &Actor,
    target: &Actor,
) -> Option<Position> {
    let floor = mover.floor;
    let mut best: Option<(u32, Position)> = None;
    for cell in neighbors(target.position) {
        if !in_bounds(cell, map.dimensions()) || !map.is_walkable(floor, cell) {
            continue;
        }
        if state
            .actor_at(floor, cell)
            .is_some_and(|occupant| occupant.id != mover.id)
        {
            continue;
        }
        let score = chebyshev(cell, mover.position);
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

/// One step directly away from `threat`: the diagonal first, then each axis.
pub fn find_retreat_position<M: MapOracle + ?Sized>(
    map: &M,
    state: &GameState,
    mover: &Actor,
    threat: Position,
) -> Option<Position> {
    let (dx, dy) = step_away(mover.position, threat);
    [(dx, dy), (dx, 0), (0, dy)]
        .into_iter()
        .filter(|&offset| offset != (0, 0))
        .map(|(x, y)| mover.position.offset(x, y))
        .find(|&cell| is_free(map, state, mover.floor, cell))
}
