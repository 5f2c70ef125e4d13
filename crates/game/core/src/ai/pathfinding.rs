//! 8-directional A* over the tile grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::engine::GameEngine;
use crate::env::MapOracle;
use crate::geometry::{chebyshev, in_bounds, neighbors};
use crate::state::{EntityId, GameState, Position};

/// Cost of a cardinal step.
pub const CARDINAL_COST: u32 = 100;
/// Cost of a diagonal step (1.41 scaled by 100).
pub const DIAGONAL_COST: u32 = 141;

/// Open-set entry. `seq` records insertion order so equal-cost ties pop
/// first-in first-out, keeping searches reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PathNode {
    f: u32,
    seq: u64,
    g: u32,
    position: Position,
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heuristic(from: Position, to: Position) -> u32 {
    chebyshev(from, to) * CARDINAL_COST
}

fn step_cost(from: Position, to: Position) -> u32 {
    if from.x != to.x && from.y != to.y {
        DIAGONAL_COST
    } else {
        CARDINAL_COST
    }
}

/// Shortest path from `start` to `goal` on `floor`, excluding `start`.
///
/// A cell is enterable if it is in bounds, walkable and free of living
/// actors; the goal is enterable even when occupied so a path can end on the
/// actor being approached. Returns an empty path when `start == goal` and
/// `None` when the goal cannot be reached.
pub fn astar<M: MapOracle + ?Sized>(
    map: &M,
    state: &GameState,
    floor: u32,
    start: Position,
    goal: Position,
) -> Option<Vec<Position>> {
    if start == goal {
        return Some(Vec::new());
    }

    let dimensions = map.dimensions();
    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<Position, u32> = HashMap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut closed: HashSet<Position> = HashSet::new();
    let mut seq = 0u64;

    best_g.insert(start, 0);
    open.push(PathNode {
        f: heuristic(start, goal),
        seq,
        g: 0,
        position: start,
    });

    while let Some(current) = open.pop() {
        if current.position == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        if !closed.insert(current.position) {
            continue;
        }

        for next in neighbors(current.position) {
            if closed.contains(&next) || !in_bounds(next, dimensions) {
                continue;
            }
            if !map.is_walkable(floor, next) {
                continue;
            }
            if next != goal && state.is_occupied(floor, next) {
                continue;
            }

            let g = current.g + step_cost(current.position, next);
            if best_g.get(&next).is_some_and(|&known| g >= known) {
                continue;
            }
            best_g.insert(next, g);
            came_from.insert(next, current.position);
            seq += 1;
            open.push(PathNode {
                f: g + heuristic(next, goal),
                seq,
                g,
                position: next,
            });
        }
    }

    None
}

fn reconstruct_path(
    came_from: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

impl GameEngine<'_> {
    /// Takes the first step of a path from `id` toward `goal`.
    ///
    /// Returns false, leaving the actor in place, when there is no path or
    /// the first step is occupied (the goal itself may be).
    pub fn move_toward(&mut self, id: EntityId, goal: Position) -> bool {
        let Some(actor) = self.state.actor(id).filter(|actor| actor.alive) else {
            return false;
        };
        let (floor, start) = (actor.floor, actor.position);

        let Some(path) = astar(self.env.map(), self.state, floor, start, goal) else {
            tracing::debug!(actor = %id, %start, %goal, "no path");
            return false;
        };
        let Some(&next) = path.first() else {
            return false;
        };
        if self.state.is_occupied(floor, next) {
            return false;
        }
        self.step_to(id, next)
    }

    /// Moves `id` onto `position` without pathing.
    pub(crate) fn step_to(&mut self, id: EntityId, position: Position) -> bool {
        match self.state.actor_mut(id) {
            Some(actor) => {
                actor.position = position;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridMap;
    use crate::state::{Actor, ActorKind};

    #[test]
    fn start_equals_goal_is_empty() {
        let map = GridMap::open(5, 5);
        let state = GameState::new();
        let here = Position::new(2, 2);
        assert_eq!(astar(&map, &state, 0, here, here), Some(Vec::new()));
    }

    #[test]
    fn diagonal_shortcut_on_open_grid() {
        let map = GridMap::open(10, 10);
        let state = GameState::new();
        let path = astar(&map, &state, 0, Position::new(1, 1), Position::new(6, 3))
            .expect("open grid");
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&Position::new(6, 3)));
    }

    #[test]
    fn walls_force_a_detour() {
        let map = GridMap::from_rows(&[
            "#######",
            "#..#..#",
            "#..#..#",
            "#.....#",
            "#######",
        ])
        .expect("valid grid");
        let state = GameState::new();
        let path = astar(&map, &state, 0, Position::new(1, 1), Position::new(5, 1))
            .expect("reachable under the wall");
        assert!(path.iter().all(|p| map.is_walkable(0, *p)));
        assert!(path.contains(&Position::new(3, 3)));
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let map = GridMap::from_rows(&[
            "#####",
            "#.#.#",
            "#####",
        ])
        .expect("valid grid");
        let state = GameState::new();
        assert_eq!(
            astar(&map, &state, 0, Position::new(1, 1), Position::new(3, 1)),
            None
        );
    }

    #[test]
    fn occupied_goal_is_still_enterable() {
        let map = GridMap::open(5, 1);
        let mut state = GameState::new();
        state.add_actor(
            Actor::new(EntityId(1), "Rat", ActorKind::Monster, Position::new(3, 0))
                .with_resources(5, 0, 0),
        );
        let path = astar(&map, &state, 0, Position::new(0, 0), Position::new(3, 0));
        assert_eq!(
            path,
            Some(vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)])
        );
    }

    #[test]
    fn living_actors_block_corridors() {
        let map = GridMap::open(5, 1);
        let mut state = GameState::new();
        state.add_actor(
            Actor::new(EntityId(1), "Rat", ActorKind::Monster, Position::new(2, 0))
                .with_resources(5, 0, 0),
        );
        assert_eq!(
            astar(&map, &state, 0, Position::new(0, 0), Position::new(4, 0)),
            None
        );
    }
}
