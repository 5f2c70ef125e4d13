//! Monster decision making.
//!
//! Every monster turn runs the same gate sequence before its behaviour:
//! turn start (status tick, stun), the slowed skip on even turns, then the
//! detection radius around the player. Behaviours are re-evaluated from
//! scratch each turn; only the boss carries state between turns.
mod behaviors;
mod boss;
pub mod pathfinding;
pub mod tactics;

pub use pathfinding::{CARDINAL_COST, DIAGONAL_COST, astar};
pub use tactics::{find_flank_position, find_retreat_position};

use crate::engine::{GameEngine, initiative_order};
use crate::env::MessageCategory;
use crate::geometry::chebyshev;
use crate::state::{ActorKind, EntityId, StatusKind};

/// Monster behaviour tags.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Behavior {
    /// Close in and attack.
    #[default]
    Aggressive,
    /// Circle to the far side of the player before engaging.
    Flanking,
    /// Heal or back off when badly hurt.
    Cautious,
    /// Keep a firing band and use ranged abilities.
    Ranged,
    /// Phase-driven boss controller.
    Boss,
}

impl GameEngine<'_> {
    /// Runs one turn for every living monster on the player's floor, in
    /// initiative order. Stops as soon as the player dies.
    ///
    /// Returns the number of monsters that were given a turn.
    pub fn process_all_monsters(&mut self) -> usize {
        let Some(floor) = self
            .state
            .player()
            .filter(|player| player.alive)
            .map(|player| player.floor)
        else {
            return 0;
        };

        let order = initiative_order(
            self.state
                .actors_on_floor(floor)
                .filter(|actor| actor.kind == ActorKind::Monster),
        );

        let mut processed = 0;
        for id in order {
            if !self.state.player().is_some_and(|player| player.alive) {
                tracing::debug!(turn = self.state.turn.number, "player fell, monster phase aborted");
                break;
            }
            self.process_monster_turn(id);
            processed += 1;
        }
        processed
    }

    /// Runs a single monster's turn. Returns true if its behaviour ran.
    pub fn process_monster_turn(&mut self, id: EntityId) -> bool {
        if !self
            .state
            .actor(id)
            .is_some_and(|actor| actor.alive && actor.kind == ActorKind::Monster)
        {
            return false;
        }
        if !self.process_turn_start(id).can_act() {
            return false;
        }

        let Some(monster) = self.state.actor(id) else {
            return false;
        };
        if monster.status_effects.has(StatusKind::Slowed) && self.state.turn.is_even() {
            let text = format!("{} is slowed and moves sluggishly.", monster.name);
            self.say(text, MessageCategory::Combat);
            return false;
        }

        let Some(player) = self.state.player().filter(|player| player.alive) else {
            return false;
        };
        if player.floor != monster.floor
            || chebyshev(player.position, monster.position) > self.config.ai.detection_radius
        {
            return false;
        }

        let behavior = monster.behavior;
        tracing::trace!(monster = %id, behavior = behavior.as_ref(), "monster acts");
        match behavior {
            Behavior::Aggressive => self.act_aggressive(id),
            Behavior::Flanking => self.act_flanking(id),
            Behavior::Cautious => self.act_cautious(id),
            Behavior::Ranged => self.act_ranged(id),
            Behavior::Boss => self.act_boss(id),
        }
        true
    }
}
