//! Regular monster behaviours.

use crate::action::AbilityKind;
use crate::combat::has_line_of_sight;
use crate::engine::GameEngine;
use crate::geometry::chebyshev;
use crate::state::{EntityId, Position};

use super::tactics::{find_flank_position, find_retreat_position};

/// Where the player stands relative to a monster this turn.
#[derive(Clone, Copy, Debug)]
pub(super) struct Engagement {
    pub floor: u32,
    pub origin: Position,
    pub player: Position,
    pub distance: u32,
}

impl GameEngine<'_> {
    /// Positions of `id` and the living player on the same floor.
    pub(super) fn engagement(&self, id: EntityId) -> Option<Engagement> {
        let monster = self.state.actor(id).filter(|actor| actor.alive)?;
        let player = self
            .state
            .player()
            .filter(|player| player.alive && player.floor == monster.floor)?;
        Some(Engagement {
            floor: monster.floor,
            origin: monster.position,
            player: player.position,
            distance: chebyshev(monster.position, player.position),
        })
    }

    /// Picks one known ability at random and tries it on the player.
    pub(super) fn use_random_ability(&mut self, id: EntityId) -> bool {
        let Some(abilities) = self
            .state
            .actor(id)
            .map(|actor| actor.abilities.clone())
            .filter(|abilities| !abilities.is_empty())
        else {
            return false;
        };
        let Some(&kind) = self.rng.choose(&abilities) else {
            return false;
        };
        self.use_ability(kind, id, EntityId::PLAYER).is_ok()
    }

    /// Melee against the player; a rejection is already explained in the log.
    pub(super) fn melee_player(&mut self, id: EntityId) {
        if let Err(error) = self.melee_attack(id, EntityId::PLAYER) {
            tracing::debug!(monster = %id, %error, "melee rejected");
        }
    }

    /// Adjacent exchange: with `chance` percent try a random ability, and
    /// fall back to melee if none was rolled or it failed.
    fn engage_adjacent(&mut self, id: EntityId, chance: u32) {
        let has_abilities = self
            .state
            .actor(id)
            .is_some_and(|actor| !actor.abilities.is_empty());
        if has_abilities && self.rng.percent(chance) && self.use_random_ability(id) {
            return;
        }
        self.melee_player(id);
    }

    fn advance_or_engage(&mut self, id: EntityId, chance: u32) {
        let Some(engagement) = self.engagement(id) else {
            return;
        };
        if engagement.distance <= 1 {
            self.engage_adjacent(id, chance);
        } else {
            self.move_toward(id, engagement.player);
        }
    }

    pub(super) fn act_aggressive(&mut self, id: EntityId) {
        let chance = self.config.ai.aggressive_ability_chance;
        self.advance_or_engage(id, chance);
    }

    pub(super) fn act_flanking(&mut self, id: EntityId) {
        let Some(engagement) = self.engagement(id) else {
            return;
        };
        if engagement.distance <= 1 {
            let chance = self.config.ai.flanking_ability_chance;
            self.engage_adjacent(id, chance);
            return;
        }

        let flank = match (self.state.actor(id), self.state.player()) {
            (Some(monster), Some(player)) => {
                find_flank_position(self.env.map(), self.state, monster, player)
            }
            _ => None,
        };
        tracing::trace!(monster = %id, ?flank, "flanking");
        self.move_toward(id, flank.unwrap_or(engagement.player));
    }

    pub(super) fn act_cautious(&mut self, id: EntityId) {
        let ai = self.config.ai;
        let Some(monster) = self.state.actor(id) else {
            return;
        };

        if monster.hp_below(ai.cautious_hp_threshold_pct) {
            let can_heal = monster.knows(AbilityKind::Heal)
                && monster.can_afford(AbilityKind::Heal.costs());
            if can_heal && self.use_ability(AbilityKind::Heal, id, id).is_ok() {
                return;
            }

            let retreat = match (self.state.actor(id), self.state.player()) {
                (Some(monster), Some(player)) => {
                    find_retreat_position(self.env.map(), self.state, monster, player.position)
                }
                _ => None,
            };
            if let Some(cell) = retreat {
                tracing::debug!(monster = %id, %cell, "cautious retreat");
                self.step_to(id, cell);
                return;
            }
        }

        self.advance_or_engage(id, ai.cautious_ability_chance);
    }

    pub(super) fn act_ranged(&mut self, id: EntityId) {
        let ai = self.config.ai;
        let Some(engagement) = self.engagement(id) else {
            return;
        };
        let in_sight = has_line_of_sight(
            self.env.map(),
            engagement.floor,
            engagement.origin,
            engagement.player,
        );
        let too_close = engagement.distance < ai.ranged_min_distance;
        let too_far = engagement.distance > ai.ranged_max_distance;

        if too_close {
            if in_sight {
                self.use_random_ability(id);
            }
            let retreat = match self.state.actor(id) {
                Some(monster) => {
                    find_retreat_position(self.env.map(), self.state, monster, engagement.player)
                }
                None => None,
            };
            if let Some(cell) = retreat {
                self.step_to(id, cell);
            }
            return;
        }

        if !too_far && in_sight && self.use_random_ability(id) {
            return;
        }

        if engagement.distance <= 1 {
            self.melee_player(id);
            return;
        }

        if too_far || !in_sight {
            self.move_toward(id, engagement.player);
        }
    }
}
