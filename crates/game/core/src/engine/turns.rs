//! Initiative and the start-of-turn status pass.

use crate::combat::tick_status_effects;
use crate::env::MessageCategory;
use crate::state::{Actor, EntityId, StatusKind};

use super::{GameEngine, GameEvent};

/// Result of [`GameEngine::process_turn_start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TurnStart {
    Ready,
    /// Stunned: effects ticked but the turn is lost.
    Stunned,
    /// Missing, already dead, or killed by damage over time this tick.
    Dead,
}

impl TurnStart {
    pub fn can_act(self) -> bool {
        self == TurnStart::Ready
    }
}

/// Acting order for a round: living actors, fastest first, ties by lower id.
pub fn initiative_order<'a>(actors: impl IntoIterator<Item = &'a Actor>) -> Vec<EntityId> {
    let mut ready: Vec<(i32, EntityId)> = actors
        .into_iter()
        .filter(|actor| actor.alive)
        .map(|actor| (actor.speed, actor.id))
        .collect();
    ready.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    ready.into_iter().map(|(_, id)| id).collect()
}

impl GameEngine<'_> {
    /// Ticks `id`'s status effects and reports whether it may act.
    ///
    /// A stunned actor still ticks, so the stun wears off. A death from damage
    /// over time records [`GameEvent::ActorSlain`] with no killer.
    pub fn process_turn_start(&mut self, id: EntityId) -> TurnStart {
        let Some(actor) = self.state.actor_mut(id) else {
            return TurnStart::Dead;
        };
        if !actor.alive {
            return TurnStart::Dead;
        }

        let stunned = actor.status_effects.has(StatusKind::Stunned);
        if stunned {
            self.log.push(
                format!("{} is stunned and skips their turn.", actor.name),
                MessageCategory::Combat,
            );
        }

        let report = tick_status_effects(actor, &mut *self.log);
        if report.died {
            self.emit(GameEvent::ActorSlain {
                victim: id,
                killer: None,
            });
            return TurnStart::Dead;
        }

        if stunned {
            TurnStart::Stunned
        } else {
            TurnStart::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorKind, Position};

    fn runner(id: u32, speed: i32) -> Actor {
        Actor::new(EntityId(id), "Runner", ActorKind::Monster, Position::ORIGIN)
            .with_resources(10, 0, 0)
            .with_combat_stats(1, 1, speed)
    }

    #[test]
    fn fastest_first_then_lowest_id() {
        let mut dead = runner(1, 99);
        dead.kill();
        let actors = [runner(4, 10), runner(2, 12), runner(3, 10), dead];
        assert_eq!(
            initiative_order(&actors),
            vec![EntityId(2), EntityId(3), EntityId(4)]
        );
    }

    #[test]
    fn only_ready_can_act() {
        assert!(TurnStart::Ready.can_act());
        assert!(!TurnStart::Stunned.can_act());
        assert!(!TurnStart::Dead.can_act());
    }
}
