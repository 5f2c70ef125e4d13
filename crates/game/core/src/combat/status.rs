//! Status effect lifecycle: apply, tick, expire and revert.

use crate::env::{MessageCategory, MessageSink};
use crate::state::{Actor, EffectPayload, StatusEffect};

/// What a single [`tick_status_effects`] pass did to an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Poison and bleed damage taken this tick.
    pub damage_taken: u32,
    /// Number of effects that expired and were removed.
    pub expired: u32,
    /// True if damage over time killed the actor during this tick.
    pub died: bool,
}

/// Attaches `effect` to `actor`, applying any stat delta it carries.
///
/// A buff that replaces an older buff first reverts the older delta, so stats
/// always return to their base value when the last buff expires.
pub fn apply_status(actor: &mut Actor, effect: StatusEffect) {
    if let Some(replaced) = actor.status_effects.add(effect) {
        revert_stat_delta(actor, &replaced.payload);
    }
    if let EffectPayload::Buffed { stat, amount } = effect.payload {
        *actor.stat_mut(stat) += amount;
    }
}

fn revert_stat_delta(actor: &mut Actor, payload: &EffectPayload) {
    if let EffectPayload::Buffed { stat, amount } = *payload {
        *actor.stat_mut(stat) -= amount;
    }
}

/// Advances every effect on `actor` by one turn, in list order.
///
/// For each effect: poison and bleed deal their damage (living actors only),
/// the duration drops by one, and an effect reaching zero is removed with its
/// stat delta reverted. An effect left with one turn emits a fading warning.
pub fn tick_status_effects(actor: &mut Actor, log: &mut dyn MessageSink) -> TickReport {
    let mut report = TickReport::default();
    let mut index = 0;

    while let Some(effect) = actor.status_effects.at(index).copied() {
        if let Some(damage) = effect.payload.tick_damage() {
            if actor.alive && damage > 0 {
                let source = match effect.payload {
                    EffectPayload::Poisoned { .. } => "poison",
                    _ => "bleed",
                };
                report.damage_taken += actor.resources.hp.drain(damage);
                log.push(
                    format!("{} takes {} {} damage.", actor.name, damage, source),
                    MessageCategory::Combat,
                );
                if actor.resources.hp.is_empty() && actor.kill() {
                    report.died = true;
                    let epitaph = match effect.payload {
                        EffectPayload::Poisoned { .. } => "dies from poison!",
                        _ => "bleeds out!",
                    };
                    log.push(
                        format!("{} {}", actor.name, epitaph),
                        MessageCategory::Combat,
                    );
                }
            }
        }

        let remaining = effect.duration.saturating_sub(1);
        if remaining == 0 {
            let expired = actor.status_effects.remove_at(index);
            report.expired += 1;
            tracing::trace!(actor = %actor.id, kind = %expired.kind(), "status effect expired");
            if let EffectPayload::Buffed { stat, .. } = expired.payload {
                revert_stat_delta(actor, &expired.payload);
                log.push(
                    format!("{}'s {} buff fades.", actor.name, stat),
                    MessageCategory::Combat,
                );
            }
            continue;
        }

        if let Some(slot) = actor.status_effects.at_mut(index) {
            slot.duration = remaining;
        }
        if remaining == 1 {
            log.push(
                format!(
                    "{}'s {} is fading! (1 turn left)",
                    actor.name,
                    effect.kind().label()
                ),
                MessageCategory::Combat,
            );
        }
        index += 1;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MessageLog;
    use crate::state::{ActorKind, EntityId, Position, StatKind, StatusKind};

    fn target(hp: u32) -> Actor {
        Actor::new(EntityId(2), "Orc", ActorKind::Monster, Position::ORIGIN)
            .with_resources(hp, 0, 0)
            .with_combat_stats(10, 5, 8)
    }

    #[test]
    fn poison_ticks_once_per_turn() {
        let mut log = MessageLog::new();
        let mut orc = target(40);
        apply_status(&mut orc, StatusEffect::new(EffectPayload::Poisoned { damage: 5 }, 3));

        let report = tick_status_effects(&mut orc, &mut log);
        assert_eq!(report.damage_taken, 5);
        assert_eq!(orc.hp(), 35);
        assert_eq!(orc.status_effects.get(StatusKind::Poisoned).map(|e| e.duration), Some(2));
        assert!(log.contains("Orc takes 5 poison damage."));
    }

    #[test]
    fn lethal_bleed_kills_once() {
        let mut log = MessageLog::new();
        let mut orc = target(3);
        apply_status(&mut orc, StatusEffect::new(EffectPayload::Bleed { damage: 4 }, 3));

        assert!(tick_status_effects(&mut orc, &mut log).died);
        assert!(!orc.alive);
        assert!(log.contains("Orc bleeds out!"));

        let again = tick_status_effects(&mut orc, &mut log);
        assert!(!again.died);
        assert_eq!(again.damage_taken, 0);
    }

    #[test]
    fn buff_reverts_exactly_once_on_expiry() {
        let mut log = MessageLog::new();
        let mut orc = target(40);
        apply_status(&mut orc, StatusEffect::buffed(StatKind::Attack, 7));
        assert_eq!(orc.attack, 17);

        for _ in 0..3 {
            tick_status_effects(&mut orc, &mut log);
        }
        assert_eq!(orc.attack, 10);
        assert!(!orc.status_effects.has(StatusKind::Buffed));

        tick_status_effects(&mut orc, &mut log);
        assert_eq!(orc.attack, 10);
        assert!(log.contains("Orc's attack buff fades."));
    }

    #[test]
    fn replacing_a_buff_does_not_stack_deltas() {
        let mut orc = target(40);
        apply_status(&mut orc, StatusEffect::buffed(StatKind::Attack, 7));
        apply_status(&mut orc, StatusEffect::buffed(StatKind::Defense, 3));
        assert_eq!(orc.attack, 10);
        assert_eq!(orc.defense, 8);
    }

    #[test]
    fn fading_warning_at_one_turn_left() {
        let mut log = MessageLog::new();
        let mut orc = target(40);
        apply_status(&mut orc, StatusEffect::divine_shield());

        tick_status_effects(&mut orc, &mut log);
        assert!(log.contains("Orc's Divine shield is fading! (1 turn left)"));

        let report = tick_status_effects(&mut orc, &mut log);
        assert_eq!(report.expired, 1);
        assert!(orc.status_effects.is_empty());
    }

    #[test]
    fn zero_duration_shield_expires_on_first_tick() {
        let mut log = MessageLog::new();
        let mut orc = target(40);
        apply_status(&mut orc, StatusEffect::shielded(10));
        tick_status_effects(&mut orc, &mut log);
        assert!(!orc.status_effects.has(StatusKind::Shielded));
    }
}
