//! Damage calculation and mitigation.

use crate::env::{GameRng, MessageCategory, MessageSink};
use crate::state::{Actor, EffectPayload, StatusKind};

// ============================================================================
// Damage Calculation
// ============================================================================

/// Rolls raw damage for one blow.
///
/// # Formula
///
/// ```text
/// max(1, attack - floor(defense / 2) + v),  v uniform in [-variance, variance]
/// ```
///
/// The result is never below 1.
pub fn calc_base_damage(
    attacker: &Actor,
    defender: &Actor,
    variance: i32,
    rng: &mut GameRng,
) -> u32 {
    let roll = rng.range(-variance.abs(), variance.abs());
    (attacker.attack - defender.defense.div_euclid(2) + roll).max(1) as u32
}

/// Unmitigated, variance-free damage used to judge critical hits.
pub fn reference_damage(attacker: &Actor, defender: &Actor) -> u32 {
    (attacker.attack - defender.defense.div_euclid(2)).max(1) as u32
}

/// A hit is critical when it deals more than 1.5x the reference damage.
pub fn is_critical(dealt: u32, reference: u32) -> bool {
    u64::from(dealt) * 2 > u64::from(reference.max(1)) * 3
}

// ============================================================================
// Damage Application
// ============================================================================

/// Applies `raw` damage to `target` through its defensive effects.
///
/// Mitigation order:
/// 1. evading: the blow is negated and the effect consumed
/// 2. vulnerable: x1.25 (floored)
/// 3. divine shield: x(1 - reduction) (floored)
/// 4. shield: absorbs up to its remaining pool, removed once empty
/// 5. hp loss; reaching 0 hp kills the target
///
/// Returns the damage that reached hp.
pub fn apply_damage(target: &mut Actor, raw: u32, log: &mut dyn MessageSink) -> u32 {
    if target.status_effects.remove(StatusKind::Evading).is_some() {
        log.push(
            format!("{} evades the attack!", target.name),
            MessageCategory::Combat,
        );
        return 0;
    }

    let mut damage = u64::from(raw);

    if target.status_effects.has(StatusKind::Vulnerable) {
        damage = damage * 5 / 4;
    }

    if let Some(EffectPayload::DivineShield { reduction_pct }) = target
        .status_effects
        .get(StatusKind::DivineShield)
        .map(|effect| effect.payload)
    {
        damage = damage * u64::from(100 - reduction_pct.min(100)) / 100;
    }

    let mut damage = u32::try_from(damage).unwrap_or(u32::MAX);

    if let Some(shield) = target.status_effects.get_mut(StatusKind::Shielded) {
        if let EffectPayload::Shielded { absorb } = &mut shield.payload {
            if *absorb > 0 {
                let absorbed = (*absorb).min(damage);
                *absorb -= absorbed;
                damage -= absorbed;
                let depleted = *absorb == 0;
                if depleted {
                    target.status_effects.remove(StatusKind::Shielded);
                }
                log.push(
                    format!("{}'s shield absorbs {} damage.", target.name, absorbed),
                    MessageCategory::Combat,
                );
            }
        }
    }

    target.resources.hp.drain(damage);
    if target.resources.hp.is_empty() {
        target.kill();
    }
    damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MessageLog;
    use crate::state::{ActorKind, EntityId, Position, StatusEffect};

    fn dummy(hp: u32, attack: i32, defense: i32) -> Actor {
        Actor::new(EntityId(1), "Dummy", ActorKind::Monster, Position::ORIGIN)
            .with_resources(hp, 0, 0)
            .with_combat_stats(attack, defense, 10)
    }

    #[test]
    fn base_damage_stays_within_variance_band() {
        let attacker = dummy(10, 14, 0);
        let defender = dummy(10, 0, 4);
        let mut rng = GameRng::new(11);
        for _ in 0..200 {
            let dmg = calc_base_damage(&attacker, &defender, 2, &mut rng);
            assert!((10..=14).contains(&dmg), "rolled {dmg}");
        }
    }

    #[test]
    fn base_damage_floors_at_one() {
        let attacker = dummy(10, 1, 0);
        let defender = dummy(10, 0, 40);
        let mut rng = GameRng::new(5);
        assert!((0..50).all(|_| calc_base_damage(&attacker, &defender, 2, &mut rng) == 1));
    }

    #[test]
    fn odd_defense_rounds_down() {
        assert_eq!(reference_damage(&dummy(1, 10, 0), &dummy(1, 0, 5)), 8);
    }

    #[test]
    fn evading_negates_and_is_consumed() {
        let mut log = MessageLog::new();
        let mut target = dummy(30, 0, 0);
        target.status_effects.add(StatusEffect::evading());

        assert_eq!(apply_damage(&mut target, 20, &mut log), 0);
        assert_eq!(target.hp(), 30);
        assert!(!target.status_effects.has(StatusKind::Evading));
        assert!(log.contains("evades the attack"));

        assert_eq!(apply_damage(&mut target, 20, &mut log), 20);
    }

    #[test]
    fn shield_absorbs_then_breaks() {
        let mut log = MessageLog::new();
        let mut target = dummy(50, 0, 0);
        target.status_effects.add(StatusEffect::shielded(5));

        assert_eq!(apply_damage(&mut target, 15, &mut log), 10);
        assert_eq!(target.hp(), 40);
        assert!(!target.status_effects.has(StatusKind::Shielded));
    }

    #[test]
    fn shield_larger_than_blow_keeps_remainder() {
        let mut log = MessageLog::new();
        let mut target = dummy(50, 0, 0);
        target.status_effects.add(StatusEffect::shielded(30));

        assert_eq!(apply_damage(&mut target, 12, &mut log), 0);
        assert_eq!(
            target.status_effects.get(StatusKind::Shielded).map(|e| e.payload),
            Some(EffectPayload::Shielded { absorb: 18 })
        );
    }

    #[test]
    fn vulnerable_then_divine_shield_both_floor() {
        let mut log = MessageLog::new();
        let mut target = dummy(100, 0, 0);
        target.status_effects.add(StatusEffect::vulnerable());
        target.status_effects.add(StatusEffect::divine_shield());

        // 11 * 1.25 = 13.75 -> 13, then 13 * 0.5 = 6.5 -> 6
        assert_eq!(apply_damage(&mut target, 11, &mut log), 6);
    }

    #[test]
    fn lethal_damage_kills_and_clamps() {
        let mut log = MessageLog::new();
        let mut target = dummy(1, 0, 0);
        assert_eq!(apply_damage(&mut target, 100, &mut log), 100);
        assert_eq!(target.hp(), 0);
        assert!(!target.alive);
    }

    #[test]
    fn critical_threshold_is_strict() {
        assert!(!is_critical(15, 10));
        assert!(is_critical(16, 10));
        assert!(is_critical(2, 1));
    }
}
