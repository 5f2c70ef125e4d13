//! Attack primitives: melee, ranged and area strikes.
//!
//! Each primitive validates first and mutates second, so an `Err` leaves the
//! state untouched apart from the explanatory message.

use crate::action::ActionError;
use crate::engine::GameEngine;
use crate::env::MessageCategory;
use crate::geometry::chebyshev;
use crate::state::{Actor, EffectPayload, EntityId, Position, StatusEffect};

use super::{
    apply_damage, apply_status, calc_base_damage, has_line_of_sight, is_critical,
    reference_damage,
};

/// What one resolved blow did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Damage that reached hp after every mitigation.
    pub dealt: u32,
    pub critical: bool,
    /// True if this blow caused the alive-to-dead transition.
    pub killed: bool,
}

/// Distance between two actors; actors on different floors are unreachable.
pub(crate) fn reach(a: &Actor, b: &Actor) -> u32 {
    if a.floor == b.floor {
        chebyshev(a.position, b.position)
    } else {
        u32::MAX
    }
}

impl GameEngine<'_> {
    /// Basic adjacent attack.
    pub fn melee_attack(
        &mut self,
        attacker: EntityId,
        defender: EntityId,
    ) -> Result<AttackOutcome, ActionError> {
        let (atk, def) = self.combatants(attacker, defender)?;
        let distance = reach(atk, def);
        if distance > 1 {
            let text = format!("{} is too far for melee.", def.name);
            self.say(text, MessageCategory::Combat);
            return Err(ActionError::OutOfRange {
                target: defender,
                distance,
                range: 1,
            });
        }

        let raw = self.roll_damage(attacker, defender);
        Ok(self.strike(attacker, defender, raw, false, |a, d, dealt| {
            format!("{a} hits {d} for {dealt} damage")
        }))
    }

    /// Attack at up to `range` tiles; needs line of sight.
    pub fn ranged_attack(
        &mut self,
        attacker: EntityId,
        defender: EntityId,
        range: u32,
    ) -> Result<AttackOutcome, ActionError> {
        let (atk, def) = self.combatants(attacker, defender)?;
        let distance = reach(atk, def);
        if distance > range {
            let text = format!("{} is out of range.", def.name);
            self.say(text, MessageCategory::Combat);
            return Err(ActionError::OutOfRange {
                target: defender,
                distance,
                range,
            });
        }
        if !has_line_of_sight(self.env.map(), atk.floor, atk.position, def.position) {
            let text = format!("No line of sight to {}.", def.name);
            self.say(text, MessageCategory::Combat);
            return Err(ActionError::NoLineOfSight { target: defender });
        }

        let raw = self.roll_damage(attacker, defender);
        Ok(self.strike(attacker, defender, raw, false, |a, d, dealt| {
            format!("{a} shoots {d} for {dealt} damage")
        }))
    }

    /// Hits every living actor except `attacker` within Chebyshev `radius` of
    /// `center` on `floor`, each for `base * multiplier_pct / 100`.
    ///
    /// Returns the number of actors hit, including those whose damage was
    /// fully negated.
    pub fn aoe_attack(
        &mut self,
        attacker: EntityId,
        center: Position,
        floor: u32,
        radius: u32,
        multiplier_pct: u32,
    ) -> u32 {
        let targets: Vec<EntityId> = self
            .state
            .actors_on_floor(floor)
            .filter(|actor| actor.id != attacker && chebyshev(center, actor.position) <= radius)
            .map(|actor| actor.id)
            .collect();

        let mut hits = 0;
        for target in targets {
            let raw = self.roll_damage(attacker, target) * multiplier_pct / 100;
            let Some(victim) = self.state.actor_mut(target) else {
                continue;
            };
            let was_alive = victim.alive;
            let dealt = apply_damage(victim, raw, &mut *self.log);
            if dealt > 0 {
                self.log.push(
                    format!(
                        "{} takes {} AoE damage [{}% HP]",
                        victim.name,
                        dealt,
                        victim.hp_percent()
                    ),
                    MessageCategory::Combat,
                );
            }
            let killed = was_alive && !victim.alive;
            hits += 1;
            if killed {
                self.on_kill(attacker, target);
            }
        }
        tracing::debug!(attacker = %attacker, %center, radius, hits, "area attack");
        hits
    }

    // ===== shared plumbing =====

    /// Looks up a living attacker and a living defender.
    pub(crate) fn combatants(
        &self,
        attacker: EntityId,
        defender: EntityId,
    ) -> Result<(&Actor, &Actor), ActionError> {
        let atk = self
            .state
            .actor(attacker)
            .ok_or(ActionError::ActorNotFound(attacker))?;
        let def = self
            .state
            .actor(defender)
            .ok_or(ActionError::ActorNotFound(defender))?;
        if !atk.alive {
            return Err(ActionError::Incapacitated { actor: attacker });
        }
        if !def.alive {
            return Err(ActionError::TargetDead(defender));
        }
        Ok((atk, def))
    }

    /// Base damage roll between two actors; 0 if either is missing.
    pub(crate) fn roll_damage(&mut self, attacker: EntityId, defender: EntityId) -> u32 {
        let variance = self.config.combat.damage_variance;
        match (self.state.actor(attacker), self.state.actor(defender)) {
            (Some(atk), Some(def)) => calc_base_damage(atk, def, variance, self.rng),
            _ => 0,
        }
    }

    /// Lands `raw` damage on `defender` and reports it.
    ///
    /// The message is `describe(attacker, defender, dealt)` with an hp tag,
    /// prefixed `CRITICAL!` for critical hits, which also open a bleed on a
    /// surviving defender. Unless `always_report` is set, a blow that dealt
    /// nothing stays silent. Kill resolution runs on the death edge only.
    pub(crate) fn strike(
        &mut self,
        attacker: EntityId,
        defender: EntityId,
        raw: u32,
        always_report: bool,
        describe: impl FnOnce(&str, &str, u32) -> String,
    ) -> AttackOutcome {
        let (attacker_name, reference) =
            match (self.state.actor(attacker), self.state.actor(defender)) {
                (Some(atk), Some(def)) => (atk.name.clone(), reference_damage(atk, def)),
                _ => return AttackOutcome::default(),
            };
        let combat = self.config.combat;
        let Some(victim) = self.state.actor_mut(defender) else {
            return AttackOutcome::default();
        };

        let was_alive = victim.alive;
        let dealt = apply_damage(victim, raw, &mut *self.log);
        let mut outcome = AttackOutcome {
            dealt,
            critical: false,
            killed: was_alive && !victim.alive,
        };

        if dealt > 0 || always_report {
            let text = describe(&attacker_name, &victim.name, dealt);
            let tag = victim.hp_percent();
            outcome.critical = is_critical(dealt, reference);
            if outcome.critical {
                self.log.push(
                    format!("CRITICAL! {text} [{tag}% HP]"),
                    MessageCategory::Combat,
                );
                if victim.alive {
                    apply_status(
                        victim,
                        StatusEffect::new(
                            EffectPayload::Bleed {
                                damage: combat.crit_bleed_damage,
                            },
                            combat.crit_bleed_duration,
                        ),
                    );
                    self.log.push(
                        format!("{} is bleeding!", victim.name),
                        MessageCategory::Combat,
                    );
                }
            } else {
                self.log
                    .push(format!("{text} [{tag}% HP]"), MessageCategory::Combat);
            }
        }

        if outcome.killed {
            self.on_kill(attacker, defender);
        }
        outcome
    }
}
