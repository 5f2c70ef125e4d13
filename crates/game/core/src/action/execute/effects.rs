//! Effect procedures, one arm per catalog entry.
//!
//! Everything here runs after validation and payment, so lookups that fail
//! simply produce an empty outcome.

use crate::action::{Ability, AbilityKind, TargetShape};
use crate::combat::{AttackOutcome, apply_status};
use crate::engine::GameEngine;
use crate::env::MessageCategory;
use crate::state::{ActorKind, ActorTags, EffectPayload, EntityId, StatKind, StatusEffect};

use super::AbilityOutcome;

const WAR_CRY_BONUS: i32 = 7;
const ARCANE_SHIELD_ABSORB: u32 = 30;
const ARCANE_SHIELD_DURATION: u32 = 99;
const HEAL_AMOUNT: u32 = 25;

const VENOM_SPIT_POISON: StatusEffect =
    StatusEffect::new(EffectPayload::Poisoned { damage: 3 }, 3);
const REND_BLEED: StatusEffect = StatusEffect::new(EffectPayload::Bleed { damage: 3 }, 3);

impl AbilityOutcome {
    fn strike(ability: AbilityKind, attack: AttackOutcome) -> Self {
        Self {
            ability,
            dealt: attack.dealt,
            targets_hit: 1,
            healed: 0,
        }
    }

    fn quiet(ability: AbilityKind) -> Self {
        Self {
            ability,
            dealt: 0,
            targets_hit: 0,
            healed: 0,
        }
    }
}

/// Player and allied NPCs share a side; monsters form the other.
fn same_side(a: ActorKind, b: ActorKind) -> bool {
    (a == ActorKind::Monster) == (b == ActorKind::Monster)
}

impl GameEngine<'_> {
    pub(super) fn apply_effects(
        &mut self,
        ability: &Ability,
        user: EntityId,
        target: EntityId,
    ) -> AbilityOutcome {
        let kind = ability.kind;
        match kind {
            AbilityKind::PowerStrike => {
                let raw = self.roll_damage(user, target) * 2;
                let hit = self.strike(user, target, raw, true, |a, d, n| {
                    format!("{a} uses Power Strike on {d} for {n} damage!")
                });
                AbilityOutcome::strike(kind, hit)
            }
            AbilityKind::ShieldBash => {
                let raw = self.roll_damage(user, target);
                let hit = self.strike(user, target, raw, true, |a, d, n| {
                    format!("{a} bashes {d} for {n} damage and stuns them!")
                });
                self.afflict(target, StatusEffect::stunned());
                AbilityOutcome::strike(kind, hit)
            }
            AbilityKind::WarCry => {
                if let Some(actor) = self.state.actor_mut(user) {
                    apply_status(actor, StatusEffect::buffed(StatKind::Attack, WAR_CRY_BONUS));
                    let text = format!(
                        "{} lets out a War Cry! Attack +{} for 3 turns.",
                        actor.name, WAR_CRY_BONUS
                    );
                    self.log.push(text, MessageCategory::Combat);
                }
                AbilityOutcome::quiet(kind)
            }
            AbilityKind::Fireball => {
                let TargetShape::Area {
                    radius,
                    multiplier_pct,
                } = ability.shape
                else {
                    return AbilityOutcome::quiet(kind);
                };
                let Some((center, floor)) = self.state.actor(target).map(|t| (t.position, t.floor))
                else {
                    return AbilityOutcome::quiet(kind);
                };
                let hits = self.aoe_attack(user, center, floor, radius, multiplier_pct);
                let name = self.actor_name(user);
                self.say(
                    format!("{name} casts Fireball! {hits} targets hit."),
                    MessageCategory::Combat,
                );
                AbilityOutcome {
                    targets_hit: hits,
                    ..AbilityOutcome::quiet(kind)
                }
            }
            AbilityKind::IceShard => {
                let raw = self.roll_damage(user, target);
                let hit = self.strike(user, target, raw, true, |a, d, n| {
                    format!("{a} hurls an Ice Shard at {d} for {n} damage! Target slowed")
                });
                self.afflict(target, StatusEffect::slowed());
                AbilityOutcome::strike(kind, hit)
            }
            AbilityKind::ArcaneShield => {
                if let Some(actor) = self.state.actor_mut(user) {
                    apply_status(
                        actor,
                        StatusEffect::shielded(ARCANE_SHIELD_ABSORB)
                            .with_duration(ARCANE_SHIELD_DURATION),
                    );
                    let text = format!(
                        "{} conjures an Arcane Shield (absorbs {} damage).",
                        actor.name, ARCANE_SHIELD_ABSORB
                    );
                    self.log.push(text, MessageCategory::Combat);
                }
                AbilityOutcome::quiet(kind)
            }
            AbilityKind::Backstab => {
                let behind = self.attacker_behind(user, target);
                let base = self.roll_damage(user, target);
                let raw = if behind { base * 3 } else { base * 3 / 2 };
                let label = if behind {
                    "Backstab (from behind)"
                } else {
                    "Backstab"
                };
                let hit = self.strike(user, target, raw, true, |a, d, n| {
                    format!("{a} uses {label} on {d} for {n} damage!")
                });
                AbilityOutcome::strike(kind, hit)
            }
            AbilityKind::Evade => {
                if let Some(actor) = self.state.actor_mut(user) {
                    apply_status(actor, StatusEffect::evading());
                    let text = format!("{} prepares to evade the next attack.", actor.name);
                    self.log.push(text, MessageCategory::Combat);
                }
                AbilityOutcome::quiet(kind)
            }
            AbilityKind::PoisonBlade => {
                let raw = self.roll_damage(user, target);
                let hit = self.strike(user, target, raw, true, |a, d, n| {
                    format!("{a} poisons {d} for {n} damage! Poisoned for 5 turns")
                });
                self.afflict(target, StatusEffect::poisoned());
                AbilityOutcome::strike(kind, hit)
            }
            AbilityKind::Heal => {
                let mut healed = 0;
                if let Some(actor) = self.state.actor_mut(user) {
                    healed = actor.resources.hp.restore(HEAL_AMOUNT);
                    let text = format!("{} heals for {} HP.", actor.name, healed);
                    self.log.push(text, MessageCategory::Combat);
                }
                AbilityOutcome {
                    healed,
                    ..AbilityOutcome::quiet(kind)
                }
            }
            AbilityKind::Smite => {
                let undead = self
                    .state
                    .actor(target)
                    .is_some_and(|t| t.tags.contains(ActorTags::UNDEAD));
                let base = self.roll_damage(user, target);
                let raw = if undead { base * 2 } else { base };
                let extra = if undead {
                    " (holy damage vs undead!)"
                } else {
                    ""
                };
                let hit = self.strike(user, target, raw, true, |a, d, n| {
                    format!("{a} smites {d} for {n} damage!{extra}")
                });
                AbilityOutcome::strike(kind, hit)
            }
            AbilityKind::DivineShield => {
                let Some((side, floor, name)) = self
                    .state
                    .actor(user)
                    .map(|u| (u.kind, u.floor, u.name.clone()))
                else {
                    return AbilityOutcome::quiet(kind);
                };
                let allies: Vec<EntityId> = self
                    .state
                    .actors_on_floor(floor)
                    .filter(|actor| same_side(actor.kind, side))
                    .map(|actor| actor.id)
                    .collect();
                for ally in &allies {
                    self.afflict(*ally, StatusEffect::divine_shield());
                }
                self.say(
                    format!(
                        "{name} invokes Divine Shield! Party takes 50% less damage for 2 turns."
                    ),
                    MessageCategory::Combat,
                );
                AbilityOutcome {
                    targets_hit: allies.len() as u32,
                    ..AbilityOutcome::quiet(kind)
                }
            }
            AbilityKind::VenomSpit => {
                let raw = self.roll_damage(user, target);
                let hit = self.strike(user, target, raw, true, |a, d, n| {
                    format!("{a} spits venom at {d} for {n} damage! Poisoned for 3 turns")
                });
                self.afflict(target, VENOM_SPIT_POISON);
                AbilityOutcome::strike(kind, hit)
            }
            AbilityKind::Rend => {
                let raw = self.roll_damage(user, target);
                let hit = self.strike(user, target, raw, true, |a, d, n| {
                    format!("{a} rends {d} for {n} damage! Bleeding for 3 turns")
                });
                self.afflict(target, REND_BLEED);
                AbilityOutcome::strike(kind, hit)
            }
            AbilityKind::Hex => {
                self.afflict(target, StatusEffect::vulnerable());
                let text = format!(
                    "{} hexes {}! Vulnerable for 3 turns.",
                    self.actor_name(user),
                    self.actor_name(target)
                );
                self.say(text, MessageCategory::Combat);
                AbilityOutcome {
                    targets_hit: 1,
                    ..AbilityOutcome::quiet(kind)
                }
            }
        }
    }

    /// Applies `effect` to `target` if it is still alive.
    fn afflict(&mut self, target: EntityId, effect: StatusEffect) {
        if let Some(actor) = self.state.actor_mut(target).filter(|actor| actor.alive) {
            apply_status(actor, effect);
        }
    }

    fn actor_name(&self, id: EntityId) -> String {
        self.state
            .actor(id)
            .map(|actor| actor.name.clone())
            .unwrap_or_default()
    }

    /// Monsters face the player; an attacker on the far side of that facing
    /// along either axis is behind. Never true against the player.
    fn attacker_behind(&self, attacker: EntityId, target: EntityId) -> bool {
        let (Some(player), Some(atk), Some(def)) = (
            self.state.player(),
            self.state.actor(attacker),
            self.state.actor(target),
        ) else {
            return false;
        };
        if def.is_player() {
            return false;
        }
        let face = (
            (player.position.x - def.position.x).signum(),
            (player.position.y - def.position.y).signum(),
        );
        let from = (
            (atk.position.x - def.position.x).signum(),
            (atk.position.y - def.position.y).signum(),
        );
        (face.0 != 0 && from.0 == -face.0) || (face.1 != 0 && from.1 == -face.1)
    }
}
