//! Status effect records owned by each actor.
//!
//! Effects are timed conditions with a kind-specific payload. An actor holds
//! at most one effect of each kind; [`StatusEffects::add`] replaces, except for
//! bleed which accumulates.
//!
//! # Turn-based Duration
//!
//! `duration` counts the remaining turn starts. The status engine in
//! `combat::status` decrements it and removes the effect when it reaches zero.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Discriminant of an [`EffectPayload`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    Stunned,
    Slowed,
    Poisoned,
    Bleed,
    Shielded,
    Buffed,
    Evading,
    DivineShield,
    Vulnerable,
}

impl StatusKind {
    /// Human-readable label ("Divine shield").
    pub fn label(self) -> String {
        let mut label = self.as_ref().replacen('_', " ", 1);
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        label
    }
}

/// Actor stats a buff can modify.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
}

/// Kind-specific data carried by an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectPayload {
    /// Loses the next turn.
    Stunned,
    /// Skips every other global turn.
    Slowed,
    Poisoned { damage: u32 },
    Bleed { damage: u32 },
    /// Absorbs incoming damage before hp.
    Shielded { absorb: u32 },
    /// Stat delta that is reverted on expiry.
    Buffed { stat: StatKind, amount: i32 },
    /// Negates the next attack.
    Evading,
    /// Percentage of incoming damage removed.
    DivineShield { reduction_pct: u32 },
    /// Takes 25% extra damage.
    Vulnerable,
}

impl EffectPayload {
    pub const fn kind(&self) -> StatusKind {
        match self {
            EffectPayload::Stunned => StatusKind::Stunned,
            EffectPayload::Slowed => StatusKind::Slowed,
            EffectPayload::Poisoned { .. } => StatusKind::Poisoned,
            EffectPayload::Bleed { .. } => StatusKind::Bleed,
            EffectPayload::Shielded { .. } => StatusKind::Shielded,
            EffectPayload::Buffed { .. } => StatusKind::Buffed,
            EffectPayload::Evading => StatusKind::Evading,
            EffectPayload::DivineShield { .. } => StatusKind::DivineShield,
            EffectPayload::Vulnerable => StatusKind::Vulnerable,
        }
    }

    /// Damage dealt at each turn start, if this is a damage-over-time effect.
    pub const fn tick_damage(&self) -> Option<u32> {
        match *self {
            EffectPayload::Poisoned { damage } | EffectPayload::Bleed { damage } => Some(damage),
            _ => None,
        }
    }
}

/// A single timed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub duration: u32,
    pub payload: EffectPayload,
}

impl StatusEffect {
    pub const fn new(payload: EffectPayload, duration: u32) -> Self {
        Self { duration, payload }
    }

    pub const fn kind(&self) -> StatusKind {
        self.payload.kind()
    }

    // ===== default parameters per kind =====

    pub const fn stunned() -> Self {
        Self::new(EffectPayload::Stunned, 1)
    }

    pub const fn slowed() -> Self {
        Self::new(EffectPayload::Slowed, 3)
    }

    pub const fn poisoned() -> Self {
        Self::new(EffectPayload::Poisoned { damage: 3 }, 5)
    }

    pub const fn bleed() -> Self {
        Self::new(EffectPayload::Bleed { damage: 2 }, 3)
    }

    pub const fn shielded(absorb: u32) -> Self {
        Self::new(EffectPayload::Shielded { absorb }, 0)
    }

    pub const fn buffed(stat: StatKind, amount: i32) -> Self {
        Self::new(EffectPayload::Buffed { stat, amount }, 3)
    }

    pub const fn evading() -> Self {
        Self::new(EffectPayload::Evading, 1)
    }

    pub const fn divine_shield() -> Self {
        Self::new(EffectPayload::DivineShield { reduction_pct: 50 }, 2)
    }

    pub const fn vulnerable() -> Self {
        Self::new(EffectPayload::Vulnerable, 3)
    }

    /// Overrides the default duration (builder pattern).
    #[must_use]
    pub const fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }
}

/// Active status effects on an actor, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Adds an effect, returning the effect it replaced (if any).
    ///
    /// A second bleed adds its damage to the existing one and keeps the longer
    /// duration; every other kind replaces the previous instance and moves to
    /// the end of the list.
    pub fn add(&mut self, effect: StatusEffect) -> Option<StatusEffect> {
        if let EffectPayload::Bleed { damage } = effect.payload {
            if let Some(existing) = self.get_mut(StatusKind::Bleed) {
                if let EffectPayload::Bleed { damage: current } = &mut existing.payload {
                    *current = current.saturating_add(damage);
                }
                existing.duration = existing.duration.max(effect.duration);
                return None;
            }
        }

        let replaced = self.remove(effect.kind());
        // One slot per kind, so a push after removal cannot overflow.
        self.effects.push(effect);
        replaced
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: StatusKind) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|e| e.kind() == kind)
    }

    /// Removes the effect of `kind`, returning it.
    pub fn remove(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind() == kind)?;
        Some(self.effects.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub(crate) fn at(&self, index: usize) -> Option<&StatusEffect> {
        self.effects.get(index)
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> Option<&mut StatusEffect> {
        self.effects.get_mut(index)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> StatusEffect {
        self.effects.remove(index)
    }
}
