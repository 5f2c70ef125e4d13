//! Boss phase bookkeeping.
//!
//! Two independent one-shot tracks: the summon waves walk the `BossPhase`
//! chain forward, and enrage is a single marker on `BossState`. Neither can
//! fire twice because the state itself records that it happened.

use crate::state::Position;

/// Minion-wave stages of a boss fight, in order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BossPhase {
    #[default]
    Normal,
    /// First minion wave called at half health.
    Reinforced,
    /// Second minion wave called at a quarter health.
    Overrun,
}

impl BossPhase {
    pub const fn next(self) -> Option<Self> {
        match self {
            BossPhase::Normal => Some(BossPhase::Reinforced),
            BossPhase::Reinforced => Some(BossPhase::Overrun),
            BossPhase::Overrun => None,
        }
    }

    /// Hp percentage at or below which this phase is entered.
    pub const fn threshold_pct(self) -> u32 {
        match self {
            BossPhase::Normal => 100,
            BossPhase::Reinforced => 50,
            BossPhase::Overrun => 25,
        }
    }
}

/// Hp percentage at or below which a boss enrages.
pub const ENRAGE_THRESHOLD_PCT: u32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TelegraphKind {
    /// Heavy melee blow against the marked target.
    Crush,
    /// Area breath centred on the marked cell.
    Breath,
}

/// A heavy attack announced one turn before it lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Telegraph {
    pub kind: TelegraphKind,
    pub target: Position,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossState {
    pub phase: BossPhase,
    /// Set once on enrage: +speed and a bonus action every later turn.
    pub enraged: bool,
    pub telegraph: Option<Telegraph>,
}

impl BossState {
    pub fn is_enraged(&self) -> bool {
        self.enraged
    }
}
