use crate::state::{BossPhase, EntityId, Position};

/// Notable outcomes recorded while the engine runs.
///
/// Collaborators outside the rules (loot tables, UI, persistence) react to
/// these instead of being called back from inside combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// `killer` is `None` for deaths caused by poison or bleed.
    ActorSlain {
        victim: EntityId,
        killer: Option<EntityId>,
    },
    /// Loot should be rolled at the victim's last position.
    LootDropped {
        victim: EntityId,
        floor: u32,
        position: Position,
        boss: bool,
    },
    LevelUp {
        actor: EntityId,
        level: u32,
    },
    MinionsSummoned {
        boss: EntityId,
        minions: Vec<EntityId>,
    },
    BossPhaseChanged {
        boss: EntityId,
        from: BossPhase,
        to: BossPhase,
    },
    BossEnraged {
        boss: EntityId,
    },
}
