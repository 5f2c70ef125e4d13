pub mod actor;
pub mod boss;
pub mod common;
pub mod status;
pub mod turn;

// Re-export actor types
pub use actor::{
    AbilityList, Actor, ActorKind, ActorTags, ClassKind, ClassProfile, RegenRates, ResourceKind,
    Resources,
};

// Re-export boss phase types
pub use boss::{BossPhase, BossState, ENRAGE_THRESHOLD_PCT, Telegraph, TelegraphKind};

// Re-export common types
pub use common::{EntityId, Position, ResourceMeter};

// Re-export status effect types
pub use status::{EffectPayload, StatKind, StatusEffect, StatusEffects, StatusKind};

// Re-export turn state
pub use turn::TurnState;
