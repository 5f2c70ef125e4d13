//! Deterministic combat resolution and enemy AI for a turn-based dungeon crawler.
//!
//! `crawler-core` defines the canonical rules (damage, status effects,
//! abilities, monster behaviours, boss phases) over a plain [`GameState`].
//! All state mutation flows through [`engine::GameEngine`], which borrows the
//! state together with a read-only [`Env`], the [`GameConfig`], a seeded
//! [`GameRng`] and a [`MessageSink`]. Given the same seed and inputs, a run is
//! reproducible message for message.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod geometry;
pub mod state;

pub use action::{Ability, AbilityKind, AbilityOutcome, ActionError, TargetShape};
pub use ai::{Behavior, astar, find_flank_position, find_retreat_position};
pub use combat::{AttackOutcome, TickReport};
pub use config::{AiConfig, BossConfig, CombatConfig, GameConfig, ProgressionConfig};
pub use engine::{GameEngine, GameEvent, TurnStart, initiative_order};
pub use env::{
    Env, GameRng, GridMap, GridParseError, MapDimensions, MapOracle, Message, MessageCategory,
    MessageLog, MessageSink, MonsterFactory, OracleError, TileKind, TracingSink,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Actor, ActorKind, ActorTags, BossPhase, BossState, ClassKind, EffectPayload, EntityId,
    GameState, Position, ResourceKind, ResourceMeter, StatKind, StatusEffect, StatusEffects,
    StatusKind, Telegraph, TelegraphKind, TurnState,
};
