//! Engine context and turn pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! borrows the state, the read-only environment, the configuration, the single
//! seeded random stream and the message sink for the duration of one phase of
//! play. Attacks, abilities and monster turns are all methods on it, so every
//! mutation sees the same collaborators.
mod events;
mod turns;

pub use events::GameEvent;
pub use turns::{TurnStart, initiative_order};

use crate::config::GameConfig;
use crate::env::{Env, GameRng, MessageCategory, MessageSink};
use crate::state::GameState;

/// Mutable view over one run of the simulation.
///
/// Fields are crate-visible so rule modules can borrow disjoint parts
/// (an actor from `state` and the `log`) at the same time.
pub struct GameEngine<'a> {
    pub(crate) state: &'a mut GameState,
    pub(crate) env: Env<'a>,
    pub(crate) config: &'a GameConfig,
    pub(crate) rng: &'a mut GameRng,
    pub(crate) log: &'a mut dyn MessageSink,
    events: Vec<GameEvent>,
}

impl<'a> GameEngine<'a> {
    pub fn new(
        state: &'a mut GameState,
        env: Env<'a>,
        config: &'a GameConfig,
        rng: &'a mut GameRng,
        log: &'a mut dyn MessageSink,
    ) -> Self {
        Self {
            state,
            env,
            config,
            rng,
            log,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    pub fn env(&self) -> Env<'a> {
        self.env
    }

    /// Pushes a user-visible message.
    pub fn say(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.log.push(text.into(), category);
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded and not yet drained.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Increments the global turn counter.
    pub fn advance_turn(&mut self) -> u64 {
        self.state.turn.number += 1;
        self.state.turn.number
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        tracing::debug!(?event, "game event");
        self.events.push(event);
    }
}

impl core::fmt::Debug for GameEngine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEngine")
            .field("turn", &self.state.turn)
            .field("env", &self.env)
            .field("pending_events", &self.events.len())
            .finish()
    }
}
