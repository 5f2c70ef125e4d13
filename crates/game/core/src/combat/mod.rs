//! Combat resolution system.
//!
//! Pure rules over single actors live in free functions ([`apply_damage`],
//! [`tick_status_effects`], [`check_level_up`]). Anything that touches two
//! actors or the kill bookkeeping is a [`GameEngine`](crate::engine::GameEngine)
//! method built on top of them.
//!
//! # Core Functions
//!
//! - `calc_base_damage`: attack minus half defense, plus a variance roll
//! - `apply_damage`: evade, vulnerable, divine shield and shield absorb, then hp
//! - `melee_attack` / `ranged_attack` / `aoe_attack`: engine attack primitives
//! - `tick_status_effects`: per-turn damage over time and expiry

pub mod attack;
pub mod damage;
pub mod los;
pub mod progression;
pub mod status;

pub use attack::AttackOutcome;
pub use damage::{apply_damage, calc_base_damage, is_critical, reference_damage};
pub use los::{bresenham_line, has_line_of_sight};
pub use progression::{check_level_up, regenerate};
pub use status::{TickReport, apply_status, tick_status_effects};
