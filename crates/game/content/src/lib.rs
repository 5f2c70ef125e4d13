//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Monster templates with floor scaling (the [`MonsterCatalog`] monster factory)
//! - Map layouts (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content reaches the rules engine only through the `crawler-core` oracle
//! traits and the config record.

pub mod monsters;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use monsters::{MonsterCatalog, MonsterTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader, MonsterLoader};
