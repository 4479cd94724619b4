//! SMØR - rules engine for a three-phase drinking party card game
//!
//! Players collect memories (points) across Vors, Fest and Nach while their
//! intoxication climbs. Cards, places and recruited friends modify each
//! other through a fixed effect pipeline, and dice decide the mini-games.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod zones;

pub use error::{Result, SmorError};
