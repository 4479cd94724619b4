//! Catalog loaders
//!
//! JSON catalogs for cards, places and NPCs, and game setup from them

pub mod catalog;
pub mod game_init;

pub use catalog::Catalog;
pub use game_init::{GameInitializer, PlayerIdentity};
