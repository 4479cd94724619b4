//! Core game types and entities

pub mod card;
pub mod effects;
pub mod entity;
pub mod npc;
pub mod place;
pub mod player;
pub mod types;

pub use card::{Card, CardDefinition};
pub use effects::{DrinkKind, NpcEffect, PlaceEffect, PlaceEffectKind, SpecialEffect};
pub use entity::{EntityId, EntityStore, GameEntity};
pub use npc::{CardEnhancement, Npc, NpcDefinition};
pub use place::Place;
pub use player::{LastPlayed, Player, RoundStatus, MAX_INTOXICATION};
pub use types::{lookup_key, CardName, PlayerName};

pub type CardId = EntityId<Card>;
pub type NpcId = EntityId<Npc>;
pub type PlayerId = EntityId<Player>;
