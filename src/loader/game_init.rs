//! Game initialization from catalogs
//!
//! Creates seeded, ready-to-run games from a catalog and a player list

use crate::game::{GameConfig, GameState};
use crate::loader::Catalog;
use crate::{Result, SmorError};

/// Who sits at the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub name: String,
    pub is_human: bool,
}

impl PlayerIdentity {
    pub fn human(name: impl Into<String>) -> Self {
        PlayerIdentity {
            name: name.into(),
            is_human: true,
        }
    }

    pub fn ai(name: impl Into<String>) -> Self {
        PlayerIdentity {
            name: name.into(),
            is_human: false,
        }
    }
}

/// Game builder for initializing games from a catalog
pub struct GameInitializer {
    catalog: Catalog,
    config: GameConfig,
}

impl GameInitializer {
    pub fn new(catalog: Catalog) -> Self {
        GameInitializer {
            catalog,
            config: GameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seat the players, shuffle a fresh deck and fill the town
    ///
    /// The same seed always yields the same deck order, places and dice.
    pub fn init_game(&self, players: &[PlayerIdentity], seed: u64) -> Result<GameState> {
        if players.is_empty() {
            return Err(SmorError::InvalidAction(
                "a game needs at least one player".to_string(),
            ));
        }

        let mut game = GameState::new(self.catalog.clone(), self.config.clone());
        game.seed_rng(seed);
        for identity in players {
            game.add_player(identity.name.clone(), identity.is_human);
        }
        game.build_deck();
        game.refill_town();
        Ok(game)
    }
}
