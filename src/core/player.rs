//! Player representation

use crate::core::{Card, CardName, DrinkKind, GameEntity, PlayerId, PlayerName};
use crate::zones::{CardZone, Zone};
use serde::{Deserialize, Serialize};

/// Upper bound of the intoxication scale
pub const MAX_INTOXICATION: f64 = 5.0;

/// Whether a player takes part in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundStatus {
    #[default]
    Active,
    /// Refused at the door; sits out the rest of the phase
    Blocked,
}

/// The most recently played card, read by place phase effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPlayed {
    pub name: CardName,
    pub drink: Option<DrinkKind>,
    pub intoxication_delta: f64,
}

/// Represents a player in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub is_human: bool,

    /// Always within `[0, MAX_INTOXICATION]`
    pub intoxication: f64,

    /// Score; the highest at the end of the night wins
    pub memory: i32,

    pub hand: CardZone,
    pub status: RoundStatus,
    pub last_played: Option<LastPlayed>,

    /// Temporary dice modifier (the "pill" penalty)
    pub dice_modifier: i32,
    pub has_pill: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, is_human: bool) -> Self {
        Player {
            id,
            name: name.into(),
            is_human,
            intoxication: 0.0,
            memory: 0,
            hand: CardZone::new(Zone::Hand),
            status: RoundStatus::Active,
            last_played: None,
            dice_modifier: 0,
            has_pill: false,
        }
    }

    /// Add (or remove) intoxication, clamped to `[0, MAX_INTOXICATION]`
    pub fn add_intoxication(&mut self, amount: f64) {
        self.intoxication = (self.intoxication + amount).clamp(0.0, MAX_INTOXICATION);
    }

    pub fn add_memory(&mut self, amount: i32) {
        self.memory += amount;
    }

    pub fn record_played(&mut self, card: &Card) {
        self.last_played = Some(LastPlayed {
            name: card.name.clone(),
            drink: card.drink,
            intoxication_delta: card.intoxication_delta,
        });
    }

    pub fn last_played_name(&self) -> Option<&str> {
        self.last_played.as_ref().map(|l| l.name.as_str())
    }

    /// The "sweet spot" bonus plus any temporary modifier
    pub fn standard_dice_bonus(&self) -> i32 {
        let sweet_spot = if (1.0..=3.0).contains(&self.intoxication) {
            1
        } else {
            0
        };
        sweet_spot + self.dice_modifier
    }

    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }
}

impl GameEntity<Player> for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardDefinition, CardId};

    #[test]
    fn test_player_creation() {
        let player = Player::new(PlayerId::new(1), "Sård", true);
        assert_eq!(player.name.as_str(), "Sård");
        assert_eq!(player.intoxication, 0.0);
        assert_eq!(player.memory, 0);
        assert!(player.hand.is_empty());
        assert!(player.is_active());
        assert_eq!(player.last_played_name(), None);
    }

    #[test]
    fn test_intoxication_is_clamped() {
        let mut player = Player::new(PlayerId::new(0), "Ola", false);
        player.add_intoxication(-1.0);
        assert_eq!(player.intoxication, 0.0);

        for _ in 0..20 {
            player.add_intoxication(0.5);
        }
        assert_eq!(player.intoxication, MAX_INTOXICATION);

        player.add_intoxication(-1.5);
        assert_eq!(player.intoxication, 3.5);
    }

    #[test]
    fn test_intoxication_stays_in_range_for_mixed_sequences() {
        let steps = [0.5, 3.0, 4.0, -0.5, -7.0, 1.0, 1.0, 2.5, -0.5, 10.0, -2.0];
        let mut player = Player::new(PlayerId::new(0), "Ola", false);
        for step in steps {
            player.add_intoxication(step);
            assert!((0.0..=MAX_INTOXICATION).contains(&player.intoxication));
        }
    }

    #[test]
    fn test_sweet_spot_bonus() {
        let mut player = Player::new(PlayerId::new(0), "Ola", false);
        assert_eq!(player.standard_dice_bonus(), 0);
        player.add_intoxication(1.0);
        assert_eq!(player.standard_dice_bonus(), 1);
        player.add_intoxication(2.0);
        assert_eq!(player.standard_dice_bonus(), 1);
        player.add_intoxication(0.5);
        assert_eq!(player.standard_dice_bonus(), 0);

        player.dice_modifier = -1;
        assert_eq!(player.standard_dice_bonus(), -1);
    }

    #[test]
    fn test_record_played() {
        let mut player = Player::new(PlayerId::new(0), "Ola", false);
        let card = CardDefinition::new("Drikk en øl", 0.5, 0)
            .with_drink(DrinkKind::Beer)
            .instantiate(CardId::new(9));
        player.record_played(&card);

        let last = player.last_played.as_ref().unwrap();
        assert_eq!(last.name.as_str(), "Drikk en øl");
        assert_eq!(last.drink, Some(DrinkKind::Beer));
        assert_eq!(last.intoxication_delta, 0.5);
    }
}
