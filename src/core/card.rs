//! Card templates and card instances

use crate::core::{CardId, CardName, DrinkKind, GameEntity, SpecialEffect};
use serde::{Deserialize, Serialize};

/// A card template from the catalog
///
/// Many card instances can share one definition; the deck holds
/// `copies` instances of each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: CardName,
    pub intoxication_delta: f64,
    pub memory_delta: i32,
    pub special: Option<SpecialEffect>,
    /// Set on the beer, drink and shot templates
    pub drink: Option<DrinkKind>,
    pub text: String,
    /// Number of copies in a fresh deck (None = use the configured default)
    pub copies: Option<u32>,
}

impl CardDefinition {
    pub fn new(name: impl Into<CardName>, intoxication_delta: f64, memory_delta: i32) -> Self {
        CardDefinition {
            name: name.into(),
            intoxication_delta,
            memory_delta,
            special: None,
            drink: None,
            text: String::new(),
            copies: None,
        }
    }

    pub fn with_special(mut self, special: SpecialEffect) -> Self {
        self.special = Some(special);
        self
    }

    pub fn with_drink(mut self, drink: DrinkKind) -> Self {
        self.drink = Some(drink);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = Some(copies);
        self
    }

    /// Create a card instance of this template
    pub fn instantiate(&self, id: CardId) -> Card {
        Card {
            id,
            name: self.name.clone(),
            intoxication_delta: self.intoxication_delta,
            memory_delta: self.memory_delta,
            special: self.special,
            drink: self.drink,
            text: self.text.clone(),
        }
    }
}

/// A card instance during gameplay
///
/// Cards are immutable value objects; only their location (deck, hand,
/// discard pile) changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: CardName,
    pub intoxication_delta: f64,
    pub memory_delta: i32,
    pub special: Option<SpecialEffect>,
    pub drink: Option<DrinkKind>,
    pub text: String,
}

impl Card {
    pub fn is_drink(&self, kind: DrinkKind) -> bool {
        self.drink == Some(kind)
    }

    /// Beer or drink template (the ones that place and NPC doubling target)
    pub fn is_beer_or_drink(&self) -> bool {
        matches!(self.drink, Some(DrinkKind::Beer) | Some(DrinkKind::Drink))
    }
}

impl GameEntity<Card> for Card {
    fn id(&self) -> CardId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiate_copies_template() {
        let def = CardDefinition::new("Drikk en øl", 0.5, 0)
            .with_drink(DrinkKind::Beer)
            .with_text("Chug for minner");
        let card = def.instantiate(CardId::new(3));

        assert_eq!(card.id, CardId::new(3));
        assert_eq!(card.name.as_str(), "Drikk en øl");
        assert_eq!(card.intoxication_delta, 0.5);
        assert!(card.is_drink(DrinkKind::Beer));
        assert!(card.is_beer_or_drink());
        assert_eq!(card.special, None);
    }

    #[test]
    fn test_shot_is_not_beer_or_drink() {
        let card = CardDefinition::new("Shot", 1.0, 1)
            .with_drink(DrinkKind::Shot)
            .instantiate(CardId::new(0));
        assert!(!card.is_beer_or_drink());
    }
}
