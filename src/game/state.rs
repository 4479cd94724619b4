//! Main game state structure

use crate::core::{Card, CardDefinition, CardId, EntityStore, NpcId, Player, PlayerId};
use crate::game::dice::{self, DieSource, RngDice, RollKind, RollOutcome};
use crate::game::{
    DiscardReason, GameConfig, GameEvent, GameLogger, GameStage, NpcRegistry, Standing,
};
use crate::loader::Catalog;
use crate::zones::{CardZone, Zone};
use crate::{Result, SmorError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rustc_hash::FxHashSet;
use std::cell::RefCell;

/// Offset between the game seed and the dice seed, so the dice stream does
/// not mirror shuffles and draws
const DICE_SEED_SALT: u64 = 0x5EED_D1CE;

/// Complete game state
///
/// Owns everything the rules mutate: players, the shared deck and discard
/// pile, the NPC registry and the set of places already visited.
#[derive(Debug)]
pub struct GameState {
    pub catalog: Catalog,
    pub config: GameConfig,

    /// Every card instance ever created (deck copies and transient templates)
    pub cards: EntityStore<Card>,

    /// All players, in turn order
    pub players: Vec<Player>,

    /// Shared draw pile; the end of the vector is the top
    pub deck: CardZone,
    pub discard: CardZone,

    pub npcs: NpcRegistry,

    /// Names of places whose entry gate has been run
    pub visited_places: FxHashSet<String>,

    pub stage: GameStage,

    /// RNG for shuffles, place choice and NPC draws
    ///
    /// Wrapped in RefCell so it can be drawn from while other fields are
    /// borrowed.
    pub rng: RefCell<ChaCha12Rng>,

    pub dice: Box<dyn DieSource>,

    /// Centralized logger for game events
    pub logger: GameLogger,
}

impl GameState {
    /// Create an empty game (no players, no deck) over a catalog
    pub fn new(catalog: Catalog, config: GameConfig) -> Self {
        GameState {
            catalog,
            config,
            cards: EntityStore::new(),
            players: Vec::new(),
            deck: CardZone::new(Zone::Deck),
            discard: CardZone::new(Zone::Discard),
            npcs: NpcRegistry::new(),
            visited_places: FxHashSet::default(),
            stage: GameStage::default(),
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(0)),
            dice: Box::new(RngDice::with_seed(DICE_SEED_SALT)),
            logger: GameLogger::new(),
        }
    }

    /// Reseed the game RNG and the dice
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
        self.dice = Box::new(RngDice::with_seed(seed ^ DICE_SEED_SALT));
    }

    /// Replace the die (tests load it with fixed rolls)
    pub fn set_dice(&mut self, dice: Box<dyn DieSource>) {
        self.dice = dice;
    }

    pub fn add_player(&mut self, name: impl Into<String>, is_human: bool) -> PlayerId {
        let id = PlayerId::new(self.players.len() as u32);
        let name: String = name.into();
        self.players.push(Player::new(id, name, is_human));
        id
    }

    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(SmorError::EntityNotFound(id.as_u32()))
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SmorError::EntityNotFound(id.as_u32()))
    }

    /// Player IDs in turn order
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn player_name(&self, id: PlayerId) -> String {
        self.get_player(id)
            .map(|p| p.name.to_string())
            .unwrap_or_else(|_| format!("Player {}", id))
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.cards.get(id)
    }

    pub fn card_name(&self, id: CardId) -> String {
        self.cards
            .get(id)
            .map(|c| c.name.to_string())
            .unwrap_or_else(|_| format!("Card {}", id))
    }

    pub fn log(&self, event: GameEvent) {
        self.logger.log(event);
    }

    /// Uniform index in `0..len`
    pub fn random_index(&self, len: usize) -> usize {
        self.rng.borrow_mut().gen_range(0..len)
    }

    // ------------------------------------------------------------------
    // Deck
    // ------------------------------------------------------------------

    /// Fill the deck with fresh instances of every card template, shuffled
    pub fn build_deck(&mut self) {
        for def in &self.catalog.cards {
            let copies = def.copies.unwrap_or(self.config.copies_per_card);
            for _ in 0..copies {
                let id = self.cards.next_id();
                self.cards.insert(id, def.instantiate(id));
                self.deck.add(id);
            }
        }
        self.deck.shuffle(&mut *self.rng.borrow_mut());
    }

    /// Draw the top card, rebuilding the deck from scratch when it is empty
    pub fn draw_card(&mut self) -> Result<CardId> {
        if self.deck.is_empty() {
            self.build_deck();
        }
        self.deck
            .draw_top()
            .ok_or_else(|| SmorError::InvalidCatalog("deck has no cards".to_string()))
    }

    /// Create a one-off instance of a template outside the deck cycle
    pub fn spawn_card(&mut self, def: &CardDefinition) -> CardId {
        let id = self.cards.next_id();
        self.cards.insert(id, def.instantiate(id));
        id
    }

    /// Top the town pool back up from never-drawn NPCs
    pub fn refill_town(&mut self) -> Vec<NpcId> {
        let size = self.config.town_size;
        self.npcs
            .refill_town(&self.catalog.npcs, size, &mut *self.rng.borrow_mut())
    }

    /// Move a player's whole hand to the discard pile
    pub fn discard_hand(&mut self, player: PlayerId) -> Result<()> {
        let leftovers = self.get_player_mut(player)?.hand.take_all();
        for card in leftovers {
            self.discard.add(card);
        }
        Ok(())
    }

    /// Discard leftovers, then draw a fresh hand
    pub fn deal_hand(&mut self, player: PlayerId) -> Result<usize> {
        self.discard_hand(player)?;
        for _ in 0..self.config.hand_size {
            let card = self.draw_card()?;
            self.get_player_mut(player)?.hand.add(card);
        }
        let dealt = self.get_player(player)?.hand.len();
        self.log(GameEvent::HandDealt {
            player: self.player_name(player),
            cards: dealt,
        });
        Ok(dealt)
    }

    /// Discard one hand card without applying its effect
    pub fn discard_from_hand(
        &mut self,
        player: PlayerId,
        card: CardId,
        reason: DiscardReason,
    ) -> Result<()> {
        if !self.get_player_mut(player)?.hand.remove(card) {
            return Err(SmorError::InvalidAction(format!(
                "card {} is not in the hand of player {}",
                card, player
            )));
        }
        self.discard.add(card);
        self.log(GameEvent::CardDiscarded {
            player: self.player_name(player),
            card: self.card_name(card),
            reason,
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Stats and dice
    // ------------------------------------------------------------------

    /// Run a mutation on a player and log the resulting stat change
    pub fn update_player<R>(
        &mut self,
        player: PlayerId,
        source: &str,
        f: impl FnOnce(&mut Player) -> R,
    ) -> Result<R> {
        let p = self.get_player_mut(player)?;
        let (intox_before, memory_before) = (p.intoxication, p.memory);
        let result = f(p);
        let (intoxication, memory) = (p.intoxication, p.memory);
        let name = p.name.to_string();

        let intoxication_delta = intoxication - intox_before;
        let memory_delta = memory - memory_before;
        if intoxication_delta != 0.0 || memory_delta != 0 {
            self.log(GameEvent::StatChanged {
                player: name,
                source: source.to_string(),
                intoxication_delta,
                memory_delta,
                intoxication,
                memory,
            });
        }
        Ok(result)
    }

    pub fn adjust_stats(
        &mut self,
        player: PlayerId,
        source: &str,
        intoxication: f64,
        memory: i32,
    ) -> Result<()> {
        self.update_player(player, source, |p| {
            p.add_intoxication(intoxication);
            p.add_memory(memory);
        })
    }

    /// Roll for `player`, stacking the bonuses `kind` allows
    pub fn roll(&mut self, player: PlayerId, kind: RollKind, target: i32) -> Result<RollOutcome> {
        let base = self.dice.roll_d6();
        let p = self.get_player(player)?;
        let outcome = dice::resolve(base, p, self.npcs.owned_by(player), kind, target);
        self.log(GameEvent::DiceRolled {
            player: p.name.to_string(),
            kind,
            outcome,
        });
        Ok(outcome)
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .map(|p| Standing {
                player: p.name.to_string(),
                intoxication: p.intoxication,
                memory: p.memory,
                npcs: self
                    .npcs
                    .owned_by(p.id)
                    .into_iter()
                    .map(|npc| npc.name.clone())
                    .collect(),
            })
            .collect()
    }

    /// First player (in turn order) with the strictly highest memory
    pub fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<&Player> = None;
        for p in &self.players {
            if best.map_or(true, |b| p.memory > b.memory) {
                best = Some(p);
            }
        }
        best.map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DrinkKind;
    use crate::game::dice::LoadedDice;

    fn catalog() -> Catalog {
        Catalog {
            cards: vec![
                CardDefinition::new("Drikk en øl", 0.5, 0)
                    .with_drink(DrinkKind::Beer)
                    .with_copies(2),
                CardDefinition::new("Karaoke", 0.0, 1).with_copies(1),
            ],
            places: vec![crate::core::Place::new("Oslo Plaza")],
            npcs: vec![],
        }
    }

    #[test]
    fn test_build_deck_uses_copies() {
        let mut game = GameState::new(catalog(), GameConfig::default());
        game.build_deck();
        assert_eq!(game.deck.len(), 3);
        assert_eq!(game.cards.len(), 3);
    }

    #[test]
    fn test_draw_rebuilds_empty_deck() {
        let mut game = GameState::new(catalog(), GameConfig::default());
        game.build_deck();
        let mut drawn = FxHashSet::default();
        for _ in 0..7 {
            assert!(drawn.insert(game.draw_card().unwrap()));
        }
        // 7 draws from 3-card decks: two rebuilds, all fresh instances
        assert_eq!(game.cards.len(), 9);
    }

    #[test]
    fn test_deal_discards_leftovers() {
        let mut game = GameState::new(catalog(), GameConfig::default());
        let ola = game.add_player("Ola", true);
        game.build_deck();

        assert_eq!(game.deal_hand(ola).unwrap(), 5);
        let first_hand = game.get_player(ola).unwrap().hand.cards.clone();
        game.deal_hand(ola).unwrap();

        for card in first_hand {
            assert!(game.discard.contains(card));
            assert!(!game.get_player(ola).unwrap().hand.contains(card));
        }
    }

    #[test]
    fn test_hand_and_deck_disjoint() {
        let mut game = GameState::new(catalog(), GameConfig::default());
        let ola = game.add_player("Ola", true);
        let kari = game.add_player("Kari", false);
        game.build_deck();
        game.deal_hand(ola).unwrap();
        game.deal_hand(kari).unwrap();

        for p in &game.players {
            for card in p.hand.as_slice() {
                assert!(!game.deck.contains(*card));
            }
        }
    }

    #[test]
    fn test_update_player_logs_change() {
        let mut game = GameState::new(catalog(), GameConfig::default());
        game.logger.enable_capture();
        let ola = game.add_player("Ola", true);

        game.adjust_stats(ola, "test", 0.5, 2).unwrap();
        game.adjust_stats(ola, "noop", 0.0, 0).unwrap();

        let events = game.logger.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            GameEvent::StatChanged { memory_delta: 2, memory: 2, .. }
        ));
    }

    #[test]
    fn test_roll_uses_loaded_dice() {
        let mut game = GameState::new(catalog(), GameConfig::default());
        let ola = game.add_player("Ola", true);
        game.set_dice(Box::new(LoadedDice::new([6])));
        let outcome = game.roll(ola, RollKind::Chug, 6).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.base, 6);
    }

    #[test]
    fn test_leader_is_first_maximal() {
        let mut game = GameState::new(catalog(), GameConfig::default());
        let ola = game.add_player("Ola", true);
        let kari = game.add_player("Kari", false);
        game.adjust_stats(ola, "test", 0.0, 3).unwrap();
        game.adjust_stats(kari, "test", 0.0, 3).unwrap();
        assert_eq!(game.leader(), Some(ola));

        game.adjust_stats(kari, "test", 0.0, 1).unwrap();
        assert_eq!(game.leader(), Some(kari));
    }
}
