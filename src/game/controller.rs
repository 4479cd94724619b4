//! Player controller trait and game state view
//!
//! This module defines the interface between the game engine and player
//! controllers (AI or human). The engine calls the controller whenever a
//! decision is needed; the controller inspects a read-only view of the game
//! state to make its choice.

use crate::core::{Card, CardId, DrinkKind, Npc, NpcId, Place, Player, PlayerId};
use crate::game::{DiscardReason, GameLogger, GameState};

/// What a player does with a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// Play a card from hand through the effect pipeline
    PlayCard(CardId),

    /// Discard two hand cards to pick one of three from the deck
    TradeCards(CardId, CardId),

    /// Discard a card and try to release an owned NPC to auction
    SendAwayFriend { discard: CardId, npc: NpcId },
}

/// Read-only view of game state for controllers
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// The viewing player
    pub fn player(&self) -> Option<&'a Player> {
        self.game.get_player(self.player_id).ok()
    }

    /// All players, in turn order
    pub fn players(&self) -> &'a [Player] {
        &self.game.players
    }

    /// Cards in this player's hand
    pub fn hand(&self) -> &'a [CardId] {
        self.player().map(|p| p.hand.as_slice()).unwrap_or(&[])
    }

    pub fn card(&self, card_id: CardId) -> Option<&'a Card> {
        self.game.cards.get(card_id).ok()
    }

    pub fn card_name(&self, card_id: CardId) -> String {
        self.game.card_name(card_id)
    }

    pub fn npc(&self, npc_id: NpcId) -> Option<&'a Npc> {
        self.game.npcs.get(npc_id).ok()
    }

    pub fn npc_name(&self, npc_id: NpcId) -> String {
        self.game.npcs.name(npc_id)
    }

    /// NPCs this player owns, oldest first
    pub fn owned_npcs(&self) -> Vec<NpcId> {
        self.game.npcs.roster(self.player_id)
    }

    pub fn town(&self) -> &'a [NpcId] {
        self.game.npcs.town()
    }

    pub fn deck_size(&self) -> usize {
        self.game.deck.len()
    }

    /// Intoxication and memory of the viewing player
    pub fn stats(&self) -> (f64, i32) {
        self.player()
            .map(|p| (p.intoxication, p.memory))
            .unwrap_or((0.0, 0))
    }

    pub fn place(&self, name: &str) -> Option<&'a Place> {
        self.game.catalog.place(name)
    }

    pub fn logger(&self) -> &'a GameLogger {
        &self.game.logger
    }
}

/// Player controller trait
///
/// Implement this trait to create AI players or connect to a UI. Each method
/// receives the valid options; a controller returning something outside them
/// is overridden by the engine (first option) and the choice is logged.
pub trait PlayerController {
    /// Get the player ID this controller is responsible for
    fn player_id(&self) -> PlayerId;

    /// Choose what to do this turn; `hand` is never empty
    fn choose_turn_action(&mut self, view: &GameStateView, hand: &[CardId]) -> TurnAction;

    /// Attempt to chug the beer about to be drunk?
    fn choose_chug(&mut self, view: &GameStateView) -> bool;

    /// Pick a drink for a bong
    fn choose_drink(&mut self, view: &GameStateView, options: &[DrinkKind]) -> DrinkKind;

    /// Pick a friend to call from the town pool, or None to hang up
    fn choose_friend_to_call(&mut self, view: &GameStateView, town: &[NpcId]) -> Option<NpcId>;

    /// Pick a card to lose without effect
    fn choose_card_to_discard(
        &mut self,
        view: &GameStateView,
        hand: &[CardId],
        reason: DiscardReason,
    ) -> CardId;

    /// Pick one of the offered trade cards to keep
    fn choose_trade_card(&mut self, view: &GameStateView, offered: &[CardId]) -> CardId;

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}
