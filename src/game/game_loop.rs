//! Game loop implementation
//!
//! Drives the night: Vors, Fest and Nach in order, each at a random place,
//! dealing hands and running player turns until every admitted player has
//! emptied their hand.

use crate::core::{CardId, Npc, PlayerId, RoundStatus};
use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::{GameEvent, GameStage, GameState, Phase, Standing, TurnContext, VerbosityLevel};
use crate::{Result, SmorError};

/// Result of running a game to completion
#[derive(Debug, Clone)]
pub struct GameResult {
    /// First player with the strictly highest memory
    pub winner: Option<PlayerId>,
    pub standings: Vec<Standing>,
}

/// Game loop manager
///
/// Owns the controllers for the whole game, so that mini-games can ask any
/// player (not just the active one) for a decision.
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    controllers: Vec<Box<dyn PlayerController>>,
}

impl<'a> GameLoop<'a> {
    /// Create a game loop; there must be one controller per player
    pub fn new(game: &'a mut GameState, controllers: Vec<Box<dyn PlayerController>>) -> Self {
        GameLoop { game, controllers }
    }

    /// Set verbosity level for output
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.game.logger.set_verbosity(verbosity);
        self
    }

    fn check_controllers(&self) -> Result<()> {
        if self.game.players.is_empty() {
            return Err(SmorError::InvalidAction("no players".to_string()));
        }
        for player in &self.game.players {
            let count = self
                .controllers
                .iter()
                .filter(|c| c.player_id() == player.id)
                .count();
            if count != 1 {
                return Err(SmorError::InvalidAction(format!(
                    "player {} has {} controllers",
                    player.name, count
                )));
            }
        }
        Ok(())
    }

    /// Ask `player`'s controller for a decision
    pub(crate) fn ask<R>(
        &mut self,
        player: PlayerId,
        f: impl FnOnce(&mut dyn PlayerController, &GameStateView) -> R,
    ) -> Result<R> {
        let view = GameStateView::new(self.game, player);
        let controller = self
            .controllers
            .iter_mut()
            .find(|c| c.player_id() == player)
            .ok_or_else(|| {
                SmorError::InvalidAction(format!("no controller for player {}", player))
            })?;
        Ok(f(controller.as_mut(), &view))
    }

    pub(crate) fn invalid_choice(&self, player: PlayerId, choice: String) {
        self.game.log(GameEvent::InvalidChoice {
            player: self.game.player_name(player),
            choice,
        });
    }

    /// Have `player` pick a hand card to discard
    ///
    /// Returns None for an empty hand.
    pub(crate) fn choose_discard(
        &mut self,
        player: PlayerId,
        reason: crate::game::DiscardReason,
    ) -> Result<Option<CardId>> {
        let hand = self.game.get_player(player)?.hand.cards.clone();
        let Some(&first) = hand.first() else {
            return Ok(None);
        };
        let choice = self.ask(player, |c, v| c.choose_card_to_discard(v, &hand, reason))?;
        if hand.contains(&choice) {
            Ok(Some(choice))
        } else {
            self.invalid_choice(player, format!("discard card {}", choice));
            Ok(Some(first))
        }
    }

    /// Run the whole night and report the winner
    pub fn run_game(&mut self) -> Result<GameResult> {
        self.check_controllers()?;
        self.game.log(GameEvent::GameStarted {
            players: self.game.players.iter().map(|p| p.name.to_string()).collect(),
        });

        if self.game.deck.is_empty() {
            self.game.build_deck();
        }
        self.game.refill_town();

        while let GameStage::Playing(phase) = self.game.stage.advance() {
            self.play_phase(phase)?;
        }
        Ok(self.end_game())
    }

    /// Pick the place for a phase uniformly at random
    fn choose_place(&self) -> Result<crate::core::Place> {
        let places = &self.game.catalog.places;
        if places.is_empty() {
            return Err(SmorError::InvalidCatalog("no places".to_string()));
        }
        let idx = self.game.random_index(places.len());
        Ok(places[idx].clone())
    }

    /// Run one phase from entry to the last card
    pub fn play_phase(&mut self, phase: Phase) -> Result<()> {
        for player in self.game.players.iter_mut() {
            player.status = RoundStatus::Active;
        }

        let place = self.choose_place()?;
        let ctx = TurnContext::new(phase, place);
        self.game.log(GameEvent::PhaseStarted {
            phase,
            place: ctx.place.name.clone(),
            text: ctx.place.text.clone(),
            effects: ctx.place.describe_effects(phase),
        });
        self.log_town();

        if self.game.visited_places.insert(ctx.place.name.clone()) && ctx.place.has_bouncer {
            self.entry_gate(&ctx)?;
        }

        let ids = self.game.player_ids();
        for &id in &ids {
            if self.game.get_player(id)?.is_active() {
                self.game.deal_hand(id)?;
                let place = &ctx.place;
                self.game
                    .update_player(id, &place.name, |p| place.apply_round_start(p))?;
            } else {
                self.game.discard_hand(id)?;
            }
        }

        loop {
            let mut anyone_played = false;
            for &id in &ids {
                let player = self.game.get_player(id)?;
                if !player.is_active() || player.hand.is_empty() {
                    continue;
                }
                self.player_turn(&ctx, id)?;
                anyone_played = true;
            }
            if !anyone_played {
                break;
            }
        }

        self.game.log(GameEvent::PhaseEnded {
            phase,
            standings: self.game.standings(),
        });
        Ok(())
    }

    pub(crate) fn log_town(&self) {
        let npcs = self
            .game
            .npcs
            .town()
            .iter()
            .map(|&id| self.game.npcs.name(id))
            .collect();
        self.game.log(GameEvent::TownPool { npcs });
    }

    /// One player turn: turn-start effects, rescue and dring checks, then an action
    pub fn player_turn(&mut self, ctx: &TurnContext, player: PlayerId) -> Result<()> {
        {
            let p = self.game.get_player(player)?;
            self.game.log(GameEvent::TurnStarted {
                player: p.name.to_string(),
                intoxication: p.intoxication,
                memory: p.memory,
            });
        }

        let roster: Vec<Npc> = self
            .game
            .npcs
            .owned_by(player)
            .into_iter()
            .cloned()
            .collect();
        for npc in &roster {
            self.game
                .update_player(player, &npc.name, |p| npc.apply_turn_start_effects(p))?;
        }

        if self.game.config.standings_bonuses {
            self.apply_standings_bonuses(player)?;
        }

        if !self.rescue_check(ctx, player)? {
            return Ok(());
        }
        if !self.dring_check(player)? {
            return Ok(());
        }

        let hand = self.game.get_player(player)?.hand.cards.clone();
        if hand.is_empty() {
            return Ok(());
        }

        let action = self.ask(player, |c, v| c.choose_turn_action(v, &hand))?;
        match self.validate_turn_action(player, &hand, action) {
            TurnAction::PlayCard(card) => self.play_from_hand(ctx, player, card),
            TurnAction::TradeCards(first, second) => {
                if self.trade_cards(player, first, second)? {
                    Ok(())
                } else {
                    self.forced_play(ctx, player)
                }
            }
            TurnAction::SendAwayFriend { discard, npc } => {
                self.send_away_friend(player, discard, npc)
            }
        }
    }

    /// Replace an impossible action with playing the first hand card
    fn validate_turn_action(
        &self,
        player: PlayerId,
        hand: &[CardId],
        action: TurnAction,
    ) -> TurnAction {
        let valid = match action {
            TurnAction::PlayCard(card) => hand.contains(&card),
            TurnAction::TradeCards(first, second) => {
                first != second && hand.contains(&first) && hand.contains(&second)
            }
            TurnAction::SendAwayFriend { discard, npc } => {
                hand.contains(&discard) && self.game.npcs.roster(player).contains(&npc)
            }
        };
        if valid {
            action
        } else {
            self.invalid_choice(player, format!("{:?}", action));
            TurnAction::PlayCard(hand[0])
        }
    }

    /// After an aborted trade the turn still has to play a card
    fn forced_play(&mut self, ctx: &TurnContext, player: PlayerId) -> Result<()> {
        let hand = self.game.get_player(player)?.hand.cards.clone();
        let Some(&first) = hand.first() else {
            return Ok(());
        };
        let card = match self.ask(player, |c, v| c.choose_turn_action(v, &hand))? {
            TurnAction::PlayCard(card) if hand.contains(&card) => card,
            other => {
                self.invalid_choice(player, format!("{:?}", other));
                first
            }
        };
        self.play_from_hand(ctx, player, card)
    }

    /// Move a card from hand to the discard pile and resolve it
    pub fn play_from_hand(&mut self, ctx: &TurnContext, player: PlayerId, card: CardId) -> Result<()> {
        if !self.game.get_player_mut(player)?.hand.remove(card) {
            return Err(SmorError::InvalidAction(format!(
                "card {} is not in the hand of player {}",
                card, player
            )));
        }
        self.game.discard.add(card);
        self.play_card(ctx, player, card)
    }

    fn end_game(&mut self) -> GameResult {
        let standings = self.game.standings();
        let winner = self.game.leader();
        self.game.log(GameEvent::GameOver {
            standings: standings.clone(),
            winner: winner.map(|id| self.game.player_name(id)),
        });

        let game: &GameState = self.game;
        for controller in self.controllers.iter_mut() {
            let id = controller.player_id();
            controller.on_game_end(&GameStateView::new(game, id), winner == Some(id));
        }

        GameResult { winner, standings }
    }
}
