//! Fixed script controller for deterministic testing
//!
//! This controller follows a predetermined sequence of choice indices,
//! making it ideal for testing specific game scenarios. Once the script is
//! exhausted, it defaults to choosing the first option (index 0).

use crate::core::{CardId, DrinkKind, NpcId, PlayerId};
use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::DiscardReason;
use std::collections::VecDeque;

/// A controller that follows a fixed script of choices for testing
///
/// Each decision consumes one index from the script:
///
/// - turn action: index into the hand, played as a card
/// - chug: 0 = attempt, anything else = decline
/// - drink, discard, trade: index into the options (clamped)
/// - call a friend: index into the town; out of range = hang up
///
/// Trades and send-aways are queued separately with [`queue_action`];
/// a queued action is used for the next turn instead of the script.
///
/// [`queue_action`]: FixedScriptController::queue_action
#[derive(Debug, Clone)]
pub struct FixedScriptController {
    player_id: PlayerId,
    /// The predetermined sequence of choice indices
    script: Vec<usize>,
    /// Current position in the script
    pub current_index: usize,
    actions: VecDeque<TurnAction>,
}

impl FixedScriptController {
    /// Create a new scripted controller
    ///
    /// ```
    /// use smor_engine::game::FixedScriptController;
    /// use smor_engine::core::PlayerId;
    ///
    /// // choose options 0, 1, 2, 0, then default to 0
    /// let controller = FixedScriptController::new(PlayerId::new(0), vec![0, 1, 2, 0]);
    /// ```
    pub fn new(player_id: PlayerId, script: Vec<usize>) -> Self {
        FixedScriptController {
            player_id,
            script,
            current_index: 0,
            actions: VecDeque::new(),
        }
    }

    /// Use `action` for an upcoming turn
    pub fn queue_action(&mut self, action: TurnAction) {
        self.actions.push_back(action);
    }

    pub fn with_action(mut self, action: TurnAction) -> Self {
        self.queue_action(action);
        self
    }

    /// Get the next choice index from the script, or 0 once exhausted
    fn next_choice(&mut self) -> usize {
        if self.current_index < self.script.len() {
            let choice = self.script[self.current_index];
            self.current_index += 1;
            choice
        } else {
            0
        }
    }

    fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        let choice = self.next_choice();
        let clamped = choice.min(options.len().saturating_sub(1));
        options.get(clamped).copied()
    }
}

impl PlayerController for FixedScriptController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_turn_action(&mut self, _view: &GameStateView, hand: &[CardId]) -> TurnAction {
        if let Some(action) = self.actions.pop_front() {
            return action;
        }
        TurnAction::PlayCard(self.pick(hand).unwrap_or(CardId::new(0)))
    }

    fn choose_chug(&mut self, _view: &GameStateView) -> bool {
        self.next_choice() == 0
    }

    fn choose_drink(&mut self, _view: &GameStateView, options: &[DrinkKind]) -> DrinkKind {
        self.pick(options).unwrap_or(DrinkKind::Beer)
    }

    fn choose_friend_to_call(&mut self, _view: &GameStateView, town: &[NpcId]) -> Option<NpcId> {
        let choice = self.next_choice();
        town.get(choice).copied()
    }

    fn choose_card_to_discard(
        &mut self,
        _view: &GameStateView,
        hand: &[CardId],
        _reason: DiscardReason,
    ) -> CardId {
        self.pick(hand).unwrap_or(CardId::new(0))
    }

    fn choose_trade_card(&mut self, _view: &GameStateView, offered: &[CardId]) -> CardId {
        self.pick(offered).unwrap_or(CardId::new(0))
    }
}
