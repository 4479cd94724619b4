//! Random AI controller
//!
//! Makes uniformly random choices. AI players only ever play cards; they
//! never trade or send friends away.

use crate::core::{CardId, DrinkKind, NpcId, PlayerId};
use crate::game::controller::{GameStateView, PlayerController, TurnAction};
use crate::game::DiscardReason;
use rand::seq::SliceRandom;
use rand::Rng;

/// A controller that makes random choices
pub struct RandomController {
    player_id: PlayerId,
    rng: Box<dyn rand::RngCore>,
}

impl RandomController {
    /// Create a new random controller with default RNG
    pub fn new(player_id: PlayerId) -> Self {
        RandomController {
            player_id,
            rng: Box::new(rand::thread_rng()),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        use rand::SeedableRng;
        RandomController {
            player_id,
            rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }

    fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        options.choose(&mut self.rng).copied()
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_turn_action(&mut self, _view: &GameStateView, hand: &[CardId]) -> TurnAction {
        // the engine never asks with an empty hand; CardId 0 is rejected
        // by validation if it ever does
        TurnAction::PlayCard(self.pick(hand).unwrap_or(CardId::new(0)))
    }

    fn choose_chug(&mut self, _view: &GameStateView) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn choose_drink(&mut self, _view: &GameStateView, options: &[DrinkKind]) -> DrinkKind {
        self.pick(options).unwrap_or(DrinkKind::Beer)
    }

    fn choose_friend_to_call(&mut self, _view: &GameStateView, town: &[NpcId]) -> Option<NpcId> {
        self.pick(town)
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
