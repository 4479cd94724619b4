//! Card trade: two hand cards for one of three from the deck

use crate::core::{CardId, PlayerId};
use crate::game::{DiscardReason, GameEvent, GameLoop};
use crate::{Result, SmorError};

/// Cards offered from the deck in a trade
const OFFERED: usize = 3;

impl GameLoop<'_> {
    /// Trade `first` and `second` for one of three deck cards
    ///
    /// With fewer than three cards left in the deck the hand is restored
    /// unchanged and false is returned.
    pub fn trade_cards(&mut self, player: PlayerId, first: CardId, second: CardId) -> Result<bool> {
        let hand = &mut self.game.get_player_mut(player)?.hand;
        let (Some(first_idx), Some(second_idx)) = (hand.position(first), hand.position(second))
        else {
            return Err(SmorError::InvalidAction(format!(
                "cards {} and {} are not both in the hand",
                first, second
            )));
        };
        if first == second {
            return Err(SmorError::InvalidAction(format!(
                "cannot trade card {} twice",
                first
            )));
        }
        hand.remove(first);
        hand.remove(second);
        let mut removed = vec![(first_idx, first), (second_idx, second)];

        // hand and deck never share an instance, so the whole deck is eligible
        let eligible: Vec<CardId> = self.game.deck.as_slice().to_vec();

        if eligible.len() < OFFERED {
            removed.sort_by_key(|&(idx, _)| idx);
            let hand = &mut self.game.get_player_mut(player)?.hand;
            for (idx, card) in removed {
                hand.insert_at(idx, card);
            }
            self.game.log(GameEvent::TradeAborted {
                player: self.game.player_name(player),
                eligible: eligible.len(),
            });
            return Ok(false);
        }

        let mut pool = eligible;
        let mut offered = Vec::with_capacity(OFFERED);
        for _ in 0..OFFERED {
            let idx = self.game.random_index(pool.len());
            let card = pool.swap_remove(idx);
            self.game.deck.remove(card);
            offered.push(card);
        }

        let choice = self.ask(player, |c, v| c.choose_trade_card(v, &offered))?;
        let kept = if offered.contains(&choice) {
            choice
        } else {
            self.invalid_choice(player, format!("trade card {}", choice));
            offered[0]
        };
        self.game.get_player_mut(player)?.hand.add(kept);
        for card in offered.into_iter().filter(|&c| c != kept) {
            self.game.deck.add(card);
        }

        for (_, card) in removed {
            self.game.discard.add(card);
            self.game.log(GameEvent::CardDiscarded {
                player: self.game.player_name(player),
                card: self.game.card_name(card),
                reason: DiscardReason::Trade,
            });
        }
        self.game.log(GameEvent::TradeCompleted {
            player: self.game.player_name(player),
            kept: self.game.card_name(kept),
        });
        Ok(true)
    }
}
