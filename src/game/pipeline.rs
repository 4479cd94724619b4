//! The effect pipeline run for every card play
//!
//! Order: chug (beer only), base deltas, place phase effect, NPC card hooks,
//! then the card's special effect. Bong and round drinks call back into
//! [`GameLoop::play_card`] with a fresh template card; those templates carry
//! no special effect, so recursion stops one level down.

use crate::core::{CardEnhancement, CardId, DrinkKind, Npc, PlayerId, SpecialEffect};
use crate::game::dice::RollKind;
use crate::game::{GameEvent, GameLoop, TurnContext};
use crate::Result;

impl GameLoop<'_> {
    /// Resolve `card` for `player`
    ///
    /// The card must already be out of the hand (or be a transient template).
    pub fn play_card(&mut self, ctx: &TurnContext, player: PlayerId, card: CardId) -> Result<()> {
        let card = self.game.card(card)?.clone();
        self.game.log(GameEvent::CardPlayed {
            player: self.game.player_name(player),
            card: card.name.to_string(),
        });

        if card.is_drink(DrinkKind::Beer) {
            self.chug(player)?;
        }

        self.game.update_player(player, card.name.as_str(), |p| {
            p.add_intoxication(card.intoxication_delta);
            p.add_memory(card.memory_delta);
            p.record_played(&card);
        })?;

        let place = &ctx.place;
        self.game
            .update_player(player, &place.name, |p| place.apply_phase_effect(p, ctx.phase))?;

        let roster: Vec<Npc> = self
            .game
            .npcs
            .owned_by(player)
            .into_iter()
            .cloned()
            .collect();
        let mut enhancement = None;
        for npc in &roster {
            let signal = self
                .game
                .update_player(player, &npc.name, |p| npc.apply_card_effects(p, &card))?;
            if signal.is_some() {
                enhancement = signal;
            }
        }

        match card.special {
            Some(SpecialEffect::CallFriend) => self.call_friend(ctx, player),
            Some(SpecialEffect::KnowBeer) => {
                self.know_beer(player, enhancement == Some(CardEnhancement::KnowBeer))
            }
            Some(SpecialEffect::BongChoice) => self.bong(ctx, player),
            Some(SpecialEffect::RoundDrinks) => self.round_drinks(ctx, player),
            Some(SpecialEffect::Icing) => self.icing(player),
            None => Ok(()),
        }
    }

    /// Play a fresh instance of a drink template for `player`
    ///
    /// A catalog without that template makes this a logged no-op.
    pub fn play_template(&mut self, ctx: &TurnContext, player: PlayerId, kind: DrinkKind) -> Result<()> {
        let Some(def) = self.game.catalog.drink_template(kind).cloned() else {
            self.game.log(GameEvent::TemplateMissing { drink: kind });
            return Ok(());
        };
        let card = self.game.spawn_card(&def);
        self.play_card(ctx, player, card)
    }

    /// Offer to chug the beer: +2 memory on success, -1 on failure
    pub fn chug(&mut self, player: PlayerId) -> Result<()> {
        if !self.ask(player, |c, v| c.choose_chug(v))? {
            self.game.log(GameEvent::ChugDeclined {
                player: self.game.player_name(player),
            });
            return Ok(());
        }
        let target = self.game.config.chug_target;
        let roll = self.game.roll(player, RollKind::Chug, target)?;
        let memory = if roll.success { 2 } else { -1 };
        self.game.adjust_stats(player, "chug", 0.0, memory)
    }
}
