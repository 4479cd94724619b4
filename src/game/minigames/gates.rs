//! Checks that can stop a player before they act: the bouncer at the door,
//! the rescue-or-vomit roll and the Dring block

use crate::core::{PlayerId, RoundStatus};
use crate::game::dice::RollKind;
use crate::game::{DiscardReason, GameEvent, GameLoop, TurnContext};
use crate::Result;

impl GameLoop<'_> {
    /// Every player rolls to get past the bouncer
    ///
    /// Target is `floor(intoxication) + 1`; a failed roll blocks the player
    /// for the rest of the phase.
    pub fn entry_gate(&mut self, _ctx: &TurnContext) -> Result<()> {
        for id in self.game.player_ids() {
            let target = self.game.get_player(id)?.intoxication.floor() as i32 + 1;
            let admitted = self.game.roll(id, RollKind::Entry, target)?.success;
            if !admitted {
                self.game.get_player_mut(id)?.status = RoundStatus::Blocked;
            }
            self.game.log(GameEvent::EntryGate {
                player: self.game.player_name(id),
                admitted,
            });
        }
        Ok(())
    }

    /// Start-of-turn rescue roll for players at or above the threshold
    ///
    /// Returns false if the player vomited and loses this turn.
    pub fn rescue_check(&mut self, ctx: &TurnContext, player: PlayerId) -> Result<bool> {
        let rule = ctx.rescue_rule(&self.game.config);
        if self.game.get_player(player)?.intoxication < rule.threshold {
            return Ok(true);
        }
        self.game.log(GameEvent::RescueRequired {
            player: self.game.player_name(player),
            threshold: rule.threshold,
        });
        if self.game.roll(player, RollKind::Rescue, rule.target)?.success {
            return Ok(true);
        }
        self.vomit(player)?;
        Ok(false)
    }

    /// Lose half the memory (rounded down) and 1 promille, drop a card, and
    /// everyone else gets +3 memory for witnessing it
    ///
    /// Negative memory also halves: -3 loses floor(-1.5) = -2 and ends at -1.
    pub fn vomit(&mut self, player: PlayerId) -> Result<()> {
        let memory = self.game.get_player(player)?.memory;
        let memory_lost = memory.div_euclid(2);
        self.game.adjust_stats(player, "spy", -1.0, -memory_lost)?;
        self.game.log(GameEvent::Vomited {
            player: self.game.player_name(player),
            memory_lost,
        });

        if let Some(card) = self.choose_discard(player, DiscardReason::Vomit)? {
            self.game.discard_from_hand(player, card, DiscardReason::Vomit)?;
        }

        for other in self.game.player_ids() {
            if other != player {
                self.game.adjust_stats(other, "spy", 0.0, 3)?;
            }
        }
        Ok(())
    }

    /// Owners of Dring roll to be let off; failing costs a card and the turn
    pub fn dring_check(&mut self, player: PlayerId) -> Result<bool> {
        let has_dring = self
            .game
            .npcs
            .owned_by(player)
            .iter()
            .any(|npc| npc.has_dring());
        if !has_dring {
            return Ok(true);
        }
        let target = self.game.config.dring_target;
        if self.game.roll(player, RollKind::Dring, target)?.success {
            return Ok(true);
        }

        self.game.log(GameEvent::DringBlocked {
            player: self.game.player_name(player),
        });
        if let Some(card) = self.choose_discard(player, DiscardReason::Dring)? {
            self.game.discard_from_hand(player, card, DiscardReason::Dring)?;
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{NpcDefinition, NpcEffect, Place, PlaceEffect, PlayerId, RoundStatus};
    use crate::game::dice::LoadedDice;
    use crate::game::minigames::testkit;
    use crate::game::{DiscardReason, GameEvent, GameLoop, NpcHolder, Phase, TurnContext};

    #[test]
    fn test_entry_target_follows_intoxication() {
        let mut game = testkit::game(&["Ola", "Kari"]);
        game.get_player_mut(PlayerId::new(0))
            .unwrap()
            .add_intoxication(2.5);
        // Ola: 3 + 1 sweet spot = 4 > 3; Kari: 1 >= 1
        game.set_dice(Box::new(LoadedDice::new([3, 1])));
        let controllers = testkit::scripted(&game, vec![vec![], vec![]]);
        GameLoop::new(&mut game, controllers)
            .entry_gate(&testkit::ctx(Phase::Vors))
            .unwrap();

        assert!(game.players.iter().all(|p| p.is_active()));
    }

    #[test]
    fn test_failed_entry_blocks() {
        let mut game = testkit::game(&["Ola"]);
        game.get_player_mut(PlayerId::new(0))
            .unwrap()
            .add_intoxication(4.0);
        game.set_dice(Box::new(LoadedDice::new([4])));
        let controllers = testkit::scripted(&game, vec![vec![]]);
        GameLoop::new(&mut game, controllers)
            .entry_gate(&testkit::ctx(Phase::Vors))
            .unwrap();

        assert_eq!(game.players[0].status, RoundStatus::Blocked);
        assert!(game.logger.events().contains(&GameEvent::EntryGate {
            player: "Ola".to_string(),
            admitted: false,
        }));
    }

    #[test]
    fn test_bouncer_only_on_first_visit() {
        let place = Place::new("O'Connors").with_bouncer();
        let mut game = testkit::game_with_places(&["Ola"], vec![place]);
        game.build_deck();
        let controllers = testkit::scripted(&game, vec![vec![]]);
        let mut game_loop = GameLoop::new(&mut game, controllers);
        game_loop.play_phase(Phase::Vors).unwrap();
        game_loop.play_phase(Phase::Fest).unwrap();

        let gates = game
            .logger
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EntryGate { .. }))
            .count();
        assert_eq!(gates, 1);
    }

    #[test]
    fn test_below_threshold_needs_no_rescue() {
        let mut game = testkit::game(&["Ola"]);
        game.get_player_mut(PlayerId::new(0))
            .unwrap()
            .add_intoxication(4.5);
        let controllers = testkit::scripted(&game, vec![vec![]]);
        let ok = GameLoop::new(&mut game, controllers)
            .rescue_check(&testkit::ctx(Phase::Fest), PlayerId::new(0))
            .unwrap();
        assert!(ok);
        assert!(game.logger.events().is_empty());
    }

    #[test]
    fn test_failed_rescue_vomits() {
        let mut game = testkit::game(&["Ola", "Kari"]);
        let ola = PlayerId::new(0);
        {
            let p = game.get_player_mut(ola).unwrap();
            p.add_intoxication(5.0);
            p.add_memory(7);
        }
        testkit::give(&mut game, ola, "Karaoke");
        testkit::give(&mut game, ola, "Shot");
        game.set_dice(Box::new(LoadedDice::new([1])));
        let controllers = testkit::scripted(&game, vec![vec![], vec![]]);
        let ok = GameLoop::new(&mut game, controllers)
            .rescue_check(&testkit::ctx(Phase::Fest), ola)
            .unwrap();

        assert!(!ok);
        let p = game.get_player(ola).unwrap();
        assert_eq!(p.memory, 4);
        assert_eq!(p.intoxication, 4.0);
        assert_eq!(p.hand.len(), 1);
        assert_eq!(game.discard.len(), 1);
        assert_eq!(game.get_player(PlayerId::new(1)).unwrap().memory, 3);
    }

    #[test]
    fn test_nach_override_at_herslebs() {
        let place = Place::new("Herslebs").with_effect(PlaceEffect::NachRescueThreshold(4.0));
        let mut game = testkit::game(&["Ola"]);
        let ola = PlayerId::new(0);
        game.get_player_mut(ola).unwrap().add_intoxication(4.0);
        // 3 meets the lowered target
        game.set_dice(Box::new(LoadedDice::new([3])));
        let controllers = testkit::scripted(&game, vec![vec![]]);
        let ctx = TurnContext::new(Phase::Nach, place);
        let ok = GameLoop::new(&mut game, controllers)
            .rescue_check(&ctx, ola)
            .unwrap();

        assert!(ok);
        assert!(game
            .logger
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::RescueRequired { threshold, .. } if *threshold == 4.0)));
    }

    #[test]
    fn test_vomit_with_empty_hand_and_no_memory() {
        let mut game = testkit::game(&["Ola"]);
        let ola = PlayerId::new(0);
        game.get_player_mut(ola).unwrap().add_intoxication(0.5);
        let controllers = testkit::scripted(&game, vec![vec![]]);
        GameLoop::new(&mut game, controllers).vomit(ola).unwrap();

        let p = game.get_player(ola).unwrap();
        assert_eq!(p.memory, 0);
        assert_eq!(p.intoxication, 0.0);
        assert!(game.discard.is_empty());
    }

    #[test]
    fn test_vomit_halves_negative_memory() {
        let mut game = testkit::game(&["Ola", "Kari"]);
        let ola = PlayerId::new(0);
        game.get_player_mut(ola).unwrap().add_memory(-3);
        let controllers = testkit::scripted(&game, vec![vec![], vec![]]);
        GameLoop::new(&mut game, controllers).vomit(ola).unwrap();

        assert_eq!(game.players[0].memory, -1);
        assert_eq!(game.players[1].memory, 3);
        assert!(game.logger.events().contains(&GameEvent::Vomited {
            player: "Ola".to_string(),
            memory_lost: -2,
        }));
    }

    #[test]
    fn test_dring_failure_costs_card_and_turn() {
        let mut game = testkit::game(&["Ola"]);
        let ola = PlayerId::new(0);
        let dring = NpcDefinition::new("Dring").with_effect(NpcEffect::DringEffect);
        game.npcs.spawn(&dring, NpcHolder::Owned(ola));
        let card = testkit::give(&mut game, ola, "Karaoke");
        game.set_dice(Box::new(LoadedDice::new([2])));
        let controllers = testkit::scripted(&game, vec![vec![]]);
        let ok = GameLoop::new(&mut game, controllers)
            .dring_check(ola)
            .unwrap();

        assert!(!ok);
        assert!(game.discard.contains(card));
        assert!(game.logger.events().contains(&GameEvent::CardDiscarded {
            player: "Ola".to_string(),
            card: "Karaoke".to_string(),
            reason: DiscardReason::Dring,
        }));
    }

    #[test]
    fn test_without_dring_no_roll() {
        let mut game = testkit::game(&["Ola"]);
        let controllers = testkit::scripted(&game, vec![vec![]]);
        let ok = GameLoop::new(&mut game, controllers)
            .dring_check(PlayerId::new(0))
            .unwrap();
        assert!(ok);
        assert!(game.logger.events().is_empty());
    }
}
