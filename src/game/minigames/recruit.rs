//! NPC movement: calling a friend from town, sending one away, and the
//! auction that re-homes a released friend

use crate::core::{CardId, NpcId, PlayerId};
use crate::game::dice::RollKind;
use crate::game::{DiscardReason, GameEvent, GameLoop, NpcHolder, RecruitKind, TurnContext};
use crate::Result;

impl GameLoop<'_> {
    /// Ring a friend from the town pool
    ///
    /// A failed call still brings a random consolation friend while unused
    /// NPCs remain. The town is topped back up afterwards.
    pub fn call_friend(&mut self, ctx: &TurnContext, player: PlayerId) -> Result<()> {
        let town = self.game.npcs.town().to_vec();
        let Some(&fallback) = town.first() else {
            self.game.log(GameEvent::NoNpcAvailable {
                player: self.game.player_name(player),
            });
            return Ok(());
        };

        let Some(choice) = self.ask(player, |c, v| c.choose_friend_to_call(v, &town))? else {
            self.game.log(GameEvent::FriendCallDeclined {
                player: self.game.player_name(player),
            });
            return Ok(());
        };
        let npc = if town.contains(&choice) {
            choice
        } else {
            self.invalid_choice(player, format!("friend {}", choice));
            fallback
        };

        let target = ctx.call_friend_target(&self.game.config);
        if self.game.roll(player, RollKind::Recruit, target)?.success {
            self.game.npcs.transfer(npc, NpcHolder::Owned(player))?;
            self.game.adjust_stats(player, "ring en venn", 0.0, 1)?;
            self.welcome(player, npc, RecruitKind::CallFriend)?;
            if self.game.npcs.get(npc)?.brings_random_npc() {
                self.recruit_random(player, RecruitKind::BroughtAlong)?;
            }
        } else if self.recruit_random(player, RecruitKind::Consolation)?.is_none() {
            self.game.log(GameEvent::NoNpcAvailable {
                player: self.game.player_name(player),
            });
        }

        if !self.game.refill_town().is_empty() {
            self.log_town();
        }
        Ok(())
    }

    /// Spawn a never-drawn NPC straight into `player`'s roster
    fn recruit_random(&mut self, player: PlayerId, via: RecruitKind) -> Result<Option<NpcId>> {
        let game = &mut *self.game;
        let spawned = game.npcs.spawn_random(
            &game.catalog.npcs,
            NpcHolder::Owned(player),
            &mut *game.rng.borrow_mut(),
        );
        if let Some(npc) = spawned {
            self.welcome(player, npc, via)?;
        }
        Ok(spawned)
    }

    /// Announce a new owner and apply the NPC's on-recruit effects
    fn welcome(&mut self, player: PlayerId, npc: NpcId, via: RecruitKind) -> Result<()> {
        let npc = self.game.npcs.get(npc)?.clone();
        self.game.log(GameEvent::NpcRecruited {
            player: self.game.player_name(player),
            npc: npc.name.clone(),
            via,
        });
        self.game
            .update_player(player, &npc.name, |p| npc.apply_recruit_effects(p))?;
        Ok(())
    }

    /// Pay a card to release an owned NPC; a successful release goes to auction
    pub fn send_away_friend(&mut self, player: PlayerId, discard: CardId, npc: NpcId) -> Result<()> {
        self.game
            .discard_from_hand(player, discard, DiscardReason::SendAway)?;

        let name = self.game.npcs.name(npc);
        let target = self.game.config.release_target;
        if !self.game.roll(player, RollKind::Release, target)?.success {
            self.game.log(GameEvent::NpcReturned {
                player: self.game.player_name(player),
                npc: name,
            });
            return Ok(());
        }

        self.game.npcs.transfer(npc, NpcHolder::Retired)?;
        self.game.log(GameEvent::NpcReleased {
            player: self.game.player_name(player),
            npc: name,
        });
        self.auction(player, npc)
    }

    /// Every other player bids with a roll; lowest wins, ties roll again
    ///
    /// With nobody to bid the NPC stays retired.
    pub fn auction(&mut self, seller: PlayerId, npc: NpcId) -> Result<()> {
        let name = self.game.npcs.name(npc);
        let mut bidders: Vec<PlayerId> = self
            .game
            .player_ids()
            .into_iter()
            .filter(|&id| id != seller)
            .collect();
        if bidders.is_empty() {
            self.game.npcs.transfer(npc, NpcHolder::Retired)?;
            self.game.log(GameEvent::NpcRetired { npc: name });
            return Ok(());
        }

        let mut round = 0;
        let winner = loop {
            round += 1;
            let mut rolls = Vec::with_capacity(bidders.len());
            for &bidder in &bidders {
                let outcome = self.game.roll(bidder, RollKind::Auction, 0)?;
                rolls.push((bidder, outcome.total));
            }
            self.game.log(GameEvent::AuctionRound {
                npc: name.clone(),
                round,
                rolls: rolls
                    .iter()
                    .map(|&(id, total)| (self.game.player_name(id), total))
                    .collect(),
            });

            let lowest = rolls.iter().map(|&(_, total)| total).min().unwrap_or(0);
            bidders = rolls
                .into_iter()
                .filter(|&(_, total)| total == lowest)
                .map(|(id, _)| id)
                .collect();
            if let [single] = bidders.as_slice() {
                break *single;
            }
        };

        self.game.npcs.transfer(npc, NpcHolder::Owned(winner))?;
        self.welcome(winner, npc, RecruitKind::Auction)
    }
}
