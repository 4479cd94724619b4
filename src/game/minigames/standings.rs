//! Optional standings bonuses: the leader's jersey and the pill

use crate::core::{Player, PlayerId};
use crate::game::{GameEvent, GameLoop};
use crate::Result;
use std::cmp::Ordering;

/// The only player for whom `better` says they beat everyone else
fn unique_best(players: &[Player], better: impl Fn(&Player, &Player) -> bool) -> Option<PlayerId> {
    players
        .iter()
        .find(|p| players.iter().all(|o| o.id == p.id || better(p, o)))
        .map(|p| p.id)
}

fn cmp_intox(a: &Player, b: &Player) -> Ordering {
    a.intoxication.total_cmp(&b.intoxication)
}

impl GameLoop<'_> {
    /// Leader jersey (+2 memory) if `player` is the single most intoxicated
    /// player, and the pill (-1 on rolls) if they are the single least
    ///
    /// Runs at the start of `player`'s own turn, so nobody else is touched
    /// except a previous pill holder losing the pill. Needs at least two
    /// players; ties hand out nothing.
    pub fn apply_standings_bonuses(&mut self, player: PlayerId) -> Result<()> {
        if self.game.players.len() < 2 {
            return Ok(());
        }

        let leader = unique_best(&self.game.players, |p, o| {
            cmp_intox(p, o) == Ordering::Greater
        });
        if leader == Some(player) && self.game.get_player(player)?.intoxication > 0.0 {
            self.game.adjust_stats(player, "ledertrøye", 0.0, 2)?;
            self.game.log(GameEvent::LeaderJersey {
                player: self.game.player_name(player),
            });
        }

        let lowest = unique_best(&self.game.players, |p, o| {
            cmp_intox(p, o) == Ordering::Less
        });
        if lowest != Some(player) || self.game.get_player(player)?.has_pill {
            return Ok(());
        }
        for p in self.game.players.iter_mut().filter(|p| p.has_pill) {
            p.has_pill = false;
            p.dice_modifier = 0;
        }
        let p = self.game.get_player_mut(player)?;
        p.has_pill = true;
        p.dice_modifier = -1;
        self.game.log(GameEvent::PillPassed {
            player: self.game.player_name(player),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::PlayerId;
    use crate::game::minigames::testkit;
    use crate::game::{GameEvent, GameLoop, Phase};

    fn drunk(game: &mut crate::game::GameState, levels: &[f64]) {
        for (p, &level) in game.players.iter_mut().zip(levels) {
            p.add_intoxication(level);
        }
    }

    #[test]
    fn test_jersey_and_pill() {
        let mut game = testkit::game(&["Ola", "Kari", "Per"]);
        drunk(&mut game, &[1.0, 3.0, 2.0]);
        let controllers = testkit::scripted(&game, vec![vec![]; 3]);
        let mut game_loop = GameLoop::new(&mut game, controllers);
        for id in 0..3 {
            game_loop.apply_standings_bonuses(PlayerId::new(id)).unwrap();
        }

        let memories: Vec<i32> = game.players.iter().map(|p| p.memory).collect();
        assert_eq!(memories, vec![0, 2, 0]);
        assert!(game.players[0].has_pill);
        assert_eq!(game.players[0].dice_modifier, -1);
        assert_eq!(game.players[0].standard_dice_bonus(), 0);
        assert!(!game.players[2].has_pill);
    }

    #[test]
    fn test_only_the_turn_player_is_rewarded() {
        let mut game = testkit::game(&["Ola", "Kari", "Per"]);
        drunk(&mut game, &[3.0, 2.0, 1.0]);
        let controllers = testkit::scripted(&game, vec![vec![]; 3]);
        GameLoop::new(&mut game, controllers)
            .apply_standings_bonuses(PlayerId::new(1))
            .unwrap();

        assert!(game.players.iter().all(|p| p.memory == 0 && !p.has_pill));
        assert!(!game.logger.events().iter().any(|e| matches!(
            e,
            GameEvent::LeaderJersey { .. } | GameEvent::PillPassed { .. }
        )));
    }

    #[test]
    fn test_leader_gains_nothing_on_others_turns() {
        let mut game = testkit::game(&["Ola", "Kari"]);
        game.config.standings_bonuses = true;
        drunk(&mut game, &[3.0, 1.0]);
        let kari = PlayerId::new(1);
        testkit::give(&mut game, kari, "Karaoke");
        let controllers = testkit::scripted(&game, vec![vec![], vec![]]);
        GameLoop::new(&mut game, controllers)
            .player_turn(&testkit::ctx(Phase::Fest), kari)
            .unwrap();

        assert_eq!(game.players[0].memory, 0);
        // Karaoke's own memory, no jersey
        let karaoke = game.catalog.card("Karaoke").unwrap().memory_delta;
        assert_eq!(game.players[1].memory, karaoke);
        assert!(game.players[1].has_pill);
    }

    #[test]
    fn test_pill_moves_to_new_lowest() {
        let mut game = testkit::game(&["Ola", "Kari"]);
        drunk(&mut game, &[1.0, 2.0]);
        let controllers = testkit::scripted(&game, vec![vec![]; 2]);
        let mut game_loop = GameLoop::new(&mut game, controllers);
        game_loop.apply_standings_bonuses(PlayerId::new(0)).unwrap();
        game_loop
            .game
            .get_player_mut(PlayerId::new(0))
            .unwrap()
            .add_intoxication(2.0);
        // still Ola's pill until Kari's own turn
        game_loop.apply_standings_bonuses(PlayerId::new(0)).unwrap();
        assert!(game_loop.game.players[0].has_pill);
        game_loop.apply_standings_bonuses(PlayerId::new(1)).unwrap();

        let ola = game.get_player(PlayerId::new(0)).unwrap();
        let kari = game.get_player(PlayerId::new(1)).unwrap();
        assert!(!ola.has_pill);
        assert_eq!(ola.dice_modifier, 0);
        assert!(kari.has_pill);
        let passes = game
            .logger
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PillPassed { .. }))
            .count();
        assert_eq!(passes, 2);
    }

    #[test]
    fn test_ties_give_nothing() {
        let mut game = testkit::game(&["Ola", "Kari"]);
        drunk(&mut game, &[2.0, 2.0]);
        let controllers = testkit::scripted(&game, vec![vec![]; 2]);
        let mut game_loop = GameLoop::new(&mut game, controllers);
        game_loop.apply_standings_bonuses(PlayerId::new(0)).unwrap();
        game_loop.apply_standings_bonuses(PlayerId::new(1)).unwrap();

        assert!(game.players.iter().all(|p| p.memory == 0 && !p.has_pill));
    }
}
