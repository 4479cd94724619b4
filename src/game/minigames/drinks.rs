//! Social drinking specials: know-the-beer, bong and a round for everyone

use crate::core::{DrinkKind, PlayerId};
use crate::game::{GameEvent, GameLoop, TurnContext};
use crate::Result;

/// Intoxication needed to recognise the beer
const KNOW_BEER_LEVEL: f64 = 2.0;

impl GameLoop<'_> {
    /// Everyone drunk enough to know the beer gets memory
    ///
    /// With the enhancement the player who played the card gets 4 instead
    /// of 2. A sober player who played it loses 1 memory (never below 0).
    pub fn know_beer(&mut self, player: PlayerId, enhanced: bool) -> Result<()> {
        for id in self.game.player_ids() {
            if self.game.get_player(id)?.intoxication >= KNOW_BEER_LEVEL {
                let gain = if enhanced && id == player { 4 } else { 2 };
                self.game.adjust_stats(id, "kjenner ølet", 0.0, gain)?;
            }
        }

        let p = self.game.get_player(player)?;
        if p.intoxication < KNOW_BEER_LEVEL && p.memory > 0 {
            self.game.adjust_stats(player, "kjenner ølet", 0.0, -1)?;
        }
        Ok(())
    }

    /// Pick beer, drink or shot and play it as if it came from the hand
    pub fn bong(&mut self, ctx: &TurnContext, player: PlayerId) -> Result<()> {
        let options = DrinkKind::ALL;
        let choice = self.ask(player, |c, v| c.choose_drink(v, &options))?;
        let drink = if options.contains(&choice) {
            choice
        } else {
            self.invalid_choice(player, format!("drink {:?}", choice));
            options[0]
        };
        self.game.log(GameEvent::DrinkChosen {
            player: self.game.player_name(player),
            drink,
        });
        self.play_template(ctx, player, drink)
    }

    /// Every player, in turn order, drinks a beer (with the chug offer)
    pub fn round_drinks(&mut self, ctx: &TurnContext, _player: PlayerId) -> Result<()> {
        for id in self.game.player_ids() {
            self.play_template(ctx, id, DrinkKind::Beer)?;
        }
        Ok(())
    }
}
