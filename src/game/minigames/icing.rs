//! Ice'ing: everyone rolls against the initiator, close rolls drink

use crate::core::PlayerId;
use crate::game::dice::RollKind;
use crate::game::{GameEvent, GameLoop};
use crate::Result;

impl GameLoop<'_> {
    /// Every other player whose roll lands within 1 of the initiator's drinks
    /// 0.5; the initiator earns one memory per match
    pub fn icing(&mut self, initiator: PlayerId) -> Result<()> {
        let mark = self.game.roll(initiator, RollKind::Icing, 0)?.total;

        let mut matches = 0;
        for id in self.game.player_ids() {
            if id == initiator {
                continue;
            }
            let total = self.game.roll(id, RollKind::Icing, 0)?.total;
            if (total - mark).abs() <= 1 {
                matches += 1;
                self.game.adjust_stats(id, "ice'ing", 0.5, 0)?;
                self.game.log(GameEvent::IcingMatch {
                    initiator: self.game.player_name(initiator),
                    player: self.game.player_name(id),
                });
            }
        }

        if matches > 0 {
            self.game.adjust_stats(initiator, "ice'ing", 0.0, matches)?;
        }
        Ok(())
    }
}
