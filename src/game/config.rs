//! Rule constants that a table may tune

use serde::{Deserialize, Serialize};

/// Game configuration
///
/// Every field has a default, so a partial JSON object (or none at all) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards dealt to each admitted player at phase start
    pub hand_size: usize,
    /// Deck copies per card template when the catalog gives no `count`
    pub copies_per_card: u32,
    /// Number of NPCs kept waiting in town
    pub town_size: usize,

    pub rescue_threshold: f64,
    pub rescue_target: i32,
    /// Target used when a place lowers the rescue threshold during Nach
    pub nach_rescue_target: i32,

    pub chug_target: i32,
    pub dring_target: i32,
    pub release_target: i32,
    pub call_friend_target: i32,
    /// Call-a-friend target at places with `ring_friend_bonus`
    pub ring_friend_target: i32,

    /// Leader jersey and pill at each turn start
    pub standings_bonuses: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            hand_size: 5,
            copies_per_card: 5,
            town_size: 3,
            rescue_threshold: 5.0,
            rescue_target: 4,
            nach_rescue_target: 3,
            chug_target: 6,
            dring_target: 3,
            release_target: 4,
            call_friend_target: 3,
            ring_friend_target: 2,
            standings_bonuses: false,
        }
    }
}

impl GameConfig {
    pub fn with_standings_bonuses(mut self, enabled: bool) -> Self {
        self.standings_bonuses = enabled;
        self
    }
}
