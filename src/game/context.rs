//! Per-phase context handed to every pipeline and mini-game call

use crate::core::{Place, PlaceEffectKind};
use crate::game::{GameConfig, Phase};

/// The active phase and the place it is played at
///
/// Built once at phase start; rules read phase and place only from here.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnContext {
    pub phase: Phase,
    pub place: Place,
}

/// Intoxication at which a rescue roll is forced, and the roll's target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescueRule {
    pub threshold: f64,
    pub target: i32,
}

impl TurnContext {
    pub fn new(phase: Phase, place: Place) -> Self {
        TurnContext { phase, place }
    }

    pub fn rescue_rule(&self, config: &GameConfig) -> RescueRule {
        match self.place.nach_rescue_threshold() {
            Some(threshold) if self.phase == Phase::Nach => RescueRule {
                threshold,
                target: config.nach_rescue_target,
            },
            _ => RescueRule {
                threshold: config.rescue_threshold,
                target: config.rescue_target,
            },
        }
    }

    pub fn call_friend_target(&self, config: &GameConfig) -> i32 {
        if self.place.has(PlaceEffectKind::RingFriendBonus) {
            config.ring_friend_target
        } else {
            config.call_friend_target
        }
    }
}
