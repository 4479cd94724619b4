//! Phases of the night and the game-level state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three phases, played strictly in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Vors,
    Fest,
    Nach,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Vors, Phase::Fest, Phase::Nach];

    pub const fn first() -> Phase {
        Phase::Vors
    }

    /// Get the next phase (None after Nach)
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Vors => Some(Phase::Fest),
            Phase::Fest => Some(Phase::Nach),
            Phase::Nach => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Vors => write!(f, "Vors"),
            Phase::Fest => write!(f, "Fest"),
            Phase::Nach => write!(f, "Nach"),
        }
    }
}

/// Game-level state: one of the phases, or over
///
/// Transitions are strictly sequential; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStage {
    NotStarted,
    Playing(Phase),
    Ended,
}

impl GameStage {
    /// Advance to the next stage, returning the new one
    pub fn advance(&mut self) -> GameStage {
        *self = match *self {
            GameStage::NotStarted => GameStage::Playing(Phase::first()),
            GameStage::Playing(phase) => match phase.next() {
                Some(next) => GameStage::Playing(next),
                None => GameStage::Ended,
            },
            GameStage::Ended => GameStage::Ended,
        };
        *self
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            GameStage::Playing(phase) => Some(*phase),
            _ => None,
        }
    }
}

impl Default for GameStage {
    fn default() -> Self {
        GameStage::NotStarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert_eq!(Phase::first(), Phase::Vors);
        assert_eq!(Phase::Vors.next(), Some(Phase::Fest));
        assert_eq!(Phase::Fest.next(), Some(Phase::Nach));
        assert_eq!(Phase::Nach.next(), None);
    }

    #[test]
    fn test_stage_progression() {
        let mut stage = GameStage::default();
        assert_eq!(stage.phase(), None);

        assert_eq!(stage.advance(), GameStage::Playing(Phase::Vors));
        assert_eq!(stage.advance(), GameStage::Playing(Phase::Fest));
        assert_eq!(stage.advance(), GameStage::Playing(Phase::Nach));
        assert_eq!(stage.advance(), GameStage::Ended);

        // Ended is terminal
        assert_eq!(stage.advance(), GameStage::Ended);
    }
}
