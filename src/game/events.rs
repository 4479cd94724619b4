//! Structured game events
//!
//! The engine describes what happened as data; the logger decides how (and
//! whether) to render it.

use crate::core::DrinkKind;
use crate::game::dice::{RollKind, RollOutcome};
use crate::game::{Phase, VerbosityLevel};
use serde::Serialize;
use std::fmt;

/// Why a card left a hand without being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    Vomit,
    Dring,
    SendAway,
    Trade,
}

/// How an NPC joined a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitKind {
    CallFriend,
    BroughtAlong,
    Consolation,
    Auction,
}

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub player: String,
    pub intoxication: f64,
    pub memory: i32,
    pub npcs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        players: Vec<String>,
    },
    PhaseStarted {
        phase: Phase,
        place: String,
        text: String,
        effects: Vec<String>,
    },
    TownPool {
        npcs: Vec<String>,
    },
    EntryGate {
        player: String,
        admitted: bool,
    },
    HandDealt {
        player: String,
        cards: usize,
    },
    TurnStarted {
        player: String,
        intoxication: f64,
        memory: i32,
    },
    DiceRolled {
        player: String,
        kind: RollKind,
        outcome: RollOutcome,
    },
    StatChanged {
        player: String,
        source: String,
        intoxication_delta: f64,
        memory_delta: i32,
        intoxication: f64,
        memory: i32,
    },
    CardPlayed {
        player: String,
        card: String,
    },
    RescueRequired {
        player: String,
        threshold: f64,
    },
    Vomited {
        player: String,
        memory_lost: i32,
    },
    CardDiscarded {
        player: String,
        card: String,
        reason: DiscardReason,
    },
    DringBlocked {
        player: String,
    },
    NpcRecruited {
        player: String,
        npc: String,
        via: RecruitKind,
    },
    NoNpcAvailable {
        player: String,
    },
    FriendCallDeclined {
        player: String,
    },
    NpcReleased {
        player: String,
        npc: String,
    },
    NpcReturned {
        player: String,
        npc: String,
    },
    AuctionRound {
        npc: String,
        round: u32,
        rolls: Vec<(String, i32)>,
    },
    NpcRetired {
        npc: String,
    },
    ChugDeclined {
        player: String,
    },
    DrinkChosen {
        player: String,
        drink: DrinkKind,
    },
    TemplateMissing {
        drink: DrinkKind,
    },
    IcingMatch {
        initiator: String,
        player: String,
    },
    TradeAborted {
        player: String,
        eligible: usize,
    },
    TradeCompleted {
        player: String,
        kept: String,
    },
    InvalidChoice {
        player: String,
        choice: String,
    },
    LeaderJersey {
        player: String,
    },
    PillPassed {
        player: String,
    },
    PhaseEnded {
        phase: Phase,
        standings: Vec<Standing>,
    },
    GameOver {
        standings: Vec<Standing>,
        winner: Option<String>,
    },
}

impl GameEvent {
    /// Lowest verbosity at which this event is shown
    pub fn level(&self) -> VerbosityLevel {
        match self {
            GameEvent::GameStarted { .. }
            | GameEvent::PhaseStarted { .. }
            | GameEvent::PhaseEnded { .. }
            | GameEvent::GameOver { .. } => VerbosityLevel::Minimal,
            GameEvent::DiceRolled { .. }
            | GameEvent::HandDealt { .. }
            | GameEvent::TownPool { .. }
            | GameEvent::AuctionRound { .. }
            | GameEvent::TurnStarted { .. } => VerbosityLevel::Verbose,
            _ => VerbosityLevel::Normal,
        }
    }
}

fn fmt_signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", value)
    } else {
        format!("{}", value)
    }
}

fn write_standings(f: &mut fmt::Formatter<'_>, standings: &[Standing]) -> fmt::Result {
    for row in standings {
        write!(
            f,
            "\n    {:<12} {:>4.1} promille  {:>3} minner",
            row.player, row.intoxication, row.memory
        )?;
        if !row.npcs.is_empty() {
            write!(f, "  [{}]", row.npcs.join(", "))?;
        }
    }
    Ok(())
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::GameStarted { players } => {
                write!(f, "=== SMØR: {} ===", players.join(", "))
            }
            GameEvent::PhaseStarted {
                phase,
                place,
                text,
                effects,
            } => {
                write!(f, "\n=== {} på {} ===", phase, place)?;
                if !text.is_empty() {
                    write!(f, "\n\"{}\"", text)?;
                }
                for effect in effects {
                    write!(f, "\n  {}", effect)?;
                }
                Ok(())
            }
            GameEvent::TownPool { npcs } => write!(f, "I byen: {}", npcs.join(", ")),
            GameEvent::EntryGate { player, admitted } => {
                if *admitted {
                    write!(f, "{} slipper inn", player)
                } else {
                    write!(f, "{} blir stoppet i døra", player)
                }
            }
            GameEvent::HandDealt { player, cards } => {
                write!(f, "{} trekker {} kort", player, cards)
            }
            GameEvent::TurnStarted {
                player,
                intoxication,
                memory,
            } => write!(
                f,
                "--- {} ({:.1} promille, {} minner) ---",
                player, intoxication, memory
            ),
            GameEvent::DiceRolled {
                player,
                kind,
                outcome,
            } => write!(
                f,
                "{} kaster {}: {} + {} + {} = {} (mål {}) {}",
                player,
                kind,
                outcome.base,
                outcome.standard_bonus,
                outcome.special_bonus,
                outcome.total,
                outcome.target,
                if outcome.success { "OK" } else { "bom" }
            ),
            GameEvent::StatChanged {
                player,
                source,
                intoxication_delta,
                memory_delta,
                intoxication,
                memory,
            } => write!(
                f,
                "{} ({}): {} promille, {:+} minner -> {:.1} / {}",
                player,
                source,
                fmt_signed(*intoxication_delta),
                memory_delta,
                intoxication,
                memory
            ),
            GameEvent::CardPlayed { player, card } => write!(f, "{} spiller '{}'", player, card),
            GameEvent::RescueRequired { player, threshold } => {
                write!(f, "{} er over {} promille og må redde seg", player, threshold)
            }
            GameEvent::Vomited {
                player,
                memory_lost,
            } => write!(f, "{} spyr og mister {} minner", player, memory_lost),
            GameEvent::CardDiscarded {
                player,
                card,
                reason,
            } => write!(f, "{} kaster '{}' ({:?})", player, card, reason),
            GameEvent::DringBlocked { player } => {
                write!(f, "{} blir holdt igjen av Dring og står over", player)
            }
            GameEvent::NpcRecruited { player, npc, via } => match via {
                RecruitKind::CallFriend => write!(f, "{} ringer {}", player, npc),
                RecruitKind::BroughtAlong => write!(f, "{} tar med seg {}", player, npc),
                RecruitKind::Consolation => write!(f, "{} får trøstevenn {}", player, npc),
                RecruitKind::Auction => write!(f, "{} vinner {} på auksjon", player, npc),
            },
            GameEvent::NoNpcAvailable { player } => {
                write!(f, "Ingen venner tilgjengelig for {}", player)
            }
            GameEvent::FriendCallDeclined { player } => {
                write!(f, "{} lar være å ringe", player)
            }
            GameEvent::NpcReleased { player, npc } => {
                write!(f, "{} sender {} videre", player, npc)
            }
            GameEvent::NpcReturned { player, npc } => {
                write!(f, "{} vil ikke gå, og blir hos {}", npc, player)
            }
            GameEvent::AuctionRound { npc, round, rolls } => {
                write!(f, "Auksjon om {} (runde {}):", npc, round)?;
                for (player, total) in rolls {
                    write!(f, " {}={}", player, total)?;
                }
                Ok(())
            }
            GameEvent::NpcRetired { npc } => write!(f, "{} går hjem", npc),
            GameEvent::ChugDeclined { player } => write!(f, "{} drikker rolig", player),
            GameEvent::DrinkChosen { player, drink } => {
                write!(f, "{} velger {}", player, drink)
            }
            GameEvent::TemplateMissing { drink } => {
                write!(f, "Fant ikke kort for {}", drink)
            }
            GameEvent::IcingMatch { initiator, player } => {
                write!(f, "{} treffer ice'en til {}", player, initiator)
            }
            GameEvent::TradeAborted { player, eligible } => write!(
                f,
                "{} kan ikke bytte: bare {} kort i bunken",
                player, eligible
            ),
            GameEvent::TradeCompleted { player, kept } => {
                write!(f, "{} bytter til '{}'", player, kept)
            }
            GameEvent::InvalidChoice { player, choice } => {
                write!(f, "Ugyldig valg fra {}: {}", player, choice)
            }
            GameEvent::LeaderJersey { player } => {
                write!(f, "{} har ledertrøya (+2 minner)", player)
            }
            GameEvent::PillPassed { player } => write!(f, "{} får pilla (-1 på kast)", player),
            GameEvent::PhaseEnded { phase, standings } => {
                write!(f, "=== {} ferdig ===", phase)?;
                write_standings(f, standings)
            }
            GameEvent::GameOver { standings, winner } => {
                write!(f, "\n=== Kvelden er over ===")?;
                write_standings(f, standings)?;
                match winner {
                    Some(name) => write!(f, "\n{} husker mest og vinner!", name),
                    None => write!(f, "\nIngen vinner"),
                }
            }
        }
    }
}
