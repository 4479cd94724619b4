//! Mini-games triggered by card specials and turn checks
//!
//! Each mini-game is an `impl GameLoop` block: it may roll dice, ask any
//! player's controller for a decision and move NPCs, so it needs the loop
//! (for controllers) and not just the state.

mod drinks;
mod gates;
mod icing;
mod recruit;
mod standings;
mod trade;

#[cfg(test)]
pub(crate) mod testkit;
