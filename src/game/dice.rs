//! Dice resolution
//!
//! A roll is one d6 plus the player's standard bonus plus whichever NPC
//! bonuses apply to the kind of roll. The resolver itself is pure; the die
//! comes from a [`DieSource`] so tests can force specific rolls.

use crate::core::{Npc, NpcEffect, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// What a roll is for; decides which NPC bonuses stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollKind {
    Entry,
    Rescue,
    Recruit,
    Chug,
    Release,
    Dring,
    Auction,
    Icing,
}

impl RollKind {
    /// Whether NPC `skill_bonus` applies to this roll
    pub fn uses_skill(&self) -> bool {
        !matches!(self, RollKind::Chug | RollKind::Icing)
    }

    /// The action-specific bonus an NPC effect grants for this roll, if any
    fn action_bonus(&self, effect: &NpcEffect) -> i32 {
        match (self, effect) {
            (RollKind::Entry, NpcEffect::BouncerBonus(v)) => *v,
            (RollKind::Rescue, NpcEffect::RescueBonus(v)) => *v,
            (RollKind::Chug, NpcEffect::ChugBonus(v)) => *v,
            _ => 0,
        }
    }
}

impl fmt::Display for RollKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RollKind::Entry => "dørvakt",
            RollKind::Rescue => "redning",
            RollKind::Recruit => "ring en venn",
            RollKind::Chug => "chug",
            RollKind::Release => "send bort",
            RollKind::Dring => "dring",
            RollKind::Auction => "auksjon",
            RollKind::Icing => "ice'ing",
        };
        write!(f, "{}", name)
    }
}

/// Everything about one roll, for the caller and for the event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub base: i32,
    pub standard_bonus: i32,
    pub special_bonus: i32,
    pub total: i32,
    pub target: i32,
    pub success: bool,
}

/// Sum of NPC bonuses that apply to a roll of `kind`
pub fn special_bonus<'a>(kind: RollKind, npcs: impl IntoIterator<Item = &'a Npc>) -> i32 {
    npcs.into_iter()
        .flat_map(|npc| npc.effects.iter())
        .map(|effect| {
            let skill = match effect {
                NpcEffect::SkillBonus(v) if kind.uses_skill() => *v,
                _ => 0,
            };
            skill + kind.action_bonus(effect)
        })
        .sum()
}

/// Resolve a roll given the raw die value
pub fn resolve<'a>(
    base: i32,
    player: &Player,
    npcs: impl IntoIterator<Item = &'a Npc>,
    kind: RollKind,
    target: i32,
) -> RollOutcome {
    let standard_bonus = player.standard_dice_bonus();
    let special_bonus = special_bonus(kind, npcs);
    let total = base + standard_bonus + special_bonus;
    RollOutcome {
        base,
        standard_bonus,
        special_bonus,
        total,
        target,
        success: total >= target,
    }
}

/// Source of d6 values
pub trait DieSource: fmt::Debug {
    /// A value in `1..=6`
    fn roll_d6(&mut self) -> i32;
}

/// Fair die driven by a seeded ChaCha RNG
#[derive(Debug, Clone)]
pub struct RngDice {
    rng: ChaCha12Rng,
}

impl RngDice {
    pub fn with_seed(seed: u64) -> Self {
        RngDice {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl DieSource for RngDice {
    fn roll_d6(&mut self) -> i32 {
        self.rng.gen_range(1..=6)
    }
}

/// Scripted die for tests: hands out the queued values, then rolls fairly
#[derive(Debug, Clone)]
pub struct LoadedDice {
    rolls: VecDeque<i32>,
    fallback: RngDice,
}

impl LoadedDice {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        LoadedDice {
            rolls: rolls.into_iter().collect(),
            fallback: RngDice::with_seed(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DieSource for LoadedDice {
    fn roll_d6(&mut self) -> i32 {
        self.rolls
            .pop_front()
            .unwrap_or_else(|| self.fallback.roll_d6())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NpcDefinition, NpcId, PlayerId};

    fn npc(def: NpcDefinition) -> Npc {
        def.instantiate(NpcId::new(0))
    }

    #[test]
    fn test_forced_six_succeeds_without_bonuses() {
        let player = Player::new(PlayerId::new(0), "Ola", false);
        for target in 1..=6 {
            let outcome = resolve(6, &player, [], RollKind::Recruit, target);
            assert!(outcome.success);
            assert_eq!(outcome.total, 6);
        }
    }

    #[test]
    fn test_sweet_spot_counts() {
        let mut player = Player::new(PlayerId::new(0), "Ola", false);
        player.add_intoxication(2.0);
        let outcome = resolve(3, &player, [], RollKind::Rescue, 4);
        assert_eq!(outcome.standard_bonus, 1);
        assert_eq!(outcome.total, 4);
        assert!(outcome.success);
    }

    #[test]
    fn test_bonuses_stack_by_kind() {
        let william = npc(NpcDefinition::new("William").with_effect(NpcEffect::SkillBonus(1)));
        let eddie = npc(NpcDefinition::new("Eddie")
            .with_effect(NpcEffect::RescueBonus(2))
            .with_effect(NpcEffect::BouncerBonus(1)));
        let tord = npc(NpcDefinition::new("Tord").with_effect(NpcEffect::ChugBonus(1)));
        let roster = [william, eddie, tord];

        assert_eq!(special_bonus(RollKind::Rescue, &roster), 3);
        assert_eq!(special_bonus(RollKind::Entry, &roster), 2);
        assert_eq!(special_bonus(RollKind::Recruit, &roster), 1);
        assert_eq!(special_bonus(RollKind::Auction, &roster), 1);
        // chug skips skill_bonus, icing takes no NPC bonus at all
        assert_eq!(special_bonus(RollKind::Chug, &roster), 1);
        assert_eq!(special_bonus(RollKind::Icing, &roster), 0);
    }

    #[test]
    fn test_pill_lowers_total() {
        let mut player = Player::new(PlayerId::new(0), "Ola", false);
        player.dice_modifier = -1;
        let outcome = resolve(4, &player, [], RollKind::Release, 4);
        assert_eq!(outcome.total, 3);
        assert!(!outcome.success);
    }

    #[test]
    fn test_loaded_dice_then_fair() {
        let mut dice = LoadedDice::new([6, 1]);
        assert_eq!(dice.roll_d6(), 6);
        assert_eq!(dice.roll_d6(), 1);
        assert_eq!(dice.remaining(), 0);
        for _ in 0..50 {
            assert!((1..=6).contains(&dice.roll_d6()));
        }
    }

    #[test]
    fn test_rng_dice_deterministic() {
        let mut a = RngDice::with_seed(7);
        let mut b = RngDice::with_seed(7);
        let rolls_a: Vec<_> = (0..20).map(|_| a.roll_d6()).collect();
        let rolls_b: Vec<_> = (0..20).map(|_| b.roll_d6()).collect();
        assert_eq!(rolls_a, rolls_b);
    }
}
