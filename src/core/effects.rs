//! Effect kinds for cards, places and NPCs
//!
//! Catalog data names effects with string keys (`"beer_double"`,
//! `"skill_bonus"`, ...). Those keys are parsed once, at load time, into the
//! closed enumerations below. Unknown keys are rejected there, so the rules
//! code only ever matches on typed variants.

use crate::{Result, SmorError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The drink templates that other rules refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkKind {
    Beer,
    Drink,
    Shot,
}

impl DrinkKind {
    pub const ALL: [DrinkKind; 3] = [DrinkKind::Beer, DrinkKind::Drink, DrinkKind::Shot];
}

impl fmt::Display for DrinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrinkKind::Beer => write!(f, "øl"),
            DrinkKind::Drink => write!(f, "drink"),
            DrinkKind::Shot => write!(f, "shot"),
        }
    }
}

/// Card special effects, each dispatching to exactly one mini-game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialEffect {
    CallFriend,
    KnowBeer,
    BongChoice,
    RoundDrinks,
    Icing,
}

impl FromStr for SpecialEffect {
    type Err = SmorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "call_friend" => Ok(SpecialEffect::CallFriend),
            "know_beer" => Ok(SpecialEffect::KnowBeer),
            "bong_choice" => Ok(SpecialEffect::BongChoice),
            "round_drinks" => Ok(SpecialEffect::RoundDrinks),
            "icing" => Ok(SpecialEffect::Icing),
            other => Err(SmorError::UnknownSpecialEffect(other.to_string())),
        }
    }
}

/// Effect keys a place may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceEffectKind {
    MemoryBonus,
    PromilleReduction,
    BeerDouble,
    BeerAsDrink,
    VorsPromilleBonus,
    NachRescueThreshold,
    RingFriendBonus,
}

impl FromStr for PlaceEffectKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Ok(match s {
            "memory_bonus" => PlaceEffectKind::MemoryBonus,
            "promille_reduction" => PlaceEffectKind::PromilleReduction,
            "beer_double" => PlaceEffectKind::BeerDouble,
            "beer_as_drink" => PlaceEffectKind::BeerAsDrink,
            "vors_promille_bonus" => PlaceEffectKind::VorsPromilleBonus,
            "nach_rescue_threshold" => PlaceEffectKind::NachRescueThreshold,
            "ring_friend_bonus" => PlaceEffectKind::RingFriendBonus,
            _ => return Err(()),
        })
    }
}

/// A place effect with its typed payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlaceEffect {
    /// Memory granted to each dealt player at phase start
    MemoryBonus(i32),
    /// Intoxication removed from each dealt player at phase start
    PromilleReduction(f64),
    /// Beer and drink cards count twice
    BeerDouble,
    /// Beer cards also grant the drink card's memory point
    BeerAsDrink,
    /// Extra intoxication on positive-intoxication cards during Vors
    VorsPromilleBonus(f64),
    /// Lowered rescue threshold during Nach
    NachRescueThreshold(f64),
    /// Easier call-a-friend roll
    RingFriendBonus,
}

impl PlaceEffect {
    pub fn kind(&self) -> PlaceEffectKind {
        match self {
            PlaceEffect::MemoryBonus(_) => PlaceEffectKind::MemoryBonus,
            PlaceEffect::PromilleReduction(_) => PlaceEffectKind::PromilleReduction,
            PlaceEffect::BeerDouble => PlaceEffectKind::BeerDouble,
            PlaceEffect::BeerAsDrink => PlaceEffectKind::BeerAsDrink,
            PlaceEffect::VorsPromilleBonus(_) => PlaceEffectKind::VorsPromilleBonus,
            PlaceEffect::NachRescueThreshold(_) => PlaceEffectKind::NachRescueThreshold,
            PlaceEffect::RingFriendBonus => PlaceEffectKind::RingFriendBonus,
        }
    }

    /// Parse one `key: value` pair from catalog data
    ///
    /// Returns `Ok(None)` for switched-off flags (`false` or `0`).
    pub fn parse(owner: &str, key: &str, value: &serde_json::Value) -> Result<Option<Self>> {
        let kind = PlaceEffectKind::from_str(key).map_err(|_| SmorError::UnknownEffectKey {
            owner: owner.to_string(),
            key: key.to_string(),
        })?;
        let raw = EffectValue::read(owner, key, value)?;
        if raw.is_off() {
            return Ok(None);
        }
        Ok(Some(match kind {
            PlaceEffectKind::MemoryBonus => PlaceEffect::MemoryBonus(raw.integer(owner, key)?),
            PlaceEffectKind::PromilleReduction => PlaceEffect::PromilleReduction(raw.number()),
            PlaceEffectKind::BeerDouble => PlaceEffect::BeerDouble,
            PlaceEffectKind::BeerAsDrink => PlaceEffect::BeerAsDrink,
            PlaceEffectKind::VorsPromilleBonus => PlaceEffect::VorsPromilleBonus(raw.number()),
            PlaceEffectKind::NachRescueThreshold => {
                PlaceEffect::NachRescueThreshold(raw.number())
            }
            PlaceEffectKind::RingFriendBonus => PlaceEffect::RingFriendBonus,
        }))
    }
}

/// An NPC effect with its typed payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NpcEffect {
    /// On recruit: intoxication added
    PromilleBonus(f64),
    /// On recruit: intoxication added (usually negative)
    PromillePenalty(f64),
    /// On recruit: memory added
    MemoryBonus(i32),
    /// Card hook: beer and drink cards give an extra 0.5 intoxication
    DoubleBeer,
    /// Card hook: signals an enhanced "know the beer"
    EnhanceKnowBeer,
    /// Turn start: intoxication added
    TurnStartPromille(f64),
    /// Turn start: memory added
    TurnStartMemory(i32),
    /// Dice: bonus on rescue rolls
    RescueBonus(i32),
    /// Dice: bonus on entry-gate rolls
    BouncerBonus(i32),
    /// Dice: bonus on every skill roll
    SkillBonus(i32),
    /// Dice: bonus on chug rolls
    ChugBonus(i32),
    /// Owner must pass a roll before playing each turn
    DringEffect,
    /// On recruit through call-a-friend: brings one more random NPC
    BringsRandomNpc,
}

impl NpcEffect {
    pub fn parse(owner: &str, key: &str, value: &serde_json::Value) -> Result<Option<Self>> {
        let raw = EffectValue::read(owner, key, value)?;
        let effect = match key {
            "promille_bonus" => NpcEffect::PromilleBonus(raw.number()),
            "promille_penalty" => NpcEffect::PromillePenalty(raw.number()),
            "memory_bonus" => NpcEffect::MemoryBonus(raw.integer(owner, key)?),
            "double_beer" => NpcEffect::DoubleBeer,
            "enhance_know_beer" => NpcEffect::EnhanceKnowBeer,
            "turn_start_promille" => NpcEffect::TurnStartPromille(raw.number()),
            "turn_start_memory" => NpcEffect::TurnStartMemory(raw.integer(owner, key)?),
            "rescue_bonus" => NpcEffect::RescueBonus(raw.integer(owner, key)?),
            "bouncer_bonus" => NpcEffect::BouncerBonus(raw.integer(owner, key)?),
            "skill_bonus" => NpcEffect::SkillBonus(raw.integer(owner, key)?),
            "chug_bonus" => NpcEffect::ChugBonus(raw.integer(owner, key)?),
            "dring_effect" => NpcEffect::DringEffect,
            "brings_random_npc" => NpcEffect::BringsRandomNpc,
            _ => {
                return Err(SmorError::UnknownEffectKey {
                    owner: owner.to_string(),
                    key: key.to_string(),
                })
            }
        };
        if raw.is_off() {
            return Ok(None);
        }
        Ok(Some(effect))
    }
}

/// Raw catalog value: either a flag or a number
#[derive(Debug, Clone, Copy)]
enum EffectValue {
    Flag(bool),
    Number(f64),
}

impl EffectValue {
    fn read(owner: &str, key: &str, value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Bool(b) => Ok(EffectValue::Flag(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(EffectValue::Number).ok_or_else(|| {
                SmorError::InvalidEffectValue {
                    owner: owner.to_string(),
                    key: key.to_string(),
                    value: n.to_string(),
                }
            }),
            other => Err(SmorError::InvalidEffectValue {
                owner: owner.to_string(),
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    fn is_off(&self) -> bool {
        match self {
            EffectValue::Flag(b) => !b,
            EffectValue::Number(n) => *n == 0.0,
        }
    }

    fn number(&self) -> f64 {
        match self {
            EffectValue::Flag(b) => f64::from(u8::from(*b)),
            EffectValue::Number(n) => *n,
        }
    }

    fn integer(&self, owner: &str, key: &str) -> Result<i32> {
        let n = self.number();
        if n.fract() != 0.0 {
            return Err(SmorError::InvalidEffectValue {
                owner: owner.to_string(),
                key: key.to_string(),
                value: n.to_string(),
            });
        }
        Ok(n as i32)
    }
}
