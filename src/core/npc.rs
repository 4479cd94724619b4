//! Recruitable non-player characters

use crate::core::{Card, GameEntity, NpcEffect, NpcId, Player, SpecialEffect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An NPC template from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcDefinition {
    pub name: String,
    pub effects: SmallVec<[NpcEffect; 4]>,
    pub text: String,
}

impl NpcDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        NpcDefinition {
            name: name.into(),
            effects: SmallVec::new(),
            text: String::new(),
        }
    }

    pub fn with_effect(mut self, effect: NpcEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn instantiate(&self, id: NpcId) -> Npc {
        Npc {
            id,
            name: self.name.clone(),
            effects: self.effects.clone(),
            text: self.text.clone(),
        }
    }
}

/// Signal an NPC hands back to the effect pipeline from its card hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEnhancement {
    KnowBeer,
}

/// An NPC instance in play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub effects: SmallVec<[NpcEffect; 4]>,
    pub text: String,
}

impl Npc {
    pub fn has(&self, pred: impl Fn(&NpcEffect) -> bool) -> bool {
        self.effects.iter().any(pred)
    }

    pub fn brings_random_npc(&self) -> bool {
        self.has(|e| matches!(e, NpcEffect::BringsRandomNpc))
    }

    pub fn has_dring(&self) -> bool {
        self.has(|e| matches!(e, NpcEffect::DringEffect))
    }

    /// Effects applied once, when the NPC joins a player
    ///
    /// Returns the (intoxication, memory) change requested, after applying it.
    pub fn apply_recruit_effects(&self, player: &mut Player) -> (f64, i32) {
        let mut intoxication = 0.0;
        let mut memory = 0;
        for effect in &self.effects {
            match *effect {
                NpcEffect::PromilleBonus(v) | NpcEffect::PromillePenalty(v) => {
                    player.add_intoxication(v);
                    intoxication += v;
                }
                NpcEffect::MemoryBonus(v) => {
                    player.add_memory(v);
                    memory += v;
                }
                _ => {}
            }
        }
        (intoxication, memory)
    }

    /// Effects applied at the start of each of the owner's turns
    pub fn apply_turn_start_effects(&self, player: &mut Player) -> (f64, i32) {
        let mut intoxication = 0.0;
        let mut memory = 0;
        for effect in &self.effects {
            match *effect {
                NpcEffect::TurnStartPromille(v) => {
                    player.add_intoxication(v);
                    intoxication += v;
                }
                NpcEffect::TurnStartMemory(v) => {
                    player.add_memory(v);
                    memory += v;
                }
                _ => {}
            }
        }
        (intoxication, memory)
    }

    /// Hook run for every card the owner plays
    ///
    /// `double_beer` adds 0.5 intoxication on beer and drink cards;
    /// `enhance_know_beer` returns the enhancement signal.
    pub fn apply_card_effects(&self, player: &mut Player, card: &Card) -> Option<CardEnhancement> {
        let mut signal = None;
        for effect in &self.effects {
            match effect {
                NpcEffect::DoubleBeer if card.is_beer_or_drink() => {
                    player.add_intoxication(0.5);
                }
                NpcEffect::EnhanceKnowBeer if card.special == Some(SpecialEffect::KnowBeer) => {
                    signal = Some(CardEnhancement::KnowBeer);
                }
                _ => {}
            }
        }
        signal
    }
}

impl GameEntity<Npc> for Npc {
    fn id(&self) -> NpcId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
