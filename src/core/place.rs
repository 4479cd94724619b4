//! Places visited during the night

use crate::core::{DrinkKind, PlaceEffect, PlaceEffectKind, Player};
use crate::game::Phase;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A location template: round-start modifiers, phase-scoped card
/// modifiers and an optional one-time entry gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub effects: SmallVec<[PlaceEffect; 4]>,
    /// Human-readable description per effect kind
    pub descriptions: Vec<(PlaceEffectKind, String)>,
    pub text: String,
    pub has_bouncer: bool,
}

/// Which place effects fired during one application
pub type FiredEffects = SmallVec<[PlaceEffect; 3]>;

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Place {
            name: name.into(),
            effects: SmallVec::new(),
            descriptions: Vec::new(),
            text: String::new(),
            has_bouncer: false,
        }
    }

    pub fn with_effect(mut self, effect: PlaceEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_bouncer(mut self) -> Self {
        self.has_bouncer = true;
        self
    }

    pub fn has(&self, kind: PlaceEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    pub fn effect(&self, kind: PlaceEffectKind) -> Option<PlaceEffect> {
        self.effects.iter().copied().find(|e| e.kind() == kind)
    }

    /// Rescue threshold override, if this place lowers it
    pub fn nach_rescue_threshold(&self) -> Option<f64> {
        match self.effect(PlaceEffectKind::NachRescueThreshold) {
            Some(PlaceEffect::NachRescueThreshold(v)) => Some(v),
            _ => None,
        }
    }

    /// Descriptions relevant in `phase`
    ///
    /// Phase-scoped effects (Vors bonus, Nach rescue threshold) are only
    /// listed in their own phase.
    pub fn describe_effects(&self, phase: Phase) -> Vec<String> {
        self.descriptions
            .iter()
            .filter(|(kind, _)| self.has(*kind))
            .filter(|(kind, _)| match kind {
                PlaceEffectKind::VorsPromilleBonus => phase == Phase::Vors,
                PlaceEffectKind::NachRescueThreshold => phase == Phase::Nach,
                _ => true,
            })
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Round-start effects for a player who was just dealt a hand
    pub fn apply_round_start(&self, player: &mut Player) -> FiredEffects {
        let mut fired = FiredEffects::new();
        for effect in &self.effects {
            match *effect {
                PlaceEffect::MemoryBonus(amount) => {
                    player.add_memory(amount);
                    fired.push(*effect);
                }
                PlaceEffect::PromilleReduction(amount) => {
                    player.add_intoxication(-amount);
                    fired.push(*effect);
                }
                _ => {}
            }
        }
        fired
    }

    /// Phase effect applied right after a card's base deltas
    ///
    /// Reads the player's most recently played card. Evaluated in the order
    /// beer_double, beer_as_drink, vors_promille_bonus; all may fire.
    pub fn apply_phase_effect(&self, player: &mut Player, phase: Phase) -> FiredEffects {
        let mut fired = FiredEffects::new();
        let Some(last) = player.last_played.clone() else {
            return fired;
        };

        if self.has(PlaceEffectKind::BeerDouble)
            && matches!(last.drink, Some(DrinkKind::Beer) | Some(DrinkKind::Drink))
        {
            player.add_intoxication(last.intoxication_delta);
            fired.push(PlaceEffect::BeerDouble);
        }

        if self.has(PlaceEffectKind::BeerAsDrink) && last.drink == Some(DrinkKind::Beer) {
            player.add_memory(1);
            fired.push(PlaceEffect::BeerAsDrink);
        }

        if let Some(PlaceEffect::VorsPromilleBonus(bonus)) =
            self.effect(PlaceEffectKind::VorsPromilleBonus)
        {
            if phase == Phase::first() && last.intoxication_delta > 0.0 {
                player.add_intoxication(bonus);
                fired.push(PlaceEffect::VorsPromilleBonus(bonus));
            }
        }

        fired
    }
}
