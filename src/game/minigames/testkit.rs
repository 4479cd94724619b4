//! Small fixtures shared by the engine's unit tests

use crate::core::{
    CardDefinition, CardId, DrinkKind, NpcDefinition, NpcEffect, Place, PlayerId, SpecialEffect,
};
use crate::game::{
    FixedScriptController, GameConfig, GameState, Phase, PlayerController, TurnContext,
};
use crate::loader::Catalog;

pub fn catalog(places: Vec<Place>) -> Catalog {
    Catalog {
        cards: vec![
            CardDefinition::new("Drikk en øl", 0.5, 0).with_drink(DrinkKind::Beer),
            CardDefinition::new("Drikk en drink", 0.5, 1).with_drink(DrinkKind::Drink),
            CardDefinition::new("Shot", 1.0, 1).with_drink(DrinkKind::Shot),
            CardDefinition::new("Drikk vann", -0.5, 0),
            CardDefinition::new("Karaoke", 0.0, 1),
            CardDefinition::new("Ring en venn", 0.0, 0).with_special(SpecialEffect::CallFriend),
            CardDefinition::new("Kjenner dere ølet!", 0.0, 0)
                .with_special(SpecialEffect::KnowBeer),
            CardDefinition::new("Bong", 0.0, 0).with_special(SpecialEffect::BongChoice),
            CardDefinition::new("Ta en runde", 0.0, 0).with_special(SpecialEffect::RoundDrinks),
            CardDefinition::new("Ice'ing", 0.0, 0).with_special(SpecialEffect::Icing),
        ],
        places,
        npcs: vec![
            NpcDefinition::new("William").with_effect(NpcEffect::MemoryBonus(1)),
            NpcDefinition::new("Eddie").with_effect(NpcEffect::SkillBonus(1)),
            NpcDefinition::new("Kristian").with_effect(NpcEffect::PromilleBonus(0.5)),
            NpcDefinition::new("Marius").with_effect(NpcEffect::ChugBonus(1)),
            NpcDefinition::new("Fredrik").with_effect(NpcEffect::RescueBonus(1)),
        ],
    }
}

/// A game with a capturing logger and one neutral place
pub fn game(players: &[&str]) -> GameState {
    game_with_places(players, vec![Place::new("Stua")])
}

pub fn game_with_places(players: &[&str], places: Vec<Place>) -> GameState {
    let mut game = GameState::new(catalog(places), GameConfig::default());
    game.seed_rng(1);
    game.logger.enable_capture();
    for name in players {
        game.add_player(*name, false);
    }
    game
}

/// One scripted controller per player, in player order
pub fn scripted(game: &GameState, scripts: Vec<Vec<usize>>) -> Vec<Box<dyn PlayerController>> {
    game.player_ids()
        .into_iter()
        .zip(scripts)
        .map(|(id, script)| {
            Box::new(FixedScriptController::new(id, script)) as Box<dyn PlayerController>
        })
        .collect()
}

/// Put a fresh instance of a catalog card into `player`'s hand
pub fn give(game: &mut GameState, player: PlayerId, name: &str) -> CardId {
    let def = game
        .catalog
        .card(name)
        .cloned()
        .unwrap_or_else(|| panic!("no card named {}", name));
    let id = game.spawn_card(&def);
    game.get_player_mut(player).unwrap().hand.add(id);
    id
}

pub fn ctx(phase: Phase) -> TurnContext {
    TurnContext::new(phase, Place::new("Stua"))
}
