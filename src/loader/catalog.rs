//! JSON catalogs of cards, places and NPCs
//!
//! Effect maps arrive as loosely-typed `key: value` objects. They are parsed
//! here into typed effects; an unknown key or special-effect tag fails the
//! whole load.

use crate::core::{
    lookup_key, CardDefinition, DrinkKind, NpcDefinition, NpcEffect, Place, PlaceEffect,
    PlaceEffectKind, SpecialEffect,
};
use crate::{Result, SmorError};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

pub const CARDS_FILE: &str = "cards.json";
pub const PLACES_FILE: &str = "places.json";
pub const NPCS_FILE: &str = "npcs.json";

#[derive(Debug, Deserialize)]
struct RawCard {
    name: String,
    #[serde(default)]
    promille_change: f64,
    #[serde(default)]
    minne_change: i32,
    #[serde(default)]
    special_effect: Option<String>,
    #[serde(default, rename = "displayText")]
    display_text: String,
    #[serde(default)]
    drink: Option<DrinkKind>,
    #[serde(default)]
    count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    name: String,
    #[serde(default)]
    effects: Map<String, Value>,
    #[serde(default, rename = "effectDescriptions")]
    effect_descriptions: BTreeMap<String, String>,
    #[serde(default, rename = "displayText")]
    display_text: String,
    #[serde(default, rename = "hasBouncer")]
    has_bouncer: bool,
}

#[derive(Debug, Deserialize)]
struct RawNpc {
    name: String,
    #[serde(default)]
    effects: Map<String, Value>,
    #[serde(default, rename = "displayText")]
    display_text: String,
}

impl RawCard {
    fn into_definition(self) -> Result<CardDefinition> {
        let mut def = CardDefinition::new(self.name, self.promille_change, self.minne_change)
            .with_text(self.display_text);
        if let Some(tag) = self.special_effect.filter(|tag| !tag.is_empty() && tag != "none") {
            def = def.with_special(SpecialEffect::from_str(&tag)?);
        }
        if let Some(drink) = self.drink {
            def = def.with_drink(drink);
        }
        if let Some(count) = self.count {
            def = def.with_copies(count);
        }
        Ok(def)
    }
}

impl RawPlace {
    fn into_place(self) -> Result<Place> {
        let mut place = Place::new(self.name);
        for (key, value) in &self.effects {
            if let Some(effect) = PlaceEffect::parse(&place.name, key, value)? {
                place = place.with_effect(effect);
            }
        }
        for (key, text) in self.effect_descriptions {
            let kind =
                PlaceEffectKind::from_str(&key).map_err(|_| SmorError::UnknownEffectKey {
                    owner: place.name.clone(),
                    key: key.clone(),
                })?;
            place.descriptions.push((kind, text));
        }
        place.text = self.display_text;
        place.has_bouncer = self.has_bouncer;
        Ok(place)
    }
}

impl RawNpc {
    fn into_definition(self) -> Result<NpcDefinition> {
        let mut def = NpcDefinition::new(self.name);
        for (key, value) in &self.effects {
            if let Some(effect) = NpcEffect::parse(&def.name, key, value)? {
                def = def.with_effect(effect);
            }
        }
        def.text = self.display_text;
        Ok(def)
    }
}

/// All static game content
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub cards: Vec<CardDefinition>,
    pub places: Vec<Place>,
    pub npcs: Vec<NpcDefinition>,
}

impl Catalog {
    /// Parse the three catalogs from JSON arrays
    pub fn from_json_strs(cards: &str, places: &str, npcs: &str) -> Result<Self> {
        let cards = serde_json::from_str::<Vec<RawCard>>(cards)?
            .into_iter()
            .map(RawCard::into_definition)
            .collect::<Result<Vec<_>>>()?;
        let places = serde_json::from_str::<Vec<RawPlace>>(places)?
            .into_iter()
            .map(RawPlace::into_place)
            .collect::<Result<Vec<_>>>()?;
        let npcs = serde_json::from_str::<Vec<RawNpc>>(npcs)?
            .into_iter()
            .map(RawNpc::into_definition)
            .collect::<Result<Vec<_>>>()?;

        let catalog = Catalog {
            cards,
            places,
            npcs,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load `cards.json`, `places.json` and `npcs.json` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SmorError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Data directory not found: {dir:?}"),
            )));
        }
        let cards = std::fs::read_to_string(dir.join(CARDS_FILE))?;
        let places = std::fs::read_to_string(dir.join(PLACES_FILE))?;
        let npcs = std::fs::read_to_string(dir.join(NPCS_FILE))?;
        Self::from_json_strs(&cards, &places, &npcs)
    }

    fn validate(&self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(SmorError::InvalidCatalog("no cards".to_string()));
        }
        if self.places.is_empty() {
            return Err(SmorError::InvalidCatalog("no places".to_string()));
        }

        check_unique("card", self.cards.iter().map(|c| c.name.as_str()))?;
        check_unique("place", self.places.iter().map(|p| p.name.as_str()))?;
        check_unique("NPC", self.npcs.iter().map(|n| n.name.as_str()))?;

        for kind in DrinkKind::ALL {
            let tagged = self.cards.iter().filter(|c| c.drink == Some(kind)).count();
            if tagged > 1 {
                return Err(SmorError::InvalidCatalog(format!(
                    "{} cards are tagged as the {} template",
                    tagged, kind
                )));
            }
        }
        Ok(())
    }

    /// Card template by name, ignoring case and diacritics
    pub fn card(&self, name: &str) -> Option<&CardDefinition> {
        let key = lookup_key(name);
        self.cards.iter().find(|c| c.name.lookup_key() == key)
    }

    pub fn place(&self, name: &str) -> Option<&Place> {
        let key = lookup_key(name);
        self.places.iter().find(|p| lookup_key(&p.name) == key)
    }

    pub fn npc(&self, name: &str) -> Option<&NpcDefinition> {
        let key = lookup_key(name);
        self.npcs.iter().find(|n| lookup_key(&n.name) == key)
    }

    /// The card tagged as the beer, drink or shot template
    pub fn drink_template(&self, kind: DrinkKind) -> Option<&CardDefinition> {
        self.cards.iter().find(|c| c.drink == Some(kind))
    }
}

fn check_unique<'a>(what: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for name in names {
        if !seen.insert(lookup_key(name)) {
            return Err(SmorError::InvalidCatalog(format!(
                "duplicate {} name '{}'",
                what, name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: &str = r#"[
        {"name": "Drikk en øl", "promille_change": 0.5, "minne_change": 0, "drink": "beer"},
        {"name": "Ring en venn", "promille_change": 0, "minne_change": 0,
         "special_effect": "call_friend", "count": 3}
    ]"#;
    const PLACES: &str = r#"[
        {"name": "Herslebs", "displayText": "Skal virkelig kvelden ende her?",
         "effects": {"vors_promille_bonus": 0.5, "nach_rescue_threshold": 4},
         "effectDescriptions": {"vors_promille_bonus": "+0.5 på promille-kort (Vors)"}}
    ]"#;
    const NPCS: &str = r#"[
        {"name": "Sjefen", "effects": {"enhance_know_beer": true, "skill_bonus": 1}}
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_json_strs(CARDS, PLACES, NPCS).unwrap();
        assert_eq!(catalog.cards.len(), 2);

        let beer = catalog.drink_template(DrinkKind::Beer).unwrap();
        assert_eq!(beer.name.as_str(), "Drikk en øl");
        assert!(catalog.drink_template(DrinkKind::Shot).is_none());

        let ring = catalog.card("ring en venn").unwrap();
        assert_eq!(ring.special, Some(SpecialEffect::CallFriend));
        assert_eq!(ring.copies, Some(3));

        let herslebs = catalog.place("herslebs").unwrap();
        assert_eq!(herslebs.nach_rescue_threshold(), Some(4.0));
        assert_eq!(herslebs.descriptions.len(), 1);
        assert!(!herslebs.has_bouncer);

        let sjefen = catalog.npc("Sjefen").unwrap();
        assert_eq!(sjefen.effects.len(), 2);
    }

    #[test]
    fn test_lookup_folds_diacritics() {
        let catalog = Catalog::from_json_strs(CARDS, PLACES, NPCS).unwrap();
        assert!(catalog.card("DRIKK EN OL").is_some());
    }

    #[test]
    fn test_unknown_special_effect_fails_load() {
        let cards = r#"[{"name": "Teleport", "special_effect": "teleport"}]"#;
        let err = Catalog::from_json_strs(cards, PLACES, NPCS).unwrap_err();
        assert!(matches!(err, SmorError::UnknownSpecialEffect(_)));
    }

    #[test]
    fn test_unknown_place_key_fails_load() {
        let places = r#"[{"name": "Plaza", "effects": {"free_beer": true}}]"#;
        let err = Catalog::from_json_strs(CARDS, places, NPCS).unwrap_err();
        assert!(matches!(err, SmorError::UnknownEffectKey { .. }));
    }

    #[test]
    fn test_unknown_npc_key_fails_load() {
        let npcs = r#"[{"name": "Eddie", "effects": {"flies": 1}}]"#;
        let err = Catalog::from_json_strs(CARDS, PLACES, npcs).unwrap_err();
        assert!(matches!(err, SmorError::UnknownEffectKey { .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let npcs = r#"[{"name": "Tord"}, {"name": "tord"}]"#;
        let err = Catalog::from_json_strs(CARDS, PLACES, npcs).unwrap_err();
        assert!(matches!(err, SmorError::InvalidCatalog(_)));
    }

    #[test]
    fn test_empty_places_rejected() {
        let err = Catalog::from_json_strs(CARDS, "[]", NPCS).unwrap_err();
        assert!(matches!(err, SmorError::InvalidCatalog(_)));
    }
}
