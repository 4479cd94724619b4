//! Loading the shipped catalogs and rejecting malformed ones

use similar_asserts::assert_eq;
use smor_engine::core::{DrinkKind, PlaceEffect, PlaceEffectKind, SpecialEffect};
use smor_engine::loader::Catalog;
use smor_engine::SmorError;
use std::path::Path;

fn data_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn test_load_shipped_catalogs() {
    let catalog = Catalog::load_from_dir(&data_dir()).unwrap();

    assert_eq!(catalog.places.len(), 4);
    for kind in DrinkKind::ALL {
        assert!(catalog.drink_template(kind).is_some(), "missing {:?}", kind);
    }
    assert_eq!(
        catalog.card("kjenner dere olet!").and_then(|c| c.special),
        Some(SpecialEffect::KnowBeer)
    );

    let herslebs = catalog.place("Herslebs").unwrap();
    assert_eq!(herslebs.nach_rescue_threshold(), Some(4.0));
    assert_eq!(
        herslebs.effect(PlaceEffectKind::VorsPromilleBonus),
        Some(PlaceEffect::VorsPromilleBonus(0.5))
    );
    assert!(catalog.place("O'Connors").unwrap().has_bouncer);
    assert!(catalog.npc("Dring").is_some());
}

#[test]
fn test_missing_dir_is_io_error() {
    let err = Catalog::load_from_dir(Path::new("/no/such/dir")).unwrap_err();
    assert!(matches!(err, SmorError::IoError(_)));
}

#[test]
fn test_unknown_npc_effect_is_rejected() {
    let cards = r#"[{"name": "Karaoke", "minne_change": 1}]"#;
    let places = r#"[{"name": "Stua"}]"#;
    let npcs = r#"[{"name": "Ukjent", "effects": {"teleport": true}}]"#;
    let err = Catalog::from_json_strs(cards, places, npcs).unwrap_err();
    assert!(matches!(err, SmorError::UnknownEffectKey { .. }));
}

#[test]
fn test_unknown_special_effect_is_rejected() {
    let cards = r#"[{"name": "Dans", "special_effect": "dance_off"}]"#;
    let places = r#"[{"name": "Stua"}]"#;
    let err = Catalog::from_json_strs(cards, places, "[]").unwrap_err();
    assert!(matches!(err, SmorError::UnknownSpecialEffect(_)));
}

#[test]
fn test_two_beer_templates_are_rejected() {
    let cards = r#"[
        {"name": "Pils", "promille_change": 0.5, "drink": "beer"},
        {"name": "IPA", "promille_change": 0.5, "drink": "beer"}
    ]"#;
    let places = r#"[{"name": "Stua"}]"#;
    let err = Catalog::from_json_strs(cards, places, "[]").unwrap_err();
    assert!(matches!(err, SmorError::InvalidCatalog(_)));
}
