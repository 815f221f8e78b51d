#![forbid(unsafe_code)]

//! End-to-end palette session scenarios with seeded randomness.

use std::collections::BTreeSet;

use huekit_color::hue_distance;
use huekit_engine::{
    Color, EngineConfig, EngineError, GenerateRequest, HarmonyMethod, NotificationLevel,
    PaletteState, VisionDeficiency, apply_color_matrix, generate,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_test::traced_test;

const BRAND: Color = Color::from_u32(0x009FDB);

#[test]
fn complement_keeps_base_first_and_walks_to_complement() {
    let mut state = PaletteState::new(EngineConfig::seeded(2024));
    state.set_method(HarmonyMethod::Complement);
    state.regenerate(Some(BRAND));

    let palette = state.palette();
    assert_eq!(palette.len(), 5);
    assert_eq!(palette[0], BRAND);
    assert_eq!(state.brand_color(), BRAND);

    let base_hue = BRAND.to_hsl().h;
    let complement_hue = (base_hue + 180.0) % 360.0;
    let last_hue = palette[4].to_hsl().h;
    assert!(
        hue_distance(last_hue, complement_hue) < hue_distance(last_hue, base_hue),
        "last hue {last_hue} should sit near {complement_hue}"
    );
}

#[test]
fn locked_brand_survives_fifty_auto_regenerations() {
    let mut state = PaletteState::new(EngineConfig::seeded(50));
    state.replace_color(0, BRAND).unwrap();
    assert!(state.toggle_lock(BRAND).unwrap());
    state.set_method(HarmonyMethod::Auto);

    for round in 0..50 {
        state.regenerate(None);
        assert!(state.palette().contains(&BRAND), "round {round}");
        assert_eq!(state.palette()[0], BRAND);
        assert_eq!(state.palette().len(), 5);
    }
}

#[test]
fn removing_from_two_color_palette_is_rejected() {
    let config = EngineConfig {
        default_count: 2,
        ..EngineConfig::seeded(3)
    };
    let mut state = PaletteState::new(config);
    let before = state.palette().to_vec();

    let err = state.remove_color(0).unwrap_err();
    assert!(matches!(err, EngineError::MinPaletteSize { len: 2 }));
    assert_eq!(state.palette(), before.as_slice());
    assert_eq!(state.history().len(), 1);

    let notes = state.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Warning);
    assert!(state.take_notifications().is_empty());
}

#[test]
fn protanopia_changes_pure_red() {
    let red = Color::from_u32(0xFF0000);
    let out = apply_color_matrix(red, VisionDeficiency::Protanopia.matrix());
    assert_ne!(out, red);
    assert!(Color::is_valid(&out.to_hex()));
}

#[test]
fn auto_generation_keeps_count_and_locks_over_many_trials() {
    let mut rng = SmallRng::seed_from_u64(1000);
    for trial in 0..1000 {
        let count = rng.random_range(2..=20);
        let previous: Vec<Color> = (0..count)
            .map(|_| Color::rgb(rng.random(), rng.random(), rng.random()))
            .collect();
        let locked: BTreeSet<Color> = previous
            .iter()
            .copied()
            .filter(|_| rng.random_bool(0.3))
            .collect();

        let request =
            GenerateRequest::new(count, HarmonyMethod::Auto).with_locks(&locked, &previous);
        let generated = generate(&request, &mut rng);
        assert_eq!(generated.palette.len(), count, "trial {trial}");
        assert_ne!(generated.method, HarmonyMethod::Auto);
        for (i, color) in previous.iter().enumerate() {
            if locked.contains(color) {
                assert_eq!(generated.palette[i], *color, "trial {trial} position {i}");
            }
        }
    }
}

#[test]
fn history_walks_back_to_session_start() {
    let mut state = PaletteState::new(EngineConfig::seeded(77));
    let start = state.snapshot();
    state.regenerate(None);
    state.insert_color(0).unwrap();
    state.update_brand_color(Color::from_u32(0xFF5722));
    assert_eq!(state.history().len(), 4);

    state.go_to(0).unwrap();
    assert_eq!(state.snapshot(), start);
    while state.redo() {}
    assert_eq!(state.brand_color(), Color::from_u32(0xFF5722));
    assert_eq!(state.palette().len(), 6);
}

#[test]
fn exported_document_reimports_identically() {
    let mut state = PaletteState::new(EngineConfig::seeded(8));
    let keep = state.palette()[3];
    state.toggle_lock(keep).unwrap();
    state.set_gray_color(Color::from_u32(0x6B7280));

    let json = state.export_document().to_json_pretty().unwrap();
    let mut restored = PaletteState::new(EngineConfig::seeded(9));
    restored.import_json(&json).unwrap();

    assert_eq!(restored.palette(), state.palette());
    assert_eq!(restored.locked_colors(), state.locked_colors());
    assert_eq!(restored.gray_color(), Color::from_u32(0x6B7280));
    assert!(!restored.is_gray_auto());
}

#[traced_test]
#[test]
fn rejected_operations_log_warnings() {
    let config = EngineConfig {
        default_count: 2,
        ..EngineConfig::seeded(4)
    };
    let mut state = PaletteState::new(config);
    assert!(state.remove_color(0).is_err());
    assert!(state.update_brand_color_hex("#12345").is_err());

    assert!(logs_contain("operation rejected"));
    assert!(logs_contain("at least 2 colors"));
    assert!(logs_contain("invalid color"));
}

#[traced_test]
#[test]
fn commits_log_operation_names() {
    let mut state = PaletteState::new(EngineConfig::seeded(5));
    state.regenerate(None);
    assert!(logs_contain("state committed"));
    assert!(logs_contain("regenerate"));
}
