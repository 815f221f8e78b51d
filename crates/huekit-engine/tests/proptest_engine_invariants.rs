#![forbid(unsafe_code)]

//! Property tests for the palette engine.
//!
//! Validates:
//! - Shade ramps have 20 entries, keep the base at index 9, and never get
//!   darker from index 0 to 19.
//! - All-zero adjustments are the identity.
//! - Each explicit harmony keeps its color-wheel relationship to the base
//!   after balancing.
//! - Every committing session operation can be undone to the exact prior
//!   snapshot and redone to the exact following one.
//! - Locked colors survive every operation that does not target them, and
//!   the palette stays within 2..=20 colors.

use huekit_color::{Hsl, hue_distance};
use huekit_engine::{
    Adjustments, BASE_INDEX, Color, EngineConfig, GenerateRequest, HarmonyMethod, PaletteState,
    SHADE_COUNT, VisionDeficiency, generate, generate_shades,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Largest hue error 8-bit rounding may introduce across construct and balance.
const HUE_TOLERANCE: f64 = 10.0;

fn color_strategy() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

/// Clearly chromatic colors, whose hue survives rounding.
fn chromatic_strategy() -> impl Strategy<Value = Color> {
    (0.0f64..360.0, 0.35f64..=1.0, 0.3f64..=0.7)
        .prop_map(|(h, s, l)| Color::from_hsl(Hsl::new(h, s, l)))
}

/// A concrete method with a count its rule fully determines, and the hue
/// offset from the base expected at each position.
fn harmony_case() -> impl Strategy<Value = (HarmonyMethod, Vec<f64>)> {
    prop_oneof![
        (2usize..=20).prop_map(|n| (HarmonyMethod::Mono, vec![0.0; n])),
        Just((HarmonyMethod::Triad, vec![0.0, 120.0, 240.0])),
        Just((HarmonyMethod::Tetrad, vec![0.0, 90.0, 180.0, 270.0])),
        Just((HarmonyMethod::SplitComplement, vec![0.0, 150.0, 210.0])),
        (2usize..=12).prop_map(|n| {
            let offsets = (0..n)
                .map(|i| {
                    let sign = if i % 2 == 1 { 1.0 } else { -1.0 };
                    sign * 12.0 * i.div_ceil(2) as f64
                })
                .collect();
            (HarmonyMethod::Analogous, offsets)
        }),
        (2usize..=10).prop_map(|n| {
            let span = (n - 1) as f64;
            let offsets = (0..n).map(|i| 180.0 * i as f64 / span).collect();
            (HarmonyMethod::Complement, offsets)
        }),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Regenerate,
    RegenerateWith(HarmonyMethod),
    Insert(usize),
    Remove(usize),
    Reorder(usize, usize),
    Replace(usize, Color),
    ToggleLock(usize),
    Brand(Color),
    Gray(Color),
    GrayAuto(bool),
    Adjust(i32, i32, i32, i32),
    Simulate(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Regenerate),
        1 => (0..HarmonyMethod::CONCRETE.len())
            .prop_map(|i| Op::RegenerateWith(HarmonyMethod::CONCRETE[i])),
        2 => (0usize..24).prop_map(Op::Insert),
        2 => (0usize..24).prop_map(Op::Remove),
        1 => ((0usize..24), (0usize..24)).prop_map(|(a, b)| Op::Reorder(a, b)),
        1 => ((0usize..24), color_strategy()).prop_map(|(i, c)| Op::Replace(i, c)),
        3 => (0usize..24).prop_map(Op::ToggleLock),
        1 => color_strategy().prop_map(Op::Brand),
        1 => color_strategy().prop_map(Op::Gray),
        1 => any::<bool>().prop_map(Op::GrayAuto),
        1 => (-180i32..=180, -100i32..=100, -100i32..=100, -100i32..=100)
            .prop_map(|(h, s, b, t)| Op::Adjust(h, s, b, t)),
        1 => (0..VisionDeficiency::ALL.len()).prop_map(Op::Simulate),
    ]
}

/// Apply `op`; errors are expected for out-of-range indices and bounds.
fn apply(state: &mut PaletteState, op: &Op) {
    let len = state.palette().len();
    match *op {
        Op::Regenerate => {
            state.regenerate(None);
        }
        Op::RegenerateWith(method) => {
            state.set_method(method);
            state.regenerate(None);
        }
        Op::Insert(at) => {
            let _ = state.insert_color(at);
        }
        Op::Remove(at) => {
            let _ = state.remove_color(at);
        }
        Op::Reorder(from, to) => {
            let _ = state.reorder(from, to);
        }
        Op::Replace(at, color) => {
            let _ = state.replace_color(at, color);
        }
        Op::ToggleLock(at) => {
            if let Some(&color) = state.palette().get(at % len) {
                let _ = state.toggle_lock(color);
            }
        }
        Op::Brand(color) => state.update_brand_color(color),
        Op::Gray(color) => state.set_gray_color(color),
        Op::GrayAuto(auto) => state.set_gray_auto(auto),
        Op::Adjust(h, s, b, t) => {
            state.set_adjustments(Adjustments::new(h, s, b, t));
            let _ = state.commit_adjustments();
        }
        Op::Simulate(i) => {
            state.start_simulation(VisionDeficiency::ALL[i]);
            let _ = state.commit_simulation();
        }
    }
}

/// Locked values the operation is allowed to drop.
fn targeted(state: &PaletteState, op: &Op) -> Vec<Color> {
    match *op {
        Op::Remove(at) | Op::Replace(at, _) => {
            state.palette().get(at).copied().into_iter().collect()
        }
        Op::ToggleLock(at) => state
            .palette()
            .get(at % state.palette().len())
            .copied()
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn shades_are_anchored_and_monotonic(base in color_strategy()) {
        let ramp = generate_shades(base);
        prop_assert_eq!(ramp.len(), SHADE_COUNT);
        prop_assert_eq!(ramp[BASE_INDEX], base);
        for pair in ramp.windows(2) {
            prop_assert!(
                pair[0].to_hsl().l <= pair[1].to_hsl().l + 1e-12,
                "{} then {}", pair[0], pair[1]
            );
        }
    }

    #[test]
    fn identity_adjustment_is_bit_exact(color in color_strategy()) {
        prop_assert_eq!(Adjustments::IDENTITY.apply(color), color);
        prop_assert_eq!(Adjustments::new(0, 0, 0, 0).apply(color), color);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn explicit_harmonies_keep_their_hue_relationships(
        base in chromatic_strategy(),
        (method, offsets) in harmony_case(),
        seed in any::<u64>(),
    ) {
        let request = GenerateRequest::new(offsets.len(), method).with_base(Some(base));
        let out = generate(&request, &mut SmallRng::seed_from_u64(seed));
        prop_assert_eq!(out.palette.len(), offsets.len());
        prop_assert_eq!(out.palette[0], base);

        let base_hue = base.to_hsl().h;
        for (i, (color, offset)) in out.palette.iter().zip(&offsets).enumerate() {
            let hue = color.to_hsl().h;
            let expected = base_hue + offset;
            prop_assert!(
                hue_distance(hue, expected) <= HUE_TOLERANCE,
                "{} position {}: {} has hue {:.1}, expected {:.1}",
                method, i, color, hue, expected
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_commit_is_exactly_undoable(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..30),
    ) {
        let mut state = PaletteState::new(EngineConfig::seeded(seed));
        for op in &ops {
            let before = state.snapshot();
            let history_len = state.history().len();
            apply(&mut state, op);
            if state.history().len() > history_len || state.snapshot() != before {
                let after = state.snapshot();
                prop_assert!(state.undo(), "{:?} did not commit", op);
                prop_assert_eq!(&state.snapshot(), &before, "undo after {:?}", op);
                prop_assert!(state.redo());
                prop_assert_eq!(&state.snapshot(), &after, "redo after {:?}", op);
            }
        }
    }

    #[test]
    fn locks_survive_untargeted_operations(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..30),
    ) {
        let mut state = PaletteState::new(EngineConfig::seeded(seed));
        for op in &ops {
            let locked_before = state.locked_colors().clone();
            let exempt = targeted(&state, op);
            apply(&mut state, op);

            let len = state.palette().len();
            prop_assert!((2..=20).contains(&len), "length {} after {:?}", len, op);
            for color in state.locked_colors() {
                prop_assert!(state.palette().contains(color), "{} locked but absent", color);
            }
            for color in locked_before.iter().filter(|c| !exempt.contains(c)) {
                prop_assert!(
                    state.palette().contains(color),
                    "{} lost by {:?}", color, op
                );
            }
        }
    }
}
