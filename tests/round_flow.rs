use mito_import::layout::Layout;
use mito_import::physics::RandomSource;
use mito_import::scenario::{Pathway, ZoneId, PROTEIN_VARIANTS};
use mito_import::simulation::{
    DriverTuning, Phase, PhaseDriver, PhaseKind, SimulationState, TRAIL_CAPACITY,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const TICK_LIMIT: usize = 5_000;

fn layout() -> Layout {
    Layout::new(1000.0, 800.0)
}

/// Ticks until the round is judged, collecting every transition on the way.
fn play_until_complete(
    driver: &PhaseDriver,
    state: &mut SimulationState,
    layout: &Layout,
    rng: &mut dyn RandomSource,
) -> Vec<PhaseKind> {
    let mut kinds = vec![state.phase.kind()];
    for _ in 0..TICK_LIMIT {
        if let Some(kind) = driver.tick(state, layout, rng) {
            kinds.push(kind);
            if kind == PhaseKind::Complete {
                return kinds;
            }
        }
    }
    panic!("round never completed, stuck in {}", state.phase.kind());
}

fn finish_round(
    driver: &PhaseDriver,
    state: &mut SimulationState,
    layout: &Layout,
    rng: &mut dyn RandomSource,
) {
    for _ in 0..TICK_LIMIT {
        if driver.tick(state, layout, rng) == Some(PhaseKind::Spawning) {
            return;
        }
    }
    panic!("next case never started");
}

#[test]
fn every_pathway_runs_a_full_legal_round() {
    let expected_routes = [
        (Pathway::TomTim23, PhaseKind::EnteringTim23),
        (Pathway::TomTim22, PhaseKind::EnteringTim22),
        (Pathway::TomSmallTims, PhaseKind::ImsTrap),
        (Pathway::TomSam, PhaseKind::EnteringSam),
    ];

    for (pathway, last_before_complete) in expected_routes {
        let layout = layout();
        let driver = PhaseDriver::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let mut state = SimulationState::new(&layout);
        assert!(state.select_pathway(pathway));

        let kinds = play_until_complete(&driver, &mut state, &layout, &mut rng);

        assert_eq!(kinds[0], PhaseKind::MovingTom);
        assert!(kinds.contains(&PhaseKind::TranslocateTom));
        assert!(kinds.contains(&PhaseKind::DecisionPoint));
        assert_eq!(kinds[kinds.len() - 2], last_before_complete, "{pathway}");
        for pair in kinds.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }
}

#[test]
fn correct_choice_scores_and_next_case_rotates_variant() {
    let layout = layout();
    let driver = PhaseDriver::default();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut state = SimulationState::new(&layout);
    assert_eq!(state.variant().name, "Matrix Enzyme");

    state.select_pathway(Pathway::TomTim23);
    play_until_complete(&driver, &mut state, &layout, &mut rng);

    assert_eq!(state.score, 1);
    let outcome = state.phase.outcome().expect("judged round");
    assert!(outcome.correct);
    assert_eq!(outcome.title(), "Correct Pathway!");

    finish_round(&driver, &mut state, &layout, &mut rng);
    assert_eq!(state.case_index, 1);
    assert_eq!(state.variant().name, "Carrier Protein");
    assert_eq!(state.selected, None);
    assert_eq!(state.score, 1);
}

#[test]
fn wrong_choice_keeps_score() {
    let layout = layout();
    let driver = PhaseDriver::default();
    let mut rng = SmallRng::seed_from_u64(5);
    let mut state = SimulationState::new(&layout);

    state.select_pathway(Pathway::TomSam);
    play_until_complete(&driver, &mut state, &layout, &mut rng);

    assert_eq!(state.score, 0);
    let outcome = state.phase.outcome().expect("judged round");
    assert!(!outcome.correct);
    assert_eq!(outcome.message(), "Signals did not match the transport machinery.");
}

#[test]
fn cases_cycle_through_all_variants() {
    let layout = layout();
    let driver = PhaseDriver::default();
    let mut rng = SmallRng::seed_from_u64(17);
    let mut state = SimulationState::new(&layout);

    for case in 0..5 {
        assert_eq!(state.case_index, case);
        let variant = state.variant();
        assert_eq!(variant.name, PROTEIN_VARIANTS[case % PROTEIN_VARIANTS.len()].name);

        state.select_pathway(variant.pathway);
        play_until_complete(&driver, &mut state, &layout, &mut rng);
        finish_round(&driver, &mut state, &layout, &mut rng);
    }
    assert_eq!(state.score, 5);
}

#[test]
fn selection_is_ignored_once_the_protein_moves() {
    let layout = layout();
    let driver = PhaseDriver::default();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut state = SimulationState::new(&layout);

    assert!(state.select_pathway(Pathway::TomTim22));
    for _ in 0..10 {
        driver.tick(&mut state, &layout, &mut rng);
    }
    assert!(!state.select_pathway(Pathway::TomSam));
    assert_eq!(state.selected, Some(Pathway::TomTim22));
    assert_eq!(state.phase, Phase::MovingTom);
}

#[test]
fn selection_is_ignored_during_insertion_and_after_the_verdict() {
    let layout = layout();
    let driver = PhaseDriver::default();
    let mut rng = SmallRng::seed_from_u64(13);
    let mut state = SimulationState::new(&layout);
    assert!(state.select_pathway(Pathway::TomTim22));

    let mut ticks = 0;
    while state.phase.kind() != PhaseKind::EnteringTim22 {
        driver.tick(&mut state, &layout, &mut rng);
        ticks += 1;
        assert!(ticks < TICK_LIMIT, "never reached TIM22 insertion");
    }
    assert!(!state.select_pathway(Pathway::TomTim23));
    assert_eq!(state.selected, Some(Pathway::TomTim22));
    assert_eq!(state.phase.kind(), PhaseKind::EnteringTim22);

    play_until_complete(&driver, &mut state, &layout, &mut rng);
    assert!(!state.select_pathway(Pathway::TomTim23));
    assert_eq!(state.selected, Some(Pathway::TomTim22));
    assert_eq!(state.phase.kind(), PhaseKind::Complete);

    // Case 0 wants TIM23, so the late attempt must not have rescued the round.
    let outcome = state.phase.outcome().expect("judged round");
    assert!(!outcome.correct);
    assert_eq!(outcome.selected, Some(Pathway::TomTim22));
    assert_eq!(state.score, 0);
}

#[test]
fn trail_stays_bounded_with_newest_position_first() {
    let layout = layout();
    let driver = PhaseDriver::default();
    let mut rng = SmallRng::seed_from_u64(23);
    let mut state = SimulationState::new(&layout);
    state.select_pathway(Pathway::TomTim23);

    for _ in 0..300 {
        driver.tick(&mut state, &layout, &mut rng);
        assert!(state.trail.len() <= TRAIL_CAPACITY);
        assert_eq!(state.trail.newest(), Some(state.position));
    }
    assert_eq!(state.trail.len(), TRAIL_CAPACITY);
}

#[test]
fn ims_protein_never_leaves_the_intermembrane_space() {
    let layout = layout();
    let driver = PhaseDriver::default();
    let top = layout.zone_top(ZoneId::IntermembraneSpace);
    let bottom = layout.zone_bottom(ZoneId::IntermembraneSpace);

    for seed in [2, 29, 404] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = SimulationState::new(&layout);
        state.select_pathway(Pathway::TomSmallTims);

        for _ in 0..TICK_LIMIT {
            driver.tick(&mut state, &layout, &mut rng);
            // Tick 0 still sits where TOM released the protein.
            if matches!(state.phase, Phase::ImsTrap { tick, .. } if tick >= 1) {
                assert!(state.position.y >= top && state.position.y <= bottom);
                assert!(state.position.x >= 0.0 && state.position.x <= layout.width);
            }
            if state.phase.kind() == PhaseKind::Complete {
                break;
            }
        }
        assert_eq!(state.phase.kind(), PhaseKind::Complete);
    }
}

#[test]
fn tuning_changes_round_pacing() {
    let layout = layout();
    let quick = PhaseDriver::new(DriverTuning {
        round_delay_ticks: 10,
        ..DriverTuning::default()
    });
    let mut rng = SmallRng::seed_from_u64(8);
    let mut state = SimulationState::new(&layout);
    state.select_pathway(Pathway::TomTim23);
    play_until_complete(&quick, &mut state, &layout, &mut rng);

    let mut ticks = 0;
    while state.phase.kind() == PhaseKind::Complete {
        quick.tick(&mut state, &layout, &mut rng);
        ticks += 1;
    }
    assert_eq!(ticks, 10);
    assert_eq!(state.case_index, 1);
}

#[test]
fn resize_carries_protein_horizontally() {
    let mut layout = layout();
    let mut state = SimulationState::new(&layout);
    assert_eq!(state.position.x, 500.0);

    let factor = layout.resize(500.0, 800.0).expect("width changed");
    state.rescale_horizontal(factor);
    assert_eq!(state.position.x, 250.0);
}
