//! The phase driver advances a round by exactly one tick.
//!
//! Each phase has its own update function; [`handler`] is the dispatch
//! table from phase to function. An update function receives the current
//! phase by value and returns the phase for the next tick, which may be the
//! same kind with an advanced timer.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::layout::Layout;
use crate::physics::{self, Bounds, Position, RandomSource, Velocity};
use crate::scenario::{ComplexId, Pathway, ZoneId};
use crate::simulation::{Phase, PhaseKind, SimulationState};

/// The spawning protein settles into `idle` once below this y.
const SPAWN_SETTLE_Y: f64 = 50.0;
/// Stand-off above a complex before docking.
const DOCKING_OFFSET: f64 = 20.0;
/// How far below the outer membrane top TOM releases the protein.
const TOM_EXIT_DEPTH: f64 = 30.0;
/// How far into the matrix the TIM23 import runs before it is judged.
const MATRIX_IMPORT_DEPTH: f64 = 150.0;
const TRANSLOCATION_JITTER: f64 = 2.0;

const WEAVE_FREQUENCY: f64 = 0.1;
const WEAVE_AMPLITUDE: f64 = 15.0;
const WEAVE_DAMPING_START: u32 = 100;
const WEAVE_DRIFT: f64 = 1.0;
const SETTLE_RATE: f64 = 0.05;
const SETTLE_TOLERANCE: f64 = 1.0;
const CHAPERONE_KEEP: f64 = 0.8;

const IMS_KICK: f64 = 0.2;
const IMS_DAMPING: f64 = 0.98;
const IMS_WALL_MARGIN: f64 = 10.0;
const IMS_INITIAL_SPREAD: f64 = 2.0;

/// SAM loads its substrate from the IMS side, below the outer membrane.
const SAM_APPROACH_DEPTH: f64 = 40.0;
const SAM_INSERT_DEPTH: f64 = 15.0;
const SAM_WOBBLE_FREQUENCY: f64 = 0.5;
const SAM_WOBBLE_AMPLITUDE: f64 = 0.5;
const SAM_TOLERANCE: f64 = 0.5;

const FLOAT_FREQUENCY: f64 = 0.05;
const FLOAT_AMPLITUDE: f64 = 0.2;

/// Speeds and tick budgets of the driver, loaded from the `[driver]`
/// table of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverTuning {
    /// Pixels per tick for straight-line moves toward a complex
    pub move_speed: f64,
    /// Pixels per tick for vertical drift while spawning or translocating
    pub drift_step: f64,
    /// Ticks spent in `complete` before the next case starts
    pub round_delay_ticks: u32,
    /// Ticks the protein bounces around the intermembrane space
    pub ims_trap_ticks: u32,
    /// Minimum ticks of multipass weaving before TIM22 insertion can finish
    pub weave_settle_ticks: u32,
    /// Minimum ticks of SAM insertion
    pub sam_min_ticks: u32,
}

impl Default for DriverTuning {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            drift_step: 2.0,
            round_delay_ticks: 150,
            ims_trap_ticks: 180,
            weave_settle_ticks: 150,
            sam_min_ticks: 60,
        }
    }
}

type PhaseUpdate =
    fn(&PhaseDriver, Phase, &mut SimulationState, &Layout, &mut dyn RandomSource) -> Phase;

/// Dispatch table: the update function owning each phase.
fn handler(kind: PhaseKind) -> PhaseUpdate {
    match kind {
        PhaseKind::Spawning => PhaseDriver::spawning,
        PhaseKind::Idle => PhaseDriver::idle,
        PhaseKind::MovingTom => PhaseDriver::moving_tom,
        PhaseKind::TranslocateTom => PhaseDriver::translocate_tom,
        PhaseKind::DecisionPoint => PhaseDriver::decision_point,
        PhaseKind::MovingTim23 => PhaseDriver::moving_tim23,
        PhaseKind::EnteringTim23 => PhaseDriver::entering_tim23,
        PhaseKind::MovingTim22 => PhaseDriver::moving_tim22,
        PhaseKind::EnteringTim22 => PhaseDriver::entering_tim22,
        PhaseKind::ImsTrap => PhaseDriver::ims_trap,
        PhaseKind::MovingSam => PhaseDriver::moving_sam,
        PhaseKind::EnteringSam => PhaseDriver::entering_sam,
        PhaseKind::Complete => PhaseDriver::complete,
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhaseDriver {
    tuning: DriverTuning,
}

impl PhaseDriver {
    pub fn new(tuning: DriverTuning) -> Self {
        Self { tuning }
    }

    /// Advances `state` by one tick: chaperones first, then the active
    /// phase, then the trail. Returns the new phase kind on a transition.
    pub fn tick(
        &self,
        state: &mut SimulationState,
        layout: &Layout,
        rng: &mut dyn RandomSource,
    ) -> Option<PhaseKind> {
        if !layout.is_ready() {
            return None;
        }

        let anchor = state.position;
        state.chaperones.update(anchor, rng);

        let current = state.phase;
        let next = handler(current.kind())(self, current, state, layout, rng);
        state.phase = next;
        state.trail.push(state.position);

        let (from, to) = (current.kind(), next.kind());
        if from == to {
            return None;
        }
        debug_assert!(from.can_transition_to(to), "illegal transition {from} -> {to}");
        debug!("Phase {} -> {}", from, to);
        Some(to)
    }

    fn spawning(
        &self,
        _: Phase,
        state: &mut SimulationState,
        _: &Layout,
        _: &mut dyn RandomSource,
    ) -> Phase {
        state.position.y += self.tuning.drift_step;
        if state.position.y > SPAWN_SETTLE_Y {
            Phase::Idle
        } else {
            Phase::Spawning
        }
    }

    /// Holds until the input surface records a pathway.
    fn idle(
        &self,
        phase: Phase,
        _: &mut SimulationState,
        _: &Layout,
        _: &mut dyn RandomSource,
    ) -> Phase {
        phase
    }

    fn moving_tom(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        _: &mut dyn RandomSource,
    ) -> Phase {
        let target = Position::new(
            layout.complex_x(ComplexId::Tom),
            layout.zone_top(ZoneId::OuterMembrane) - DOCKING_OFFSET,
        );
        self.dock(state, target, phase, Phase::TranslocateTom)
    }

    fn translocate_tom(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        rng: &mut dyn RandomSource,
    ) -> Phase {
        self.thread_through(state, layout.complex_x(ComplexId::Tom), rng);
        if state.position.y > layout.zone_top(ZoneId::OuterMembrane) + TOM_EXIT_DEPTH {
            Phase::DecisionPoint
        } else {
            phase
        }
    }

    /// Routes on the recorded selection; a missing selection falls through
    /// to the default presequence route.
    fn decision_point(
        &self,
        _: Phase,
        state: &mut SimulationState,
        _: &Layout,
        rng: &mut dyn RandomSource,
    ) -> Phase {
        let next = match state.selected {
            Some(Pathway::TomSam) => Phase::MovingSam,
            Some(Pathway::TomTim22) => Phase::MovingTim22,
            Some(Pathway::TomSmallTims) => Phase::ImsTrap {
                tick: 0,
                velocity: Velocity::new(
                    rng.centered(IMS_INITIAL_SPREAD),
                    rng.centered(IMS_INITIAL_SPREAD),
                ),
            },
            Some(Pathway::TomTim23) | None => Phase::MovingTim23,
        };

        if state.selected.is_some_and(Pathway::recruits_chaperones) {
            state.chaperones.spawn_batch(state.position, rng);
        }
        next
    }

    fn moving_tim23(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        _: &mut dyn RandomSource,
    ) -> Phase {
        let target = Position::new(
            layout.complex_x(ComplexId::Tim23),
            layout.zone_top(ZoneId::InnerMembrane) - DOCKING_OFFSET,
        );
        self.dock(state, target, phase, Phase::EnteringTim23)
    }

    fn entering_tim23(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        rng: &mut dyn RandomSource,
    ) -> Phase {
        self.thread_through(state, layout.complex_x(ComplexId::Tim23), rng);
        if state.position.y > layout.zone_top(ZoneId::InnerMembrane) + MATRIX_IMPORT_DEPTH {
            state.evaluate_result()
        } else {
            phase
        }
    }

    fn moving_tim22(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        _: &mut dyn RandomSource,
    ) -> Phase {
        let target = Position::new(
            layout.complex_x(ComplexId::Tim22),
            layout.zone_top(ZoneId::InnerMembrane) - DOCKING_OFFSET,
        );
        self.dock(state, target, phase, Phase::EnteringTim22 { tick: 0 })
    }

    /// Multipass insertion: the protein weaves across the inner membrane
    /// line, then settles into it while its chaperones drop away.
    fn entering_tim22(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        rng: &mut dyn RandomSource,
    ) -> Phase {
        let Phase::EnteringTim22 { tick } = phase else {
            return phase;
        };
        let tick = tick + 1;

        state.chaperones.shed(CHAPERONE_KEEP, rng);

        let membrane_y = layout.zone_top(ZoneId::InnerMembrane);
        state.position.x += rng.centered(WEAVE_DRIFT);
        state.position.y = membrane_y + (tick as f64 * WEAVE_FREQUENCY).sin() * WEAVE_AMPLITUDE;

        if tick > WEAVE_DAMPING_START {
            state.position.y = physics::ease_toward(state.position.y, membrane_y, SETTLE_RATE);
            if (state.position.y - membrane_y).abs() < SETTLE_TOLERANCE
                && tick > self.tuning.weave_settle_ticks
            {
                return state.evaluate_result();
            }
        }
        Phase::EnteringTim22 { tick }
    }

    /// Soluble IMS protein: a damped random walk bouncing between the two
    /// membranes until the trap budget runs out.
    fn ims_trap(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        rng: &mut dyn RandomSource,
    ) -> Phase {
        let Phase::ImsTrap { tick, mut velocity } = phase else {
            return phase;
        };
        let tick = tick + 1;

        velocity.x += rng.centered(IMS_KICK);
        velocity.y += rng.centered(IMS_KICK);
        velocity *= IMS_DAMPING;
        state.position += velocity;

        let bounds = Bounds::new(
            Position::new(
                IMS_WALL_MARGIN,
                layout.zone_top(ZoneId::IntermembraneSpace) + IMS_WALL_MARGIN,
            ),
            Position::new(
                layout.width - IMS_WALL_MARGIN,
                layout.zone_bottom(ZoneId::IntermembraneSpace) - IMS_WALL_MARGIN,
            ),
        );
        bounds.reflect(&mut state.position, &mut velocity);

        if tick > self.tuning.ims_trap_ticks {
            state.evaluate_result()
        } else {
            Phase::ImsTrap { tick, velocity }
        }
    }

    fn moving_sam(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        _: &mut dyn RandomSource,
    ) -> Phase {
        let target = Position::new(
            layout.complex_x(ComplexId::Sam),
            layout.zone_top(ZoneId::OuterMembrane) + SAM_APPROACH_DEPTH,
        );
        self.dock(state, target, phase, Phase::EnteringSam { tick: 0 })
    }

    /// Single-pass insertion: ease up into the outer membrane with a slight
    /// lateral wobble.
    fn entering_sam(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        _: &mut dyn RandomSource,
    ) -> Phase {
        let Phase::EnteringSam { tick } = phase else {
            return phase;
        };
        let tick = tick + 1;

        let target_y = layout.zone_top(ZoneId::OuterMembrane) + SAM_INSERT_DEPTH;
        let remaining = target_y - state.position.y;
        state.position.y = physics::ease_toward(state.position.y, target_y, SETTLE_RATE);
        state.position.x += (tick as f64 * SAM_WOBBLE_FREQUENCY).sin() * SAM_WOBBLE_AMPLITUDE;

        if remaining.abs() < SAM_TOLERANCE && tick > self.tuning.sam_min_ticks {
            state.evaluate_result()
        } else {
            Phase::EnteringSam { tick }
        }
    }

    /// Gentle float while the verdict is shown, then the next case.
    fn complete(
        &self,
        phase: Phase,
        state: &mut SimulationState,
        layout: &Layout,
        _: &mut dyn RandomSource,
    ) -> Phase {
        let Phase::Complete { tick, outcome } = phase else {
            return phase;
        };
        let tick = tick + 1;

        if tick >= self.tuning.round_delay_ticks {
            state.advance_case(layout);
            return Phase::Spawning;
        }

        state.position.y += (tick as f64 * FLOAT_FREQUENCY).sin() * FLOAT_AMPLITUDE;
        Phase::Complete { tick, outcome }
    }

    fn dock(
        &self,
        state: &mut SimulationState,
        target: Position,
        moving: Phase,
        arrived: Phase,
    ) -> Phase {
        if physics::move_toward(&mut state.position, target, self.tuning.move_speed) {
            arrived
        } else {
            moving
        }
    }

    /// Vertical drift down a channel centred on `channel_x`, with jitter.
    fn thread_through(
        &self,
        state: &mut SimulationState,
        channel_x: f64,
        rng: &mut dyn RandomSource,
    ) {
        state.position.y += self.tuning.drift_step;
        state.position.x = channel_x + rng.centered(TRANSLOCATION_JITTER);
    }
}
