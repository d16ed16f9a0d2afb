//! Per-round simulation state and the operations the input surface and the
//! phase driver perform on it.

pub mod driver;
pub mod phase;

use std::collections::VecDeque;

use log::{debug, info};

use crate::layout::Layout;
use crate::physics::swarm::ChaperoneSwarm;
use crate::physics::Position;
use crate::scenario::{self, Pathway, ProteinVariant};

pub use driver::{DriverTuning, PhaseDriver};
pub use phase::{Phase, PhaseKind};

pub const TRAIL_CAPACITY: usize = 25;

/// Recent protein positions, newest first, capped at [`TRAIL_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Position>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
        }
    }

    pub fn push(&mut self, point: Position) {
        self.points.push_front(point);
        self.points.truncate(TRAIL_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn newest(&self) -> Option<Position> {
        self.points.front().copied()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &Position> {
        self.points.iter()
    }

    pub fn oldest_first(&self) -> impl Iterator<Item = &Position> {
        self.points.iter().rev()
    }
}

/// Verdict on a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub correct: bool,
    pub selected: Option<Pathway>,
    pub expected: Pathway,
}

impl Outcome {
    /// Strict equality between the chosen route and the variant's own.
    pub fn judge(selected: Option<Pathway>, expected: Pathway) -> Self {
        Self {
            correct: selected == Some(expected),
            selected,
            expected,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.correct {
            "Correct Pathway!"
        } else {
            "Incorrect Pathway"
        }
    }

    pub fn message(&self) -> &'static str {
        if self.correct {
            "Protein reached correct destination."
        } else {
            "Signals did not match the transport machinery."
        }
    }
}

/// Everything the driver mutates, owned by the controlling loop.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub score: u32,
    pub case_index: usize,
    pub phase: Phase,
    pub position: Position,
    pub selected: Option<Pathway>,
    pub trail: Trail,
    pub chaperones: ChaperoneSwarm,
}

impl SimulationState {
    /// Opens case 0 with a fresh score.
    pub fn new(layout: &Layout) -> Self {
        let mut state = Self {
            score: 0,
            case_index: 0,
            phase: Phase::Spawning,
            position: layout.spawn_point(),
            selected: None,
            trail: Trail::new(),
            chaperones: ChaperoneSwarm::new(),
        };
        state.begin_round(layout);
        state
    }

    pub fn variant(&self) -> &'static ProteinVariant {
        scenario::variant_for_case(self.case_index)
    }

    /// Resets all per-round state for the current case index.
    pub fn begin_round(&mut self, layout: &Layout) {
        self.phase = Phase::Spawning;
        self.position = layout.spawn_point();
        self.selected = None;
        self.trail.clear();
        self.chaperones.clear();

        let variant = self.variant();
        info!(
            "Case {}: {} ({})",
            self.case_index + 1,
            variant.name,
            variant.destination
        );
    }

    pub fn advance_case(&mut self, layout: &Layout) {
        self.case_index += 1;
        self.begin_round(layout);
    }

    /// Records the user's route and starts the protein moving. Ignored
    /// outside `spawning`/`idle`; returns whether it was taken.
    pub fn select_pathway(&mut self, pathway: Pathway) -> bool {
        if !self.phase.accepts_selection() {
            debug!(
                "Ignoring selection {} during {}",
                pathway,
                self.phase.kind()
            );
            return false;
        }

        info!("Selected pathway {}", pathway);
        self.selected = Some(pathway);
        self.phase = Phase::MovingTom;
        true
    }

    /// Judges the round, scores it and enters `complete`.
    pub fn evaluate_result(&mut self) -> Phase {
        let outcome = Outcome::judge(self.selected, self.variant().pathway);
        if outcome.correct {
            self.score += 1;
        }
        info!("{} Score: {}", outcome.title(), self.score);
        Phase::Complete { tick: 0, outcome }
    }

    /// Carries the protein across a horizontal resize.
    pub fn rescale_horizontal(&mut self, factor: f64) {
        if self.position.x > 0.0 {
            self.position.x *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(800.0, 600.0)
    }

    #[test]
    fn trail_is_capped_and_newest_first() {
        let mut trail = Trail::new();
        for i in 0..40 {
            trail.push(Position::new(i as f64, 0.0));
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.newest(), Some(Position::new(39.0, 0.0)));

        let xs: Vec<f64> = trail.newest_first().map(|p| p.x).collect();
        assert!(xs.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(trail.oldest_first().next().map(|p| p.x), Some(15.0));
    }

    #[test]
    fn new_state_starts_case_zero_spawning() {
        let state = SimulationState::new(&layout());
        assert_eq!(state.case_index, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, Phase::Spawning);
        assert_eq!(state.position, Position::new(400.0, 20.0));
        assert_eq!(state.variant().name, "Matrix Enzyme");
    }

    #[test]
    fn selection_only_taken_while_receptive() {
        let mut state = SimulationState::new(&layout());
        assert!(state.select_pathway(Pathway::TomSam));
        assert_eq!(state.phase, Phase::MovingTom);

        assert!(!state.select_pathway(Pathway::TomTim23));
        assert_eq!(state.selected, Some(Pathway::TomSam));
    }

    #[test]
    fn evaluation_scores_exact_match_only() {
        let mut state = SimulationState::new(&layout());
        state.selected = Some(Pathway::TomTim22);
        let phase = state.evaluate_result();
        assert_eq!(state.score, 0);
        assert_eq!(phase.outcome().map(|o| o.correct), Some(false));

        state.selected = Some(Pathway::TomTim23);
        let phase = state.evaluate_result();
        assert_eq!(state.score, 1);
        assert_eq!(phase.outcome().map(|o| o.title()), Some("Correct Pathway!"));
    }

    #[test]
    fn advancing_clears_round_state() {
        let mut state = SimulationState::new(&layout());
        state.select_pathway(Pathway::TomTim23);
        state.trail.push(Position::new(1.0, 1.0));
        state.advance_case(&layout());

        assert_eq!(state.case_index, 1);
        assert_eq!(state.selected, None);
        assert!(state.trail.is_empty());
        assert_eq!(state.phase, Phase::Spawning);
        assert_eq!(state.variant().name, "Carrier Protein");
    }

    #[test]
    fn rescale_moves_only_positive_x() {
        let mut state = SimulationState::new(&layout());
        state.rescale_horizontal(0.5);
        assert_eq!(state.position.x, 200.0);
        state.position.x = 0.0;
        state.rescale_horizontal(2.0);
        assert_eq!(state.position.x, 0.0);
    }
}
