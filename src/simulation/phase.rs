use std::fmt;

use crate::physics::Velocity;
use crate::simulation::Outcome;

/// The active phase of a round, carrying whatever phase-local timing or
/// motion it needs. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Spawning,
    Idle,
    MovingTom,
    TranslocateTom,
    DecisionPoint,
    MovingTim23,
    EnteringTim23,
    MovingTim22,
    EnteringTim22 { tick: u32 },
    ImsTrap { tick: u32, velocity: Velocity },
    MovingSam,
    EnteringSam { tick: u32 },
    Complete { tick: u32, outcome: Outcome },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Spawning => PhaseKind::Spawning,
            Phase::Idle => PhaseKind::Idle,
            Phase::MovingTom => PhaseKind::MovingTom,
            Phase::TranslocateTom => PhaseKind::TranslocateTom,
            Phase::DecisionPoint => PhaseKind::DecisionPoint,
            Phase::MovingTim23 => PhaseKind::MovingTim23,
            Phase::EnteringTim23 => PhaseKind::EnteringTim23,
            Phase::MovingTim22 => PhaseKind::MovingTim22,
            Phase::EnteringTim22 { .. } => PhaseKind::EnteringTim22,
            Phase::ImsTrap { .. } => PhaseKind::ImsTrap,
            Phase::MovingSam => PhaseKind::MovingSam,
            Phase::EnteringSam { .. } => PhaseKind::EnteringSam,
            Phase::Complete { .. } => PhaseKind::Complete,
        }
    }

    /// Pathway choices are only taken before the protein starts moving.
    pub fn accepts_selection(&self) -> bool {
        matches!(self, Phase::Spawning | Phase::Idle)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::Complete { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }
}

/// Payload-free phase tags, used for the transition table and for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Spawning,
    Idle,
    MovingTom,
    TranslocateTom,
    DecisionPoint,
    MovingTim23,
    EnteringTim23,
    MovingTim22,
    EnteringTim22,
    ImsTrap,
    MovingSam,
    EnteringSam,
    Complete,
}

impl PhaseKind {
    pub const ALL: [PhaseKind; 13] = [
        PhaseKind::Spawning,
        PhaseKind::Idle,
        PhaseKind::MovingTom,
        PhaseKind::TranslocateTom,
        PhaseKind::DecisionPoint,
        PhaseKind::MovingTim23,
        PhaseKind::EnteringTim23,
        PhaseKind::MovingTim22,
        PhaseKind::EnteringTim22,
        PhaseKind::ImsTrap,
        PhaseKind::MovingSam,
        PhaseKind::EnteringSam,
        PhaseKind::Complete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PhaseKind::Spawning => "spawning",
            PhaseKind::Idle => "idle",
            PhaseKind::MovingTom => "moving_tom",
            PhaseKind::TranslocateTom => "translocate_tom",
            PhaseKind::DecisionPoint => "decision_point",
            PhaseKind::MovingTim23 => "moving_tim23",
            PhaseKind::EnteringTim23 => "entering_tim23",
            PhaseKind::MovingTim22 => "moving_tim22",
            PhaseKind::EnteringTim22 => "entering_tim22",
            PhaseKind::ImsTrap => "ims_trap",
            PhaseKind::MovingSam => "moving_sam",
            PhaseKind::EnteringSam => "entering_sam",
            PhaseKind::Complete => "complete",
        }
    }

    /// Every phase the driver may move to from `self`.
    ///
    /// `Spawning -> MovingTom` covers a selection made before the protein
    /// has settled; `Complete -> Spawning` starts the next round.
    pub fn successors(self) -> &'static [PhaseKind] {
        match self {
            PhaseKind::Spawning => &[PhaseKind::Idle, PhaseKind::MovingTom],
            PhaseKind::Idle => &[PhaseKind::MovingTom],
            PhaseKind::MovingTom => &[PhaseKind::TranslocateTom],
            PhaseKind::TranslocateTom => &[PhaseKind::DecisionPoint],
            PhaseKind::DecisionPoint => &[
                PhaseKind::MovingTim23,
                PhaseKind::MovingTim22,
                PhaseKind::ImsTrap,
                PhaseKind::MovingSam,
            ],
            PhaseKind::MovingTim23 => &[PhaseKind::EnteringTim23],
            PhaseKind::EnteringTim23 => &[PhaseKind::Complete],
            PhaseKind::MovingTim22 => &[PhaseKind::EnteringTim22],
            PhaseKind::EnteringTim22 => &[PhaseKind::Complete],
            PhaseKind::ImsTrap => &[PhaseKind::Complete],
            PhaseKind::MovingSam => &[PhaseKind::EnteringSam],
            PhaseKind::EnteringSam => &[PhaseKind::Complete],
            PhaseKind::Complete => &[PhaseKind::Spawning],
        }
    }

    pub fn can_transition_to(self, next: PhaseKind) -> bool {
        self.successors().contains(&next)
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
