//! Small TIM chaperones that escort a protein through the intermembrane
//! space. Purely cosmetic: nothing in the round outcome depends on them.

use std::f64::consts::TAU;

use super::{Position, RandomSource, Velocity};

pub const BATCH_SIZE: usize = 6;
/// Chaperones stop closing in once they are this near the protein.
pub const ESCORT_RADIUS: f64 = 15.0;
const PULL: f64 = 0.05;
const JITTER: f64 = 2.0;
const SPAWN_RADIUS_MIN: f64 = 20.0;
const SPAWN_RADIUS_SPREAD: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chaperone {
    pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChaperoneSwarm {
    members: Vec<Chaperone>,
}

impl ChaperoneSwarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chaperone> {
        self.members.iter()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Scatters a batch on a ring 20..40 px around `center`.
    pub fn spawn_batch(&mut self, center: Position, rng: &mut dyn RandomSource) {
        self.members.reserve(BATCH_SIZE);
        for _ in 0..BATCH_SIZE {
            let angle = rng.next_unit() * TAU;
            let radius = SPAWN_RADIUS_MIN + rng.next_unit() * SPAWN_RADIUS_SPREAD;
            let offset = Velocity::new(angle.cos(), angle.sin()) * radius;
            self.members.push(Chaperone {
                position: center + offset,
            });
        }
    }

    /// One flocking step: pull toward `anchor` when outside the escort
    /// radius, plus independent jitter on both axes.
    pub fn update(&mut self, anchor: Position, rng: &mut dyn RandomSource) {
        for chaperone in &mut self.members {
            let offset = anchor - chaperone.position;
            let mut step = if offset.norm() > ESCORT_RADIUS {
                offset * PULL
            } else {
                Velocity::zeros()
            };
            step.x += rng.centered(JITTER);
            step.y += rng.centered(JITTER);

            chaperone.position += step;
        }
    }

    /// Drops the newest member with probability `1 - keep`.
    pub fn shed(&mut self, keep: f64, rng: &mut dyn RandomSource) -> bool {
        if !self.members.is_empty() && rng.chance(keep) {
            self.members.pop();
            true
        } else {
            false
        }
    }
}
