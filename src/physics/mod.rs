pub mod swarm;

use nalgebra::Vector2;
use rand::Rng;

pub type Position = Vector2<f64>;
pub type Velocity = Vector2<f64>;

/// Uniform samples in `[0, 1)` for the randomized sub-steps.
///
/// Every `rand::Rng` is a source; tests can plug in [`SequenceRandom`] to
/// replay exact values.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// A sample in `[-spread / 2, spread / 2)`.
    fn centered(&mut self, spread: f64) -> f64 {
        (self.next_unit() - 0.5) * spread
    }

    fn chance(&mut self, threshold: f64) -> bool {
        self.next_unit() > threshold
    }
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed cycle of samples.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRandom needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Always yields `value`; with 0.5 every centred jitter is exactly zero.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Steps `position` toward `target` by `speed`.
///
/// Returns `true` on arrival: once the remaining distance is below `speed`
/// the position snaps exactly onto the target instead of overshooting.
pub fn move_toward(position: &mut Position, target: Position, speed: f64) -> bool {
    let delta = target - *position;
    let distance = delta.norm();

    if distance < speed {
        *position = target;
        true
    } else {
        *position += delta * (speed / distance);
        false
    }
}

/// Exponential ease: closes `rate` of the remaining gap.
pub fn ease_toward(value: f64, target: f64, rate: f64) -> f64 {
    value + (target - value) * rate
}

/// Axis-aligned box a body bounces around in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// Clamps `position` inside the box, flipping the velocity component of
    /// every wall that was hit.
    pub fn reflect(&self, position: &mut Position, velocity: &mut Velocity) {
        for axis in 0..2 {
            if position[axis] < self.min[axis] {
                position[axis] = self.min[axis];
                velocity[axis] = -velocity[axis];
            }
            if position[axis] > self.max[axis] {
                position[axis] = self.max[axis];
                velocity[axis] = -velocity[axis];
            }
        }
    }
}
