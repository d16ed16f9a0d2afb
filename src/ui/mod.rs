use std::time::{Duration, Instant};

/// Most simulation ticks run for a single rendered frame, so a long stall
/// doesn't turn into a burst of catch-up motion.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

pub struct Clock {
    last_time: Instant,
    dt_history: Vec<f64>,
    target_fps: f64,
}

impl Clock {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_time: Instant::now(),
            dt_history: Vec::with_capacity(60),
            target_fps,
        }
    }

    /// Records the time since the previous call and returns it.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last_time);
        self.last_time = now;
        self.record(dt.as_secs_f64());
        dt
    }

    fn record(&mut self, dt: f64) {
        self.dt_history.push(dt);
        if self.dt_history.len() > 60 {
            self.dt_history.remove(0);
        }
    }

    pub fn get_avg_framerate(&self) -> f64 {
        if self.dt_history.is_empty() {
            return self.target_fps;
        }
        let avg_dt: f64 = self.dt_history.iter().sum::<f64>() / self.dt_history.len() as f64;
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            self.target_fps
        }
    }
}

/// Fixed-timestep pacing between wall-clock frames and simulation ticks.
pub struct Loop {
    pub pause: bool,
    tick_interval: f64,
    accumulator: f64,
}

impl Loop {
    pub fn new(ticks_per_second: f64) -> Self {
        Self {
            pause: false,
            tick_interval: 1.0 / ticks_per_second,
            accumulator: 0.0,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.pause = !self.pause;
        self.accumulator = 0.0;
        log::info!("Simulation {}", if self.pause { "paused" } else { "resumed" });
    }

    /// How many ticks the elapsed frame time pays for.
    pub fn due_ticks(&mut self, dt: Duration) -> u32 {
        if self.pause {
            return 0;
        }
        self.accumulator += dt.as_secs_f64();

        let mut ticks = 0;
        while self.accumulator >= self.tick_interval && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_interval;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(self.tick_interval);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framerate_defaults_to_target_without_samples() {
        let clock = Clock::new(60.0);
        assert_eq!(clock.get_avg_framerate(), 60.0);
    }

    #[test]
    fn framerate_averages_recent_frames() {
        let mut clock = Clock::new(60.0);
        clock.record(0.01);
        clock.record(0.03);
        assert!((clock.get_avg_framerate() - 50.0).abs() < 1e-9);

        for _ in 0..100 {
            clock.record(0.025);
        }
        assert_eq!(clock.dt_history.len(), 60);
        assert!((clock.get_avg_framerate() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_follow_elapsed_time() {
        let mut pacing = Loop::new(50.0);
        assert_eq!(pacing.due_ticks(Duration::from_millis(10)), 0);
        assert_eq!(pacing.due_ticks(Duration::from_millis(10)), 1);
        assert_eq!(pacing.due_ticks(Duration::from_millis(40)), 2);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut pacing = Loop::new(60.0);
        assert_eq!(pacing.due_ticks(Duration::from_secs(2)), MAX_TICKS_PER_FRAME);
        assert!(pacing.due_ticks(Duration::ZERO) <= 1);
    }

    #[test]
    fn paused_loop_runs_nothing_and_banks_nothing() {
        let mut pacing = Loop::new(60.0);
        pacing.toggle_pause();
        assert_eq!(pacing.due_ticks(Duration::from_secs(1)), 0);
        pacing.toggle_pause();
        assert_eq!(pacing.due_ticks(Duration::ZERO), 0);
    }
}
