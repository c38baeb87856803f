use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

const FPS_WINDOW: usize = 10;

/// Paces the frame loop and keeps a rolling frame-rate estimate.
pub struct FrameClock {
    target_fps: u32,
    max_dt: f32,
    last_frame: Instant,
    samples: VecDeque<f32>,
}

impl FrameClock {
    pub fn new(target_fps: u32, max_dt: f32) -> Self {
        Self {
            target_fps: target_fps.max(1),
            max_dt,
            last_frame: Instant::now(),
            samples: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }

    /// Sleep out the rest of the frame budget and return the elapsed seconds
    /// since the previous call, clamped to `max_dt`.
    pub fn tick(&mut self) -> f32 {
        let budget = self.frame_budget();
        let spent = self.last_frame.elapsed();
        if spent < budget {
            thread::sleep(budget - spent);
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed)
    }

    /// Account for one frame of length `elapsed`; returns the clamped delta.
    pub fn record(&mut self, elapsed: Duration) -> f32 {
        let secs = elapsed.as_secs_f32();
        if self.samples.len() == FPS_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(secs);
        secs.min(self.max_dt)
    }

    pub fn fps(&self) -> f32 {
        let total: f32 = self.samples.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.samples.len() as f32 / total
    }
}

/// Splits wall-clock time into fixed simulation steps.
pub struct Accumulator {
    step: f32,
    pending: f32,
    max_steps: u32,
}

impl Accumulator {
    pub fn new(step: f32, max_steps: u32) -> Self {
        Self {
            step,
            pending: 0.0,
            max_steps,
        }
    }

    /// Add `dt` and return how many steps are due. Backlog beyond
    /// `max_steps` is dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.pending = (self.pending + dt).min(self.step * self.max_steps as f32);
        let mut steps = 0;
        while self.pending >= self.step {
            self.pending -= self.step;
            steps += 1;
        }
        steps
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}
