//! Tunable constants for the simulation.
//!
//! Everything lives in world units: the world is `SCREEN_WIDTH` by
//! `SCREEN_HEIGHT`, with y growing downwards, and the canvas scales it onto
//! whatever terminal grid is available.

use crate::palette::Rgb;

pub const SCREEN_WIDTH: f32 = 400.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

pub const GRAVITY_ACCELERATION: f32 = 9.8 * 2.0;
pub const GROUND_LEVEL: f32 = SCREEN_HEIGHT - 10.0;
pub const GROUND_COLOR: Rgb = (100, 100, 100);

pub const PARTICLE_SPEED: f32 = 250.0;
/// Relative spread of the particle speed, 0.25 means +-25%.
pub const PARTICLE_SPEED_NOISE: f32 = 0.25;
pub const PARTICLE_SIZE: f32 = 2.0;
pub const PARTICLE_LIFETIME_MIN: f32 = 1.5;
pub const PARTICLE_LIFETIME_MAX: f32 = 2.0;
pub const PARTICLE_AMOUNT_MIN: usize = 50;
pub const PARTICLE_AMOUNT_MAX: usize = 80;

/// How long a crisp stays around after its lifetime hits zero.
pub const CRISP_GRACE: f32 = 0.1;
pub const CRISP_SCALE: f32 = 1.5;

pub const TRACE_LIFETIME: f32 = 0.45;
pub const TRACE_SIZE: f32 = 1.0;
/// Relative spread of the trace lifetime, 1.0 means +-100%.
pub const TRACE_LIFETIME_NOISE: f32 = 1.0;
/// A normal particle leaves a trace when a uniform sample exceeds this.
pub const TRACE_THRESHOLD: f32 = 0.4;

/// Velocity decay per second. The step multiplies velocity by `1 - DRAG * dt`,
/// so the effective damping depends on the frame rate; 2.25/s is 2.5% per frame
/// at 90 Hz.
pub const DRAG: f32 = 2.25;

pub const TARGET_FPS: u32 = 90;
/// Upper bound on a single frame delta. Keeps `1 - DRAG * dt` positive after
/// the terminal was suspended.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Palette policy for fireworks spawned by a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    /// Every particle picks from all six colors.
    Mixed,
    /// Each firework samples this many distinct colors and sticks to them.
    Sampled(usize),
}

impl Default for PaletteMode {
    fn default() -> Self {
        PaletteMode::Sampled(2)
    }
}

/// How the driver turns wall-clock time into simulation steps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StepMode {
    /// One update per frame with the measured delta.
    #[default]
    Variable,
    /// Fixed-size updates drained from an accumulator.
    Fixed(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub gravity: f32,
    pub ground_level: f32,
    pub drag: f32,
    pub particle_speed: f32,
    pub particle_speed_noise: f32,
    pub particle_size: f32,
    pub particle_lifetime: (f32, f32),
    pub particle_amount: (usize, usize),
    pub crisp_grace: f32,
    pub crisp_scale: f32,
    pub trace_lifetime: f32,
    pub trace_lifetime_noise: f32,
    pub trace_size: f32,
    pub trace_threshold: f32,
    pub palette_mode: PaletteMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            gravity: GRAVITY_ACCELERATION,
            ground_level: GROUND_LEVEL,
            drag: DRAG,
            particle_speed: PARTICLE_SPEED,
            particle_speed_noise: PARTICLE_SPEED_NOISE,
            particle_size: PARTICLE_SIZE,
            particle_lifetime: (PARTICLE_LIFETIME_MIN, PARTICLE_LIFETIME_MAX),
            particle_amount: (PARTICLE_AMOUNT_MIN, PARTICLE_AMOUNT_MAX),
            crisp_grace: CRISP_GRACE,
            crisp_scale: CRISP_SCALE,
            trace_lifetime: TRACE_LIFETIME,
            trace_lifetime_noise: TRACE_LIFETIME_NOISE,
            trace_size: TRACE_SIZE,
            trace_threshold: TRACE_THRESHOLD,
            palette_mode: PaletteMode::default(),
        }
    }
}
