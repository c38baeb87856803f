//! Firework particles and their randomized construction.

use crate::config::SimConfig;
use crate::kinematics::{self, Coordinate, Velocity};
use crate::palette::Color;
use crate::surface::Surface;
use fastrand::Rng;

/// How a particle shows up on screen over its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Visible while alive, gone once burned.
    Normal,
    /// Hidden while alive, then a single larger flash during the grace window
    /// after its lifetime runs out.
    DelayedFlash,
}

/// Per-field overrides for [`Particle::spawn`]. `None` means randomize.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticleOptions {
    pub velocity: Option<Velocity>,
    pub lifetime: Option<f32>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    coordinate: Coordinate,
    velocity: Velocity,
    lifetime: f32,
    color: Color,
    mode: RenderMode,
    leaves_traces: bool,
}

impl Particle {
    /// A normal particle at `origin`, leaving traces as it flies.
    pub fn spawn(
        origin: Coordinate,
        options: ParticleOptions,
        config: &SimConfig,
        rng: &mut Rng,
    ) -> Self {
        Self::build(origin, options, RenderMode::Normal, config, rng)
    }

    /// A crisp: flies like a normal particle but only flashes after burning out.
    pub fn crisp(
        origin: Coordinate,
        options: ParticleOptions,
        config: &SimConfig,
        rng: &mut Rng,
    ) -> Self {
        Self::build(origin, options, RenderMode::DelayedFlash, config, rng)
    }

    fn build(
        origin: Coordinate,
        options: ParticleOptions,
        mode: RenderMode,
        config: &SimConfig,
        rng: &mut Rng,
    ) -> Self {
        Self {
            coordinate: origin,
            velocity: options.velocity.unwrap_or_else(|| random_velocity(config, rng)),
            lifetime: options.lifetime.unwrap_or_else(|| random_lifetime(config, rng)),
            color: options.color.unwrap_or_else(|| Color::random(rng)),
            mode,
            leaves_traces: mode == RenderMode::Normal,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn leaves_traces(&self) -> bool {
        self.leaves_traces
    }

    pub fn total_speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn tick(&mut self, dt: f32, config: &SimConfig) {
        let (velocity, coordinate) =
            kinematics::integrate(self.velocity, self.coordinate, dt, config.gravity, config.drag);
        self.velocity = velocity;
        self.coordinate = coordinate;
        self.lifetime -= dt;
    }

    pub fn is_burned(&self, config: &SimConfig) -> bool {
        match self.mode {
            RenderMode::Normal => self.lifetime <= 0.0,
            RenderMode::DelayedFlash => self.lifetime <= -config.crisp_grace,
        }
    }

    pub fn has_hit_ground(&self, config: &SimConfig) -> bool {
        self.coordinate.y >= config.ground_level
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, config: &SimConfig) {
        match self.mode {
            RenderMode::Normal => {
                surface.fill_circle(self.coordinate, config.particle_size, self.color.rgb());
            }
            RenderMode::DelayedFlash => {
                if self.lifetime > 0.0 {
                    return;
                }
                surface.fill_circle(
                    self.coordinate,
                    config.particle_size * config.crisp_scale,
                    self.color.rgb(),
                );
            }
        }
    }
}

/// Noised speed split into a uniform x component and the y that keeps the
/// magnitude. Directions are not uniform in angle.
pub fn random_velocity(config: &SimConfig, rng: &mut Rng) -> Velocity {
    let noise = (rng.f32() * 2.0 - 1.0) * config.particle_speed_noise;
    let speed = config.particle_speed * (1.0 + noise);
    let x = (rng.f32() * 2.0 - 1.0) * speed;
    let y = (speed * speed - x * x).max(0.0).sqrt();
    let sign = if rng.bool() { 1.0 } else { -1.0 };
    Velocity::new(x, y * sign)
}

pub fn random_lifetime(config: &SimConfig, rng: &mut Rng) -> f32 {
    let (min, max) = config.particle_lifetime;
    min + rng.f32() * (max - min)
}

pub fn random_amount(config: &SimConfig, rng: &mut Rng) -> usize {
    let (min, max) = config.particle_amount;
    rng.usize(min..=max)
}
