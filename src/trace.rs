use crate::config::SimConfig;
use crate::kinematics::Coordinate;
use crate::palette::Color;
use crate::surface::Surface;
use fastrand::Rng;

/// A stationary glint left behind by a particle. It only fades.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    coordinate: Coordinate,
    lifetime: f32,
    color: Color,
}

impl Trace {
    pub fn new(coordinate: Coordinate, color: Color, config: &SimConfig, rng: &mut Rng) -> Self {
        Self {
            coordinate,
            lifetime: random_trace_lifetime(config, rng),
            color,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn tick(&mut self, dt: f32) {
        self.lifetime -= dt;
    }

    pub fn is_burned(&self) -> bool {
        self.lifetime <= 0.0
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, config: &SimConfig) {
        surface.fill_circle(self.coordinate, config.trace_size, self.color.rgb());
    }
}

/// Base lifetime with up to +-100% noise, so some traces are born burned.
pub fn random_trace_lifetime(config: &SimConfig, rng: &mut Rng) -> f32 {
    let noise = (rng.f32() * 2.0 - 1.0) * config.trace_lifetime_noise;
    config.trace_lifetime * (1.0 + noise)
}
