//! The set of live fireworks plus everything they share: config and RNG.

use crate::config::{PaletteMode, SimConfig, GROUND_COLOR};
use crate::error::SimError;
use crate::firework::Firework;
use crate::kinematics::Coordinate;
use crate::palette::Color;
use crate::surface::Surface;
use fastrand::Rng;
use tracing::{debug, trace};

pub struct Simulation {
    config: SimConfig,
    rng: Rng,
    fireworks: Vec<Firework>,
}

impl Simulation {
    pub fn new(config: SimConfig, rng: Rng) -> Self {
        Self {
            config,
            rng,
            fireworks: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn particle_count(&self) -> usize {
        self.fireworks.iter().map(|f| f.particles().len()).sum()
    }

    pub fn trace_count(&self) -> usize {
        self.fireworks.iter().map(|f| f.traces().len()).sum()
    }

    /// Queue a firework at `at` using the configured palette policy.
    pub fn spawn(&mut self, at: Coordinate) {
        let palette = match self.config.palette_mode {
            PaletteMode::Mixed => Vec::new(),
            PaletteMode::Sampled(amount) => Color::sample(&mut self.rng, amount),
        };
        debug!(
            x = at.x,
            y = at.y,
            colors = ?palette.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "spawning firework"
        );
        self.fireworks.push(Firework::new(at).with_palette(palette));
    }

    pub fn push(&mut self, firework: Firework) {
        self.fireworks.push(firework);
    }

    /// Step every firework by `dt`. Fails without touching anything when any
    /// firework is unsupported.
    pub fn update(&mut self, dt: f32) -> Result<(), SimError> {
        for firework in &self.fireworks {
            firework.ensure_supported()?;
        }
        for firework in &mut self.fireworks {
            firework.update(dt, &self.config, &mut self.rng)?;
        }
        Ok(())
    }

    /// Ground line, then every firework.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let ground = self.config.ground_level;
        surface.draw_line(
            Coordinate::new(0.0, ground),
            Coordinate::new(self.config.screen_width, ground),
            GROUND_COLOR,
        );
        for firework in &self.fireworks {
            firework.render(surface, &self.config);
        }
    }

    /// Drop exhausted fireworks, returning how many went.
    pub fn prune(&mut self) -> usize {
        let before = self.fireworks.len();
        self.fireworks.retain(Firework::is_alive);
        let removed = before - self.fireworks.len();
        if removed > 0 {
            trace!(removed, remaining = self.fireworks.len(), "pruned fireworks");
        }
        removed
    }

    /// One full frame: update, draw, then forget what burned out.
    pub fn frame<S: Surface + ?Sized>(&mut self, dt: f32, surface: &mut S) -> Result<(), SimError> {
        self.update(dt)?;
        self.render(surface);
        self.prune();
        Ok(())
    }
}
