//! A single firework: one burst of particles and the traces they leave.

use crate::config::SimConfig;
use crate::error::SimError;
use crate::kinematics::Coordinate;
use crate::palette::Color;
use crate::particle::{self, Particle, ParticleOptions};
use crate::surface::Surface;
use crate::trace::Trace;
use fastrand::Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkState {
    /// Waiting for the first update.
    Unexploded,
    /// Has particles or traces left.
    Active,
    /// Everything burned out.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Firework {
    origin: Coordinate,
    palette: Vec<Color>,
    blast_off: bool,
    exploded: bool,
    particles: Vec<Particle>,
    traces: Vec<Trace>,
}

impl Firework {
    pub fn new(origin: Coordinate) -> Self {
        Self {
            origin,
            palette: Vec::new(),
            blast_off: false,
            exploded: false,
            particles: Vec::new(),
            traces: Vec::new(),
        }
    }

    /// Restrict particle colors to `palette`. An empty palette means all colors.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Request a launch flight before the burst. Updating such a firework fails
    /// with [`SimError::Unsupported`].
    pub fn with_blast_off(mut self, blast_off: bool) -> Self {
        self.blast_off = blast_off;
        self
    }

    /// An already exploded firework made of the given particles.
    pub fn from_particles(origin: Coordinate, particles: Vec<Particle>) -> Self {
        Self {
            exploded: true,
            particles,
            ..Self::new(origin)
        }
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn has_exploded(&self) -> bool {
        self.exploded
    }

    pub fn state(&self) -> FireworkState {
        if !self.exploded {
            FireworkState::Unexploded
        } else if self.particles.is_empty() && self.traces.is_empty() {
            FireworkState::Exhausted
        } else {
            FireworkState::Active
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state() != FireworkState::Exhausted
    }

    /// Fails for fireworks that request features with no behavior yet.
    pub fn ensure_supported(&self) -> Result<(), SimError> {
        if self.blast_off {
            return Err(SimError::Unsupported {
                feature: "blast-off flight animation",
            });
        }
        Ok(())
    }

    pub fn update(&mut self, dt: f32, config: &SimConfig, rng: &mut Rng) -> Result<(), SimError> {
        self.ensure_supported()?;

        if !self.exploded {
            self.explode(config, rng);
            self.exploded = true;
        }

        for particle in &mut self.particles {
            // Deposit at the pre-tick position.
            if particle.leaves_traces() && rng.f32() > config.trace_threshold {
                self.traces
                    .push(Trace::new(particle.coordinate(), particle.color(), config, rng));
            }
            particle.tick(dt, config);
        }
        self.particles
            .retain(|p| !p.is_burned(config) && !p.has_hit_ground(config));

        self.traces.retain_mut(|trace| {
            trace.tick(dt);
            !trace.is_burned()
        });

        Ok(())
    }

    fn explode(&mut self, config: &SimConfig, rng: &mut Rng) {
        let normal = particle::random_amount(config, rng);
        let crisps = particle::random_amount(config, rng);
        self.particles.reserve(normal + crisps);

        for _ in 0..normal {
            let options = self.options(rng);
            self.particles
                .push(Particle::spawn(self.origin, options, config, rng));
        }
        for _ in 0..crisps {
            let options = self.options(rng);
            self.particles
                .push(Particle::crisp(self.origin, options, config, rng));
        }

        debug!(
            x = self.origin.x,
            y = self.origin.y,
            normal,
            crisps,
            "firework exploded"
        );
    }

    fn options(&self, rng: &mut Rng) -> ParticleOptions {
        ParticleOptions {
            color: Some(Color::random_from(rng, &self.palette)),
            ..ParticleOptions::default()
        }
    }

    /// Particles first, traces on top.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, config: &SimConfig) {
        for particle in &self.particles {
            particle.render(surface, config);
        }
        for trace in &self.traces {
            trace.render(surface, config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::Velocity;
    use crate::particle::RenderMode;
    use crate::surface::testing::Recorder;

    const ORIGIN: Coordinate = Coordinate::new(200.0, 100.0);

    fn counts(firework: &Firework) -> (usize, usize) {
        let normal = firework
            .particles()
            .iter()
            .filter(|p| p.mode() == RenderMode::Normal)
            .count();
        (normal, firework.particles().len() - normal)
    }

    #[test]
    fn starts_unexploded_and_empty() {
        let firework = Firework::new(ORIGIN);
        assert_eq!(firework.origin(), ORIGIN);
        assert_eq!(firework.state(), FireworkState::Unexploded);
        assert!(!firework.has_exploded());
        assert!(firework.particles().is_empty());
        assert!(firework.traces().is_empty());
        assert!(firework.is_alive());
    }

    #[test]
    fn first_update_explodes() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(42);
        let mut firework = Firework::new(ORIGIN);
        firework.update(0.016, &config, &mut rng).unwrap();

        assert_eq!(firework.state(), FireworkState::Active);
        assert!(firework.has_exploded());
        let (normal, crisps) = counts(&firework);
        assert!((50..=80).contains(&normal), "normal = {normal}");
        assert!((50..=80).contains(&crisps), "crisps = {crisps}");
        assert!((100..=160).contains(&firework.particles().len()));
    }

    #[test]
    fn explosion_frame_leaves_traces_at_the_origin() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(5);
        let mut firework = Firework::new(ORIGIN);
        firework.update(0.001, &config, &mut rng).unwrap();

        // ~60% of 50+ normal particles deposit; a 1ms tick leaves most alive.
        assert!(!firework.traces().is_empty());
        for trace in firework.traces() {
            assert_eq!(trace.coordinate(), ORIGIN);
            assert!(trace.lifetime() > 0.0);
        }
    }

    #[test]
    fn normal_particles_deposit_at_sixty_percent() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(2024);
        let mut normal = 0;
        let mut deposited = 0;
        for _ in 0..200 {
            let mut firework = Firework::new(ORIGIN);
            // A zero step keeps every particle and every trace with lifetime > 0.
            firework.update(0.0, &config, &mut rng).unwrap();
            normal += counts(&firework).0;
            deposited += firework.traces().len();
        }

        let rate = deposited as f32 / normal as f32;
        assert!((rate - 0.6).abs() < 0.03, "rate = {rate}");
    }

    #[test]
    fn traces_born_burned_go_in_the_same_update() {
        let config = SimConfig {
            trace_lifetime: 0.0,
            trace_threshold: -1.0,
            ..SimConfig::default()
        };
        let mut rng = Rng::with_seed(12);
        let spark = Particle::spawn(ORIGIN, ParticleOptions::default(), &config, &mut rng);
        let mut firework = Firework::from_particles(ORIGIN, vec![spark]);

        firework.update(0.0, &config, &mut rng).unwrap();
        assert_eq!(firework.particles().len(), 1);
        assert!(firework.traces().is_empty());

        // Same setup with living traces keeps the deposit.
        let config = SimConfig {
            trace_threshold: -1.0,
            trace_lifetime_noise: 0.0,
            ..SimConfig::default()
        };
        firework.update(0.0, &config, &mut rng).unwrap();
        assert_eq!(firework.traces().len(), 1);
        assert_eq!(firework.traces()[0].coordinate(), firework.origin());
    }

    #[test]
    fn crisps_never_leave_traces() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(17);
        let crisps = (0..50)
            .map(|_| Particle::crisp(ORIGIN, ParticleOptions::default(), &config, &mut rng))
            .collect();
        let mut firework = Firework::from_particles(ORIGIN, crisps);
        for _ in 0..5 {
            firework.update(0.016, &config, &mut rng).unwrap();
        }
        assert!(firework.traces().is_empty());
    }

    #[test]
    fn palette_restricts_particle_colors() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(99);
        let palette = vec![Color::CopperGreen, Color::LithiumPink];
        let mut firework = Firework::new(ORIGIN).with_palette(palette.clone());
        firework.update(0.016, &config, &mut rng).unwrap();

        assert!(firework.particles().iter().all(|p| palette.contains(&p.color())));
        assert!(firework.traces().iter().all(|t| palette.contains(&t.color())));
    }

    #[test]
    fn particle_crossing_the_ground_is_removed_mid_life() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(1);
        let start = Coordinate::new(100.0, config.ground_level - 0.01);
        let options = ParticleOptions {
            velocity: Some(Velocity::new(0.0, 100.0)),
            lifetime: Some(1.0),
            color: Some(Color::SodiumYellow),
        };
        let falling = Particle::crisp(start, options, &config, &mut rng);
        let mut firework = Firework::from_particles(start, vec![falling]);

        firework.update(0.05, &config, &mut rng).unwrap();
        assert!(firework.particles().is_empty());
        assert_eq!(firework.state(), FireworkState::Exhausted);
    }

    #[test]
    fn burns_out_completely() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(8);
        let mut firework = Firework::new(ORIGIN);
        firework.update(0.016, &config, &mut rng).unwrap();

        let mut frames = 0;
        while firework.is_alive() {
            firework.update(0.05, &config, &mut rng).unwrap();
            frames += 1;
            assert!(frames < 200, "firework never burned out");
        }
        assert_eq!(firework.state(), FireworkState::Exhausted);
        assert!(firework.particles().is_empty());
        assert!(firework.traces().is_empty());
    }

    #[test]
    fn blast_off_is_unsupported() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(0);
        let mut firework = Firework::new(ORIGIN).with_blast_off(true);
        let err = firework.update(0.016, &config, &mut rng).unwrap_err();

        assert!(matches!(err, SimError::Unsupported { .. }));
        assert!(!firework.has_exploded());
        assert!(firework.particles().is_empty());
    }

    #[test]
    fn render_draws_every_visible_member() {
        let config = SimConfig::default();
        let mut rng = Rng::with_seed(21);
        let mut firework = Firework::new(ORIGIN);
        firework.update(0.016, &config, &mut rng).unwrap();

        let mut surface = Recorder::default();
        firework.render(&mut surface, &config);
        let (normal, _) = counts(&firework);
        // Crisps are still dark this early.
        assert_eq!(surface.draws.len(), normal + firework.traces().len());
    }
}
