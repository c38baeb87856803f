//! Click-to-launch fireworks for the terminal.
//!
//! The simulation core ([`Simulation`], [`Firework`], [`Particle`], [`Trace`])
//! is independent of the terminal; it draws through the [`Surface`] trait.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod firework;
pub mod kinematics;
pub mod palette;
pub mod particle;
pub mod simulation;
pub mod surface;
pub mod terminal;
pub mod trace;

pub use config::SimConfig;
pub use error::{AppError, SimError};
pub use firework::{Firework, FireworkState};
pub use kinematics::{Coordinate, Velocity};
pub use palette::Color;
pub use particle::{Particle, ParticleOptions, RenderMode};
pub use simulation::Simulation;
pub use surface::{Canvas, Surface};
pub use trace::Trace;
