use crate::config::{PaletteMode, SimConfig, StepMode, TARGET_FPS};
use crate::palette::{Color, Rgb};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "termfireworks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Click to launch fireworks in your terminal", long_about = None)]
#[command(after_help = "Press 'q', ESC, or Ctrl+C to exit")]
pub struct Cli {
    /// Background color as hex (e.g., --bg-color 1a1b26)
    #[arg(long, value_name = "RRGGBB", value_parser = parse_hex_color)]
    pub bg_color: Option<Rgb>,

    /// Number of colors each firework picks from
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub colors: u8,

    /// Let every particle pick from the full palette
    #[arg(long, conflicts_with = "colors")]
    pub mix: bool,

    /// Target frame rate
    #[arg(
        long,
        default_value_t = TARGET_FPS,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub fps: u32,

    /// Advance the simulation in fixed 1/fps steps instead of the measured frame time
    #[arg(long)]
    pub fixed_step: bool,

    /// Seed for the random number generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the frame rate counter
    #[arg(long)]
    pub hide_fps: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything the terminal driver needs to run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sim: SimConfig,
    pub background: Rgb,
    pub target_fps: u32,
    pub step: StepMode,
    pub seed: Option<u64>,
    pub show_fps: bool,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        let palette_mode = if self.mix {
            PaletteMode::Mixed
        } else {
            PaletteMode::Sampled(usize::from(self.colors).min(Color::ALL.len()))
        };
        let step = if self.fixed_step {
            StepMode::Fixed(1.0 / self.fps as f32)
        } else {
            StepMode::Variable
        };

        Settings {
            sim: SimConfig {
                palette_mode,
                ..SimConfig::default()
            },
            background: self.bg_color.unwrap_or((0, 0, 0)),
            target_fps: self.fps,
            step,
            seed: self.seed,
            show_fps: !self.hide_fps,
        }
    }
}

pub fn parse_hex_color(hex: &str) -> Result<Rgb, String> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB (e.g., 1a1b26), got {hex:?}"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| format!("invalid hex color {hex:?}: {e}"))
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
