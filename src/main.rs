use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eddy_fluids::scene::{SceneConfig, ScenePreset};

mod run;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Tank,
    WindTunnel,
    HighResWindTunnel,
    Paint,
}

impl From<Preset> for ScenePreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Tank => ScenePreset::Tank,
            Preset::WindTunnel => ScenePreset::WindTunnel,
            Preset::HighResWindTunnel => ScenePreset::HighResWindTunnel,
            Preset::Paint => ScenePreset::Paint,
        }
    }
}

/// Runs a preset scene and captures it to disk.
#[derive(Parser)]
struct Cli {
    /// Scene to simulate.
    #[arg(value_enum, default_value_t = Preset::WindTunnel)]
    preset: Preset,

    /// Number of frames to capture.
    #[arg(short = 'n', long, default_value_t = 600)]
    frames: u64,

    /// Captured frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Directory the capture is written to. Must not exist yet.
    #[arg(short, long, default_value = "output/fluid")]
    output: PathBuf,

    /// Run the pressure solve without over-relaxation.
    #[arg(long)]
    no_over_relaxation: bool,

    /// Drive the scene's obstacle along a circular path.
    #[arg(long)]
    orbit: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = SceneConfig::new(cli.preset.into());
    config.use_over_relaxation = !cli.no_over_relaxation;

    let (num_x, num_y) = config.grid_resolution();
    log::info!(
        "{:?}: {num_x}x{num_y} cells, dt = {}s, {} pressure iterations",
        config.preset,
        config.dt,
        config.num_iters,
    );

    run::run(&config, cli.frames, cli.fps, cli.output, cli.orbit)
}
