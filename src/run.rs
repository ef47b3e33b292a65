use std::{f32::consts::TAU, path::PathBuf};

use anyhow::Context;
use eddy_fluids::{obstacle::circle::Circle, scene::SceneConfig};
use eddy_io::encode::FluidDataEncoder;
use glam::Vec2;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};

/// Revolutions per second of the orbiting obstacle.
const ORBIT_SPEED: f32 = 0.25;

pub fn run(
    config: &SceneConfig,
    frames: u64,
    fps: u32,
    output: PathBuf,
    orbit: bool,
) -> anyhow::Result<()> {
    let mut scene = config.build();

    let mut encoder = FluidDataEncoder::new(output.clone(), frames, fps)
        .with_context(|| format!("could not create capture directory {}", output.display()))?;
    encoder.encode_metadata(&scene)?;

    let orbit_r = 0.25 * config.size.y;
    let mut circle = Circle::new(
        config.size / 2.0 + Vec2::new(orbit_r, 0.0),
        config.obstacle_radius,
    );
    let circle_id = orbit.then(|| scene.add_obstacle(circle));

    let bar_template = "Running Simulation {spinner:.green} [{elapsed}] [{bar:50.white/white}] {pos}/{len} ({eta})";
    let style = ProgressStyle::with_template(bar_template).unwrap()
        .progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress = ProgressBar::new(frames).with_style(style);

    for frame in (0..frames).progress_with(progress) {
        if let Some(id) = circle_id {
            let t = frame as f32 * config.dt;
            let theta = ORBIT_SPEED * TAU * t;
            let center = config.size / 2.0 + orbit_r * Vec2::new(theta.cos(), theta.sin());

            circle.move_to(center, config.dt);
            scene.insert_obstacle(id, circle);
        }

        scene.step(config.dt);
        encoder.encode_frame(&scene)?;
    }

    let pressure = scene.fluid.min_max_pressure();
    log::info!(
        "captured {frames} frames to {}, final pressure range [{:.1}, {:.1}] Pa",
        output.display(),
        pressure.min,
        pressure.max,
    );

    Ok(())
}
