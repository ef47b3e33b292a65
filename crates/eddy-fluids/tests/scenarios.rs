//! Integration tests for the Euler grid solver.
//!
//! Each test drives a full preset scene end to end and checks a bulk
//! property of the result:
//! 1. A resting tank settles to a hydrostatic pressure profile.
//! 2. A wind tunnel carries its smoke band downstream at the inlet speed
//!    while the channel walls stay impermeable.

use eddy_fluids::scene::{SceneConfig, ScenePreset};

const TANK_STEPS: usize = 60;
const TUNNEL_STEPS: usize = 30;

#[test]
fn tank_settles_to_hydrostatic_pressure() {
    let config = SceneConfig::new(ScenePreset::Tank);
    let mut scene = config.build();

    for _ in 0..TANK_STEPS {
        scene.step(config.dt);
    }

    let g = &scene.fluid.grid;

    // No flow through the tank walls.
    for j in 0..g.num_y {
        assert_eq!(g.u[(1, j)], 0.0, "flow through the left wall at j = {j}");
        assert_eq!(
            g.u[(g.num_x - 1, j)],
            0.0,
            "flow through the right wall at j = {j}"
        );
    }
    for i in 0..g.num_x {
        assert_eq!(g.v[(i, 1)], 0.0, "flow through the floor at i = {i}");
    }

    // Mean pressure per row, over fluid cells.
    let row_mean = |j: usize| {
        let mut sum = 0.0;
        let mut count = 0;
        for i in 0..g.num_x {
            if g.solid[(i, j)] != 0.0 {
                sum += g.pressure[(i, j)];
                count += 1;
            }
        }
        sum / count as f32
    };

    let samples = [1, g.num_y / 4, g.num_y / 2, 3 * g.num_y / 4, g.num_y - 2];
    for pair in samples.windows(2) {
        let (below, above) = (row_mean(pair[0]), row_mean(pair[1]));
        assert!(
            below > above,
            "pressure must fall with height: row {} has {below}, row {} has {above}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn wind_tunnel_transports_the_smoke_band_at_inlet_speed() {
    let mut config = SceneConfig::new(ScenePreset::WindTunnel);
    config.obstacle = None;
    let mut scene = config.build();

    for _ in 0..TUNNEL_STEPS {
        scene.step(config.dt);
    }

    let g = &scene.fluid.grid;

    // The forced inlet column is never overwritten.
    for j in 0..g.num_y {
        assert_eq!(g.u[(1, j)], config.inlet_velocity);
    }

    // Floor and ceiling stay impermeable.
    for i in 0..g.num_x {
        assert_eq!(g.v[(i, 1)], 0.0, "flow through the floor at i = {i}");
        assert_eq!(
            g.v[(i, g.num_y - 1)],
            0.0,
            "flow through the ceiling at i = {i}"
        );
    }

    // The leading edge of the clear band has travelled at the inlet speed.
    let j_mid = g.num_y / 2;
    let mut edge = 0;
    for i in 0..g.num_x {
        if g.smoke[(i, j_mid)] < 0.5 {
            edge = i;
        }
    }

    let edge_x = (edge as f32 + 0.5) * g.spacing;
    let expected = config.inlet_velocity * TUNNEL_STEPS as f32 * config.dt;

    assert!(
        (edge_x - expected).abs() < 0.12,
        "smoke edge at {edge_x}, expected around {expected}"
    );
}
