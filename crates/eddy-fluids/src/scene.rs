use glam::Vec2;

use super::{euler::euler_2d::{EulerFluid2D, EulerFluid2DParams}, obstacle::{circle::Circle, Obstacle, ObstacleId, ObstacleSet}, Fluid};

pub struct Scene<F, P> {
    /// The fluid for this scene.
    pub fluid: F,
    /// The parameters for this scene's fluid.
    params: P,
    /// Domain size, in meters.
    size: Vec2,
    /// The obstacles in this scene.
    obstacles: ObstacleSet,
    /// The number of obstacles (used for IDs).
    n_obstacles: usize,
}

impl<F: Fluid<Params = P>, P> Scene<F, P> {
    #[inline(always)]
    pub fn new(fluid: F, params: P, size: Vec2) -> Self {
        Self {
            params,
            fluid,
            size,
            obstacles: ObstacleSet::default(),
            n_obstacles: 0,
        }
    }

    #[inline(always)]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Adds an obstacle to the set, returning its ID.
    pub fn add_obstacle<T: Obstacle + 'static>(&mut self, obstacle: T) -> ObstacleId {
        let i = self.n_obstacles;
        self.n_obstacles += 1;

        self.obstacles.obstacles.insert(i, Box::new(obstacle));
        ObstacleId(i)
    }

    /// Removes an obstacle from the set, given its ID.
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Box<dyn Obstacle>> {
        self.obstacles.obstacles.remove(&id.0)
    }

    /// Insert an obstacle into the set at the given ID, overriding and returning the old value if
    /// it was previously in the set.
    pub fn insert_obstacle<T: Obstacle + 'static>(&mut self, id: ObstacleId, obstacle: T) -> Option<Box<dyn Obstacle>> {
        self.obstacles.obstacles.insert(id.0, Box::new(obstacle))
    }

    pub fn step(&mut self, dt: f32) {
        self.fluid.step(
            dt,
            &self.params,
            &self.obstacles,
        );
    }
}

/// The canned scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePreset {
    /// A tank of resting fluid, open at the top.
    Tank,
    /// Flow entering from the left, streaming past an obstacle.
    WindTunnel,
    /// The wind tunnel at double resolution and half the time step.
    HighResWindTunnel,
    /// A closed box without gravity, stirred by a moving obstacle.
    Paint,
}

/// Tuning for a canned scene.
///
/// `SceneConfig::new` fills in the values a preset is normally run with.
/// Every field is public and may be overridden before calling
/// [`build`](SceneConfig::build).
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub preset: ScenePreset,
    /// Number of grid cells along the domain height.
    pub resolution: usize,
    pub size: Vec2,
    pub density: f32,
    pub dt: f32,
    pub num_substeps: usize,
    pub num_iters: usize,
    pub over_relaxation: f32,
    pub use_over_relaxation: bool,
    pub gravity: f32,
    /// Horizontal velocity forced at the inlet column of wind tunnels.
    pub inlet_velocity: f32,
    /// Height of the clear smoke band at the inlet, as a fraction of the
    /// grid height.
    pub smoke_band: f32,
    /// Initial obstacle position, in meters.
    pub obstacle: Option<Vec2>,
    pub obstacle_radius: f32,
}

impl SceneConfig {
    pub fn new(preset: ScenePreset) -> Self {
        let resolution = match preset {
            ScenePreset::Tank => 50,
            ScenePreset::WindTunnel | ScenePreset::Paint => 100,
            ScenePreset::HighResWindTunnel => 200,
        };

        let is_wind_tunnel = matches!(
            preset,
            ScenePreset::WindTunnel | ScenePreset::HighResWindTunnel
        );

        Self {
            preset,
            resolution,
            size: Vec2::new(2.0, 1.0),
            density: 1000.0,
            dt: if preset == ScenePreset::HighResWindTunnel { 1.0 / 120.0 } else { 1.0 / 60.0 },
            num_substeps: 1,
            num_iters: if preset == ScenePreset::HighResWindTunnel { 100 } else { 40 },
            over_relaxation: if preset == ScenePreset::Paint { 1.0 } else { 1.9 },
            use_over_relaxation: true,
            gravity: if preset == ScenePreset::Tank { -9.81 } else { 0.0 },
            inlet_velocity: if is_wind_tunnel { 2.0 } else { 0.0 },
            smoke_band: if is_wind_tunnel { 0.1 } else { 0.0 },
            obstacle: if is_wind_tunnel { Some(Vec2::new(0.4, 0.5)) } else { None },
            obstacle_radius: if preset == ScenePreset::Paint { 0.1 } else { 0.15 },
        }
    }

    /// Cell size of the grid this configuration produces.
    pub fn spacing(&self) -> f32 {
        self.size.y / self.resolution as f32
    }

    /// Interior grid resolution, border cells excluded.
    pub fn grid_resolution(&self) -> (usize, usize) {
        let num_y = (self.size.y / self.spacing()).floor() as usize;
        let num_x = 2 * num_y;
        (num_x, num_y)
    }

    /// Builds the scene: a fluid with the preset's walls, smoke and inlet
    /// flow stamped in, paired with its stepping parameters.
    pub fn build(&self) -> Scene<EulerFluid2D, EulerFluid2DParams> {
        let (num_x, num_y) = self.grid_resolution();
        let mut fluid = EulerFluid2D::new(self.density, num_x, num_y, self.spacing());

        let g = &mut fluid.grid;
        let nx = g.num_x;
        let ny = g.num_y;

        match self.preset {
            ScenePreset::Tank => {
                for i in 0..nx {
                    for j in 0..ny {
                        if i == 0 || i == nx - 1 || j == 0 {
                            g.solid[(i, j)] = 0.0;
                        }
                    }
                }
            }
            ScenePreset::WindTunnel | ScenePreset::HighResWindTunnel => {
                for i in 0..nx {
                    for j in 0..ny {
                        if i == 0 || j == 0 || j == ny - 1 {
                            g.solid[(i, j)] = 0.0;
                        }
                    }
                }

                for j in 0..ny {
                    g.u[(1, j)] = self.inlet_velocity;
                }

                let pipe_h = self.smoke_band * ny as f32;
                let min_j = (0.5 * ny as f32 - 0.5 * pipe_h).floor() as usize;
                let max_j = (0.5 * ny as f32 + 0.5 * pipe_h).floor() as usize;

                for j in min_j..max_j {
                    g.smoke[(0, j)] = 0.0;
                }
            }
            ScenePreset::Paint => {
                for i in 0..nx {
                    for j in 0..ny {
                        if i == 0 || i == nx - 1 || j == 0 || j == ny - 1 {
                            g.solid[(i, j)] = 0.0;
                        }
                    }
                }
            }
        }

        let params = EulerFluid2DParams {
            num_substeps: self.num_substeps,
            gravity: self.gravity,
            num_pressure_iters: self.num_iters,
            over_relaxation: self.over_relaxation,
            use_over_relaxation: self.use_over_relaxation,
        };

        let mut scene = Scene::new(fluid, params, self.size);

        if let Some(position) = self.obstacle {
            scene.add_obstacle(Circle::new(position, self.obstacle_radius));
        }

        scene
    }
}
