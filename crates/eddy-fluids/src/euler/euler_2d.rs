use std::mem;

use glam::{UVec2, Vec2};
use ndarray::azip;

use crate::{obstacle::{Obstacle, ObstacleSet}, Fluid};

use super::{Field, MinMax, StaggeredGrid};

#[derive(Debug, Clone)]
pub struct EulerFluid2D {
    /// The density of the fluid, in kg/m³.
    ///
    /// Air is `0` kg/m³ and water is `1000` kg/m³.
    density: f32,
    /// The staggered grid carrying velocities, smoke, pressure and the
    /// solid mask.
    pub grid: StaggeredGrid,
}

impl EulerFluid2D {
    pub fn new(density: f32, num_x: usize, num_y: usize, spacing: f32) -> Self {
        Self {
            density,
            grid: StaggeredGrid::new(num_x, num_y, spacing),
        }
    }

    fn integrate(&mut self, dt: f32, gravity: f32) {
        let g = &mut self.grid;

        for i in 1..g.num_x {
            for j in 1..g.num_y - 1 {
                if g.solid[(i, j)] != 0.0 && g.solid[(i, j - 1)] != 0.0 {
                    g.v[(i, j)] += gravity * dt;
                }
            }
        }
    }

    fn extrapolate(&mut self) {
        let g = &mut self.grid;
        let nx = g.num_x;
        let ny = g.num_y;

        for i in 0..nx {
            g.u[(i, 0)] = g.u[(i, 1)];
            g.u[(i, ny - 1)] = g.u[(i, ny - 2)];
        }

        for j in 0..ny {
            g.v[(0, j)] = g.v[(1, j)];
            g.v[(nx - 1, j)] = g.v[(nx - 2, j)];
        }
    }

    fn solve_incompressibility(&mut self, num_iters: usize, dt: f32, over_relaxation: f32) {
        let g = &mut self.grid;

        g.pressure.fill(0.0);

        let cp = self.density * g.spacing / dt;

        for _iter in 0..num_iters {
            for i in 1..g.num_x - 1 {
                for j in 1..g.num_y - 1 {
                    if g.solid[(i, j)] == 0.0 {
                        continue;
                    }

                    let center = (i, j);
                    let left = (i - 1, j);
                    let right = (i + 1, j);
                    let bottom = (i, j - 1);
                    let top = (i, j + 1);

                    let sx0 = g.solid[left];
                    let sx1 = g.solid[right];
                    let sy0 = g.solid[bottom];
                    let sy1 = g.solid[top];
                    let s = sx0 + sx1 + sy0 + sy1;

                    if s == 0.0 {
                        continue;
                    }

                    let div = g.u[right] - g.u[center] + g.v[top] - g.v[center];

                    let mut p = -div / s;
                    p *= over_relaxation;
                    g.pressure[center] += cp * p;

                    g.u[center] -= sx0 * p;
                    g.u[right] += sx1 * p;
                    g.v[center] -= sy0 * p;
                    g.v[top] += sy1 * p;
                }
            }
        }
    }

    fn advect_velocity(&mut self, dt: f32) {
        let g = &mut self.grid;

        g.new_u.assign(&g.u);
        g.new_v.assign(&g.v);

        let h = g.spacing;
        let h2 = 0.5 * h;

        for i in 1..g.num_x {
            for j in 1..g.num_y {
                // u component
                if g.solid[(i, j)] != 0.0 && g.solid[(i - 1, j)] != 0.0 && j < g.num_y - 1 {
                    let u = g.u[(i, j)];
                    let v = g.avg_v(i, j);
                    let x = i as f32 * h - dt * u;
                    let y = j as f32 * h + h2 - dt * v;

                    g.new_u[(i, j)] = g.sample(x, y, Field::U);
                }

                // v component
                if g.solid[(i, j)] != 0.0 && g.solid[(i, j - 1)] != 0.0 && i < g.num_x - 1 {
                    let u = g.avg_u(i, j);
                    let v = g.v[(i, j)];
                    let x = i as f32 * h + h2 - dt * u;
                    let y = j as f32 * h - dt * v;

                    g.new_v[(i, j)] = g.sample(x, y, Field::V);
                }
            }
        }

        mem::swap(&mut g.u, &mut g.new_u);
        mem::swap(&mut g.v, &mut g.new_v);
    }

    fn advect_smoke(&mut self, dt: f32) {
        let g = &mut self.grid;

        g.new_m.assign(&g.smoke);

        let h = g.spacing;
        let h2 = 0.5 * h;

        for i in 1..g.num_x - 1 {
            for j in 1..g.num_y - 1 {
                if g.solid[(i, j)] != 0.0 {
                    let u = (g.u[(i, j)] + g.u[(i + 1, j)]) * 0.5;
                    let v = (g.v[(i, j)] + g.v[(i, j + 1)]) * 0.5;
                    let x = i as f32 * h + h2 - dt * u;
                    let y = j as f32 * h + h2 - dt * v;

                    g.new_m[(i, j)] = g.sample(x, y, Field::M);
                }
            }
        }

        mem::swap(&mut g.smoke, &mut g.new_m);
    }

    /// Advance the fluid by `dt` seconds: integrate forces, extrapolate the
    /// border velocities, project out divergence and advect.
    pub fn simulate(&mut self, dt: f32, gravity: f32, num_iters: usize, over_relaxation: f32) {
        self.integrate(dt, gravity);
        self.extrapolate();
        self.solve_incompressibility(num_iters, dt, over_relaxation);
        self.advect_velocity(dt);
        self.advect_smoke(dt);
    }

    /// Pressure extrema over the fluid cells of the grid.
    pub fn min_max_pressure(&self) -> MinMax {
        let g = &self.grid;

        let mut min = f32::MAX;
        let mut max = f32::MIN;

        azip!((&p in &g.pressure, &s in &g.solid) {
            if s != 0.0 {
                min = min.min(p);
                max = max.max(p);
            }
        });

        if min > max {
            return MinMax::default();
        }

        MinMax { min, max }
    }

    /// Rasterize the obstacle set onto the solid mask, stamping the obstacle
    /// velocity onto the faces of covered cells. Interior cells no longer
    /// covered revert to fluid.
    pub fn set_obstacles(&mut self, obstacles: &ObstacleSet) {
        let g = &mut self.grid;

        for i in 1..g.num_x - 2 {
            for j in 1..g.num_y - 2 {
                g.solid[(i, j)] = 1.0;
                let p = Vec2::new(i as f32 + 0.5, j as f32 + 0.5) * g.spacing;
                let sdf = obstacles.sdf(p);

                if sdf.distance < 0.0 {
                    let vel = obstacles.velocity(p);
                    g.solid[(i, j)] = 0.0;
                    g.smoke[(i, j)] = 1.0;
                    g.u[(i, j)] = vel.x;
                    g.v[(i, j)] = vel.y;
                    g.u[(i + 1, j)] = vel.x;
                    g.v[(i, j + 1)] = vel.y;
                }
            }
        }
    }
}

pub struct EulerFluid2DParams {
    pub num_substeps: usize,
    pub gravity: f32,
    pub num_pressure_iters: usize,
    pub over_relaxation: f32,
    pub use_over_relaxation: bool,
}

impl Default for EulerFluid2DParams {
    fn default() -> Self {
        Self {
            num_substeps: 1,
            gravity: -9.81,
            num_pressure_iters: 40,
            over_relaxation: 1.9,
            use_over_relaxation: true,
        }
    }
}

impl Fluid for EulerFluid2D {
    type Params = EulerFluid2DParams;

    fn step(&mut self, dt: f32, params: &Self::Params, obstacles: &ObstacleSet) {
        let sdt = dt / params.num_substeps as f32;
        let over_relaxation = if params.use_over_relaxation {
            params.over_relaxation
        } else {
            1.0
        };

        self.set_obstacles(obstacles);

        for _step in 0..params.num_substeps {
            self.simulate(sdt, params.gravity, params.num_pressure_iters, over_relaxation);
        }
    }

    fn grid_size(&self) -> UVec2 {
        self.grid.grid_size
    }

    fn spacing(&self) -> f32 {
        self.grid.spacing
    }
}
