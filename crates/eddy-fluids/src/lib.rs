use glam::UVec2;
use obstacle::ObstacleSet;

pub mod euler;
pub mod obstacle;
pub mod scene;

pub trait Fluid {
    type Params;

    fn step(&mut self, dt: f32, params: &Self::Params, obstacles: &ObstacleSet);

    /// Size of the grid, in cells, border included.
    fn grid_size(&self) -> UVec2;

    /// Cell size.
    fn spacing(&self) -> f32;
}
