use glam::UVec2;
use ndarray::Array2;

use super::Field;

/// Staggered grid holding the simulation fields.
///
/// Horizontal velocities live on the left cell faces, vertical velocities on
/// the bottom cell faces, and smoke, pressure and the solid mask at cell
/// centers. Arrays are indexed `(i, j)` with `i` the column, so consecutive
/// memory walks a column bottom to top.
#[derive(Debug, Clone)]
pub struct StaggeredGrid {
    /// Size of the grid, in cells, border included.
    pub grid_size: UVec2,
    /// Number of columns, border included.
    pub num_x: usize,
    /// Number of rows, border included.
    pub num_y: usize,
    /// Cell size.
    pub spacing: f32,
    /// 1.0 / spacing.
    pub inv_spacing: f32,
    /// Horizontal velocity components, on left cell faces.
    pub u: Array2<f32>,
    /// Vertical velocity components, on bottom cell faces.
    pub v: Array2<f32>,
    /// Write buffer for horizontal velocities during advection.
    pub new_u: Array2<f32>,
    /// Write buffer for vertical velocities during advection.
    pub new_v: Array2<f32>,
    /// Solid grid cells. `0.0` for solid and `1.0` for fluid.
    pub solid: Array2<f32>,
    /// Smoke density per cell, in `[0, 1]`.
    pub smoke: Array2<f32>,
    /// Write buffer for smoke during advection.
    pub new_m: Array2<f32>,
    /// Accumulated pressure of each cell.
    pub pressure: Array2<f32>,
}

impl StaggeredGrid {
    /// Create a grid of `num_x` by `num_y` interior cells surrounded by a
    /// one cell border ring, all cells fluid and filled with smoke.
    pub fn new(num_x: usize, num_y: usize, spacing: f32) -> Self {
        let num_x = num_x + 2;
        let num_y = num_y + 2;

        Self {
            grid_size: UVec2::new(num_x as u32, num_y as u32),
            num_x,
            num_y,
            spacing,
            inv_spacing: 1.0 / spacing,
            u: Array2::from_elem((num_x, num_y), 0.0),
            v: Array2::from_elem((num_x, num_y), 0.0),
            new_u: Array2::from_elem((num_x, num_y), 0.0),
            new_v: Array2::from_elem((num_x, num_y), 0.0),
            solid: Array2::from_elem((num_x, num_y), 1.0),
            smoke: Array2::from_elem((num_x, num_y), 1.0),
            new_m: Array2::from_elem((num_x, num_y), 0.0),
            pressure: Array2::from_elem((num_x, num_y), 0.0),
        }
    }

    /// Bilinearly interpolate `field` at world position `(x, y)`.
    ///
    /// The position is clamped to the grid, so tracing a point outside the
    /// domain samples the nearest border value.
    pub fn sample(&self, x: f32, y: f32, field: Field) -> f32 {
        let h = self.spacing;
        let h1 = self.inv_spacing;
        let h2 = 0.5 * h;

        let x = x.clamp(h, self.num_x as f32 * h);
        let y = y.clamp(h, self.num_y as f32 * h);

        let (f, dx, dy) = match field {
            Field::U => (&self.u, 0.0, h2),
            Field::V => (&self.v, h2, 0.0),
            Field::M => (&self.smoke, h2, h2),
        };

        let x0 = (((x - dx) * h1).floor() as usize).min(self.num_x - 1);
        let tx = ((x - dx) - x0 as f32 * h) * h1;
        let x1 = (x0 + 1).min(self.num_x - 1);

        let y0 = (((y - dy) * h1).floor() as usize).min(self.num_y - 1);
        let ty = ((y - dy) - y0 as f32 * h) * h1;
        let y1 = (y0 + 1).min(self.num_y - 1);

        let sx = 1.0 - tx;
        let sy = 1.0 - ty;

        sx * sy * f[(x0, y0)]
            + tx * sy * f[(x1, y0)]
            + tx * ty * f[(x1, y1)]
            + sx * ty * f[(x0, y1)]
    }

    /// Average the four horizontal face velocities around the vertical
    /// velocity sample at `(i, j)`.
    pub fn avg_u(&self, i: usize, j: usize) -> f32 {
        0.25 * (self.u[(i, j - 1)] + self.u[(i, j)] + self.u[(i + 1, j - 1)] + self.u[(i + 1, j)])
    }

    /// Average the four vertical face velocities around the horizontal
    /// velocity sample at `(i, j)`.
    pub fn avg_v(&self, i: usize, j: usize) -> f32 {
        0.25 * (self.v[(i - 1, j)] + self.v[(i, j)] + self.v[(i - 1, j + 1)] + self.v[(i, j + 1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_stored_row_by_column() {
        let mut grid = StaggeredGrid::new(4, 3, 0.5);

        grid.smoke[(2, 3)] = 0.25;

        let num_y = grid.num_y;
        let flat = grid.smoke.as_slice().unwrap();
        assert_eq!(flat[2 * num_y + 3], 0.25);
    }

    #[test]
    fn new_grid_is_still_fluid_without_smoke_motion() {
        let grid = StaggeredGrid::new(8, 8, 0.1);

        assert_eq!(grid.num_x, 10);
        assert_eq!(grid.num_y, 10);
        assert!(grid.u.iter().all(|&u| u == 0.0));
        assert!(grid.v.iter().all(|&v| v == 0.0));
        assert!(grid.solid.iter().all(|&s| s == 1.0));
        assert!(grid.smoke.iter().all(|&m| m == 1.0));
    }

    #[test]
    fn sampling_at_a_sample_point_returns_the_stored_value() {
        let mut grid = StaggeredGrid::new(6, 6, 0.25);
        let h = grid.spacing;
        let h2 = 0.5 * h;

        grid.u[(3, 4)] = 1.5;
        grid.v[(2, 5)] = -0.75;
        grid.smoke[(4, 2)] = 0.125;

        let u = grid.sample(3.0 * h, 4.0 * h + h2, Field::U);
        let v = grid.sample(2.0 * h + h2, 5.0 * h, Field::V);
        let m = grid.sample(4.0 * h + h2, 2.0 * h + h2, Field::M);

        assert!((u - 1.5).abs() < 1e-4, "u sample was {u}");
        assert!((v + 0.75).abs() < 1e-4, "v sample was {v}");
        assert!((m - 0.125).abs() < 1e-4, "m sample was {m}");
    }

    #[test]
    fn sampling_clamps_to_the_domain() {
        let mut grid = StaggeredGrid::new(4, 4, 0.5);
        grid.smoke.fill(0.0);
        grid.smoke[(1, 1)] = 1.0;

        let inside = grid.sample(grid.spacing, grid.spacing, Field::M);
        let outside = grid.sample(-10.0, -10.0, Field::M);

        assert_eq!(inside, outside);
    }

    #[test]
    fn face_averages_reconstruct_uniform_fields() {
        let mut grid = StaggeredGrid::new(5, 5, 0.2);
        grid.u.fill(2.0);
        grid.v.fill(-3.0);

        assert_eq!(grid.avg_u(3, 3), 2.0);
        assert_eq!(grid.avg_v(3, 3), -3.0);
    }
}
