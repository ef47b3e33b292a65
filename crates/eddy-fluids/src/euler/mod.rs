pub mod euler_2d;
mod grid;

pub use grid::StaggeredGrid;

/// Selects which staggered field a bilinear sample reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    U,
    V,
    M,
}

/// Extrema of the accumulated pressure field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
}
