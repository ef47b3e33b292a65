use std::io::Write;

use encode::{EncodingError, FluidFrameEncoder};
use eddy_fluids::euler::euler_2d::EulerFluid2D;

pub mod encode;
pub mod decode;
pub mod as_bytes;

pub trait EncodeFluid {
    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError>;
}

impl EncodeFluid for EulerFluid2D {
    fn encode_state<W: std::io::Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError> {
        let grid = &self.grid;

        encoder.encode_section(grid.smoke.len(), grid.smoke.iter().copied())?;
        encoder.encode_section(grid.pressure.len(), grid.pressure.iter().copied())?;

        Ok(())
    }
}
