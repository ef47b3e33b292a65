use std::{fs::File, io::{BufRead, BufReader}, path::PathBuf};

use glam::Vec2;
use thiserror::Error;

use super::as_bytes::AsBytes;

pub struct FluidDataDecoder {
    /// The path to the directory in which the fluid data resides.
    path: PathBuf,
    num_frames: u64,
    current_frame: u64,
}

impl FluidDataDecoder {
    pub fn new(path: PathBuf) -> FluidDataDecoder {
        Self {
            path,
            num_frames: 0,
            current_frame: 0,
        }
    }

    fn read_value<const N: usize, T: AsBytes<N>, R: BufRead>(reader: &mut R) -> Result<T, DecodingError> {
        let mut bytes = [0; N];
        reader.read_exact(&mut bytes)?;

        Ok(T::from_bytes(bytes))
    }

    fn read_values<R: BufRead>(reader: &mut R, count: usize) -> Result<Vec<f32>, DecodingError> {
        let mut bytes = vec![0; 4 * count];
        reader.read_exact(&mut bytes)?;

        Ok(bytes
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes(b.try_into().unwrap()))
            .collect())
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        let max_digits = (self.num_frames - 1).checked_ilog10().unwrap_or(0) + 1;
        let zeros = max_digits - (frame.checked_ilog10().unwrap_or(0) + 1);

        self.path.join(format!("{}{frame}.dat", "0".repeat(zeros as usize)))
    }

    pub fn decode_metadata(&mut self) -> Result<FluidMetadata, DecodingError> {
        let path = self.path.join("_meta");
        let mut reader = BufReader::new(File::open(path)?);

        let fps = Self::read_value::<4, u32, _>(&mut reader)?;
        let num_frames = Self::read_value::<8, u64, _>(&mut reader)?;
        let width = Self::read_value::<4, u32, _>(&mut reader)?;
        let height = Self::read_value::<4, u32, _>(&mut reader)?;
        let spacing = Self::read_value::<4, f32, _>(&mut reader)?;
        let size = Self::read_value::<8, Vec2, _>(&mut reader)?;

        self.num_frames = num_frames;

        Ok(FluidMetadata {
            fps,
            num_frames,
            grid_size: (width, height),
            spacing,
            size,
        })
    }

    pub fn decode_frame(&mut self) -> Result<Option<FluidFrameData>, DecodingError> {
        if self.current_frame >= self.num_frames {
            return Ok(None)
        }

        let path = self.frame_path(self.current_frame);
        let mut reader = BufReader::new(File::open(path)?);

        let len = Self::read_value::<8, u64, _>(&mut reader)?;
        let smoke = Self::read_values(&mut reader, len as usize)?;

        let len = Self::read_value::<8, u64, _>(&mut reader)?;
        let pressure = Self::read_values(&mut reader, len as usize)?;

        if !reader.fill_buf()?.is_empty() {
            return Err(DecodingError::TrailingData(self.current_frame));
        }

        self.current_frame += 1;

        Ok(Some(FluidFrameData {
            smoke,
            pressure,
        }))
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
    }
}

pub struct FluidMetadata {
    pub fps: u32,
    pub num_frames: u64,
    /// Size of the grid in cells, border included.
    pub grid_size: (u32, u32),
    pub spacing: f32,
    /// Domain size, in meters.
    pub size: Vec2,
}

pub struct FluidFrameData {
    pub smoke: Vec<f32>,
    pub pressure: Vec<f32>,
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("capture frame {0} has trailing data")]
    TrailingData(u64),
}
