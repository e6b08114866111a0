//! Observation for [`GymboyEnv`](crate::GymboyEnv).
use crate::{
    emulator::{Emulator, SCREEN_HEIGHT, SCREEN_WIDTH},
    memory::StateSnapshot,
    title::TitleSpec,
};
use anyhow::{Context, Result};
use gymboy_core::Obs;
use image::{buffer::ConvertBuffer, ImageBuffer, Rgb, Rgba};
use ndarray::{Array1, Array2, Array3};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// How observations are encoded, the middle part of an environment id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ObsEncoding {
    /// Selected memory fields followed by the tile grid, as `f32`.
    Flatten,
    /// The RGB screen, as `u8`.
    FullImage,
    /// The tile grid, as `f32`.
    MinimalImage,
}

#[derive(Debug, Clone, PartialEq)]
/// Observation for [`GymboyEnv`](crate::GymboyEnv).
pub enum GymboyObs {
    Flatten(Array1<f32>),
    MinimalImage(Array2<f32>),
    FullImage(Array3<u8>),
}

impl GymboyObs {
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Flatten(a) => a.shape().to_vec(),
            Self::MinimalImage(a) => a.shape().to_vec(),
            Self::FullImage(a) => a.shape().to_vec(),
        }
    }

    pub fn as_flatten(&self) -> Option<&Array1<f32>> {
        match self {
            Self::Flatten(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_minimal_image(&self) -> Option<&Array2<f32>> {
        match self {
            Self::MinimalImage(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_full_image(&self) -> Option<&Array3<u8>> {
        match self {
            Self::FullImage(a) => Some(a),
            _ => None,
        }
    }
}

impl Obs for GymboyObs {
    fn len(&self) -> usize {
        1
    }
}

/// Turns snapshots (or the screen) into observations of a fixed shape.
pub struct ObservationEncoder {
    encoding: ObsEncoding,
    flatten_fields: &'static [&'static str],
    shape: Vec<usize>,
}

impl ObservationEncoder {
    pub fn new(encoding: ObsEncoding, title: &TitleSpec) -> Self {
        let shape = match encoding {
            ObsEncoding::Flatten => vec![title.flatten_len()],
            ObsEncoding::MinimalImage => vec![title.game_area.height, title.game_area.width],
            ObsEncoding::FullImage => vec![SCREEN_HEIGHT, SCREEN_WIDTH, 3],
        };
        Self {
            encoding,
            flatten_fields: title.flatten_fields,
            shape,
        }
    }

    /// Shape of every observation produced by this encoder.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn encode<E: Emulator + ?Sized>(
        &self,
        snapshot: &StateSnapshot,
        emulator: &E,
    ) -> Result<GymboyObs> {
        let obs = match self.encoding {
            ObsEncoding::Flatten => {
                let values: Vec<f32> = self
                    .flatten_fields
                    .iter()
                    .flat_map(|&f| snapshot.get(f).unwrap_or(&[]).iter())
                    .map(|&v| v as f32)
                    .chain(snapshot.tile_grid().iter().map(|&t| t as f32))
                    .collect();
                GymboyObs::Flatten(Array1::from(values))
            }
            ObsEncoding::MinimalImage => {
                GymboyObs::MinimalImage(snapshot.tile_grid().mapv(|t| t as f32))
            }
            ObsEncoding::FullImage => GymboyObs::FullImage(rgba_to_rgb(&emulator.screen())?),
        };
        debug_assert_eq!(obs.shape(), self.shape);
        Ok(obs)
    }
}

/// Drops the alpha channel of an `H x W x 4` frame.
pub fn rgba_to_rgb(frame: &Array3<u8>) -> Result<Array3<u8>> {
    let (h, w, _) = frame.dim();
    let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        w as u32,
        h as u32,
        frame.iter().copied().collect(),
    )
    .context("Frame is not an RGBA image")?;
    let rgb: ImageBuffer<Rgb<u8>, Vec<u8>> = rgba.convert();
    Ok(Array3::from_shape_vec((h, w, 3), rgb.into_raw())?)
}
