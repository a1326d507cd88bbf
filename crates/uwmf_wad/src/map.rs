//! The tile map description consumed by the converter
//!

use bon::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Geometry of a tile map
///
/// Only the map level metadata is described here, per tile data is not part of the generated archive.
/// With the `serde` feature enabled this deserializes directly from a Tiled JSON map (`.tmj`), any
/// other keys in the document are ignored.
///
/// ```
/// use uwmf_wad::MapDescriptor;
///
/// let map = MapDescriptor::builder()
///     .tile_width(64)
///     .tile_height(64)
///     .width(10)
///     .height(10)
///     .build();
///
/// assert_eq!(map.validate(), Ok(64));
/// ```
#[derive(Builder, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapDescriptor {
    /// Whether the map grows without bounds, these cannot be converted
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub infinite: bool,

    /// Width of a single tile in pixels
    #[cfg_attr(feature = "serde", serde(rename = "tilewidth"))]
    pub tile_width: u32,

    /// Height of a single tile in pixels
    #[cfg_attr(feature = "serde", serde(rename = "tileheight"))]
    pub tile_height: u32,

    /// Width of the map in tiles
    pub width: u32,

    /// Height of the map in tiles
    pub height: u32,
}

impl MapDescriptor {
    /// Check that the map can be represented, returning the size of its square tiles.
    ///
    /// Infinite maps are rejected before tile shape is considered.
    pub fn validate(&self) -> Result<u32, GeometryError> {
        if self.infinite {
            return Err(GeometryError::InfiniteMap);
        }

        if self.tile_width != self.tile_height {
            return Err(GeometryError::NonSquareTile {
                width: self.tile_width,
                height: self.tile_height,
            });
        }

        Ok(self.tile_width)
    }

    /// Read the map geometry out of a Tiled JSON map.
    #[cfg(feature = "serde")]
    pub fn from_tiled_json<R: std::io::Read>(reader: R) -> crate::error::Result<MapDescriptor> {
        Ok(serde_json::from_reader(reader)?)
    }
}
