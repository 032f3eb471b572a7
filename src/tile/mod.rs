pub(crate) use address::{TileAddress, TileCoord, parse_tile_path};
pub(crate) use builder::{TileBuildError, build_tile};
pub(crate) use geometry::encode_points;
pub(crate) use projection::{LonLat, Loc};

mod address;
mod builder;
mod geometry;
mod projection;
pub(crate) mod vector_tile;

/// Coordinate resolution per tile side.
pub(crate) const DEFAULT_EXTENT: u32 = 4096;

/// Layer format version written into every tile.
pub(crate) const LAYER_VERSION: u32 = 1;

pub(crate) const LAYER_NAME: &str = "points";
