use crate::tile::projection::{Loc, tile_to_loc};
use regex::Regex;
use std::{fmt::Display, str::FromStr, sync::LazyLock};

static TILE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<z>[0-9]+)/(?P<x>[0-9]+)/(?P<y>[0-9]+)")
        .expect("tile path regex")
});

/// Tile as addressed in the URL.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct TileCoord {
    pub(crate) zoom: u32,
    pub(crate) x: u32,
    pub(crate) y: u32,
}

/// Tile column/row with `z` as the linear scale `2^zoom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TileAddress {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) z: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BoundingBox {
    pub(crate) x_range: [f64; 2],
    pub(crate) y_range: [f64; 2],
}

impl TileCoord {
    pub(crate) fn address(self) -> TileAddress {
        TileAddress {
            x: f64::from(self.x),
            y: f64::from(self.y),
            z: f64::from(self.zoom).exp2(),
        }
    }
}

impl BoundingBox {
    /// Half-open on both axes: a point on the max edge belongs to the neighbouring tile.
    pub(crate) fn contains(&self, loc: Loc) -> bool {
        loc.x >= self.x_range[0]
            && loc.x < self.x_range[1]
            && loc.y >= self.y_range[0]
            && loc.y < self.y_range[1]
    }
}

impl Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

impl FromStr for TileCoord {
    type Err = TileCoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = TILE_PATH
            .captures(s)
            .ok_or(TileCoordParseError::InvalidFormat)?;

        Ok(Self {
            zoom: captures["z"].parse()?,
            x: captures["x"].parse()?,
            y: captures["y"].parse()?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum TileCoordParseError {
    #[error("invalid tile coordinate format")]
    InvalidFormat,
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),
}

/// Parses the first `<zoom>/<x>/<y>` triplet found in `path`; text around it is ignored.
///
/// Column and row are not checked against the zoom; tiles outside the world are just empty.
pub(crate) fn parse_tile_path(path: &str) -> Result<TileCoord, TileCoordParseError> {
    path.parse()
}

/// Row increases southwards, so the lower edge comes from the next row's top corner.
pub(crate) fn tile_bounding_box(tile: &TileAddress) -> BoundingBox {
    let upper = tile_to_loc(tile);

    let lower = tile_to_loc(&TileAddress {
        x: tile.x,
        y: tile.y + 1.0,
        z: tile.z,
    });

    BoundingBox {
        x_range: [upper.x, upper.x + 1.0 / tile.z],
        y_range: [lower.y, upper.y],
    }
}
