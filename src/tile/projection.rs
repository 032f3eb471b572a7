use crate::tile::TileAddress;
use std::f64::consts::PI;

/// Geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LonLat {
    pub(crate) lon: f64,
    pub(crate) lat: f64,
}

/// Braun-projected position. `x` spans roughly `[-0.5, 0.5]`, `y` is `tan(lat / 2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Loc {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

/// Position relative to a tile's top-left corner, `0..1` spans the tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TilePoint {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl From<LonLat> for Loc {
    fn from(p: LonLat) -> Self {
        Self {
            x: p.lon / 360.0,
            y: (p.lat / 360.0 * PI).tan(),
        }
    }
}

impl From<Loc> for LonLat {
    fn from(loc: Loc) -> Self {
        Self {
            lon: loc.x * 360.0,
            lat: loc.y.atan() * 360.0 / PI,
        }
    }
}

pub(crate) fn loc_to_tile_local(loc: Loc, tile: &TileAddress) -> TilePoint {
    // web mercator
    let y = ((1.0 + loc.y) / (1.0 - loc.y)).ln() / PI / 2.0;

    TilePoint {
        x: (loc.x + 0.5) * tile.z - tile.x,
        y: (-y + 0.5) * tile.z - tile.y,
    }
}

/// Loc of the tile's top-left corner.
pub(crate) fn tile_to_loc(tile: &TileAddress) -> Loc {
    let y = -(tile.y / tile.z - 0.5);

    Loc {
        x: tile.x / tile.z - 0.5,
        // inverse web mercator
        y: 1.0 - 2.0 / ((y * PI * 2.0).exp() + 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: f64, y: f64, zoom: i32) -> TileAddress {
        TileAddress {
            x,
            y,
            z: 2f64.powi(zoom),
        }
    }

    #[test]
    fn braun_projection() {
        let loc = Loc::from(LonLat {
            lon: 90.0,
            lat: 90.0,
        });

        assert!((loc.x - 0.25).abs() < 1e-12);
        assert!((loc.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn lon_lat_roundtrip() {
        for lon in [-180.0, -122.4194, -0.5, 0.0, 17.1077, 179.9] {
            for lat in [-89.0, -45.5, -1e-6, 0.0, 37.7749, 48.1486, 85.0] {
                let back = LonLat::from(Loc::from(LonLat { lon, lat }));

                assert!((back.lon - lon).abs() < 1e-9, "lon {lon} -> {}", back.lon);
                assert!((back.lat - lat).abs() < 1e-9, "lat {lat} -> {}", back.lat);
            }
        }
    }

    #[test]
    fn north_pole_lands_above_the_world() {
        let loc = Loc::from(LonLat {
            lon: 0.0,
            lat: 90.0,
        });

        let p = loc_to_tile_local(loc, &tile(0.0, 0.0, 0));

        assert!(p.y < 0.0);
    }

    #[test]
    fn origin_is_tile_center_at_z0() {
        let p = loc_to_tile_local(Loc { x: 0.0, y: 0.0 }, &tile(0.0, 0.0, 0));

        assert_eq!(p, TilePoint { x: 0.5, y: 0.5 });
    }

    #[test]
    fn tile_corner_maps_back_to_zero() {
        for (x, y, zoom) in [(0.0, 0.0, 0), (1.0, 0.0, 1), (3.0, 5.0, 3), (654.0, 1583.0, 12)] {
            let t = tile(x, y, zoom);

            let p = loc_to_tile_local(tile_to_loc(&t), &t);

            assert!(p.x.abs() < 1e-9, "{x}/{y}@{zoom}: {p:?}");
            assert!(p.y.abs() < 1e-9, "{x}/{y}@{zoom}: {p:?}");
        }
    }

    #[test]
    fn top_edge_of_world() {
        let loc = tile_to_loc(&tile(0.0, 0.0, 0));

        assert_eq!(loc.x, -0.5);
        // tan(85.0511° / 2)
        assert!((loc.y - 0.917_152_3).abs() < 1e-6);
    }
}
