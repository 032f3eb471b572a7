use crate::tile::{
    TileAddress,
    address::tile_bounding_box,
    projection::{Loc, loc_to_tile_local},
};

const MOVE_TO: u32 = 1;

fn command(id: u32, count: u32) -> u32 {
    (id & 0x7) | (count << 3)
}

pub(crate) fn move_to(count: u32) -> u32 {
    command(MOVE_TO, count)
}

pub(crate) fn zigzag(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Encodes the points falling into `tile` as a single MoveTo command.
///
/// Points keep their input order and each one is delta-encoded against the previously
/// emitted point, starting from the tile origin.
pub(crate) fn encode_points(points: &[Loc], tile: &TileAddress, extent: u32) -> Vec<u32> {
    let bbox = tile_bounding_box(tile);
    let extent = f64::from(extent);

    let mut geometry = vec![move_to(0)];
    let (mut px, mut py) = (0i32, 0i32);

    for &loc in points.iter().filter(|&&loc| bbox.contains(loc)) {
        let p = loc_to_tile_local(loc, tile);

        let x = (extent * p.x + 0.5).floor() as i32;
        let y = (extent * p.y + 0.5).floor() as i32;

        geometry.push(zigzag(x.wrapping_sub(px)));
        geometry.push(zigzag(y.wrapping_sub(py)));

        (px, py) = (x, y);
    }

    geometry[0] = move_to(((geometry.len() - 1) / 2) as u32);

    geometry
}
