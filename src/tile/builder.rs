use crate::tile::{
    LAYER_NAME, LAYER_VERSION,
    vector_tile::{Feature, GeomType, Layer, Tile},
};
use prost::Message;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum TileBuildError {
    #[error("Tile encoding error: {0}")]
    Encode(#[from] prost::EncodeError),
}

/// Serializes a point geometry stream as a single-feature `points` layer.
pub(crate) fn build_tile(geometry: Vec<u32>, extent: u32) -> Result<Vec<u8>, TileBuildError> {
    let tile = Tile {
        layers: vec![Layer {
            version: LAYER_VERSION,
            name: LAYER_NAME.to_string(),
            features: vec![Feature {
                id: None,
                tags: Vec::new(),
                r#type: Some(GeomType::Point.into()),
                geometry,
            }],
            keys: Vec::new(),
            values: Vec::new(),
            extent: Some(extent),
        }],
    };

    let mut buf = Vec::with_capacity(tile.encoded_len());

    tile.encode(&mut buf)?;

    Ok(buf)
}
