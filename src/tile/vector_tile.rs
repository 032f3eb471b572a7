//! Mapbox vector tile messages (`vector_tile.proto`, version 2.1).

use prost::Message;

#[derive(Clone, PartialEq, Message)]
pub(crate) struct Tile {
    #[prost(message, repeated, tag = "3")]
    pub(crate) layers: Vec<Layer>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct Layer {
    #[prost(uint32, required, tag = "15", default = "1")]
    pub(crate) version: u32,
    #[prost(string, required, tag = "1")]
    pub(crate) name: String,
    #[prost(message, repeated, tag = "2")]
    pub(crate) features: Vec<Feature>,
    #[prost(string, repeated, tag = "3")]
    pub(crate) keys: Vec<String>,
    #[prost(message, repeated, tag = "4")]
    pub(crate) values: Vec<Value>,
    #[prost(uint32, optional, tag = "5", default = "4096")]
    pub(crate) extent: Option<u32>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct Feature {
    #[prost(uint64, optional, tag = "1")]
    pub(crate) id: Option<u64>,
    #[prost(uint32, repeated, packed = "true", tag = "2")]
    pub(crate) tags: Vec<u32>,
    #[prost(enumeration = "GeomType", optional, tag = "3")]
    pub(crate) r#type: Option<i32>,
    #[prost(uint32, repeated, packed = "true", tag = "4")]
    pub(crate) geometry: Vec<u32>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct Value {
    #[prost(string, optional, tag = "1")]
    pub(crate) string_value: Option<String>,
    #[prost(float, optional, tag = "2")]
    pub(crate) float_value: Option<f32>,
    #[prost(double, optional, tag = "3")]
    pub(crate) double_value: Option<f64>,
    #[prost(int64, optional, tag = "4")]
    pub(crate) int_value: Option<i64>,
    #[prost(uint64, optional, tag = "5")]
    pub(crate) uint_value: Option<u64>,
    #[prost(sint64, optional, tag = "6")]
    pub(crate) sint_value: Option<i64>,
    #[prost(bool, optional, tag = "7")]
    pub(crate) bool_value: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub(crate) enum GeomType {
    Unknown = 0,
    Point = 1,
    Linestring = 2,
    Polygon = 3,
}
