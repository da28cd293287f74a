//! Geospatial encoders
//!
//! Geohash (encode, decode, neighbors) and H3 cell indexing over columns
//! of `{longitude, latitude}` coordinates.

pub mod geohash;
pub mod h3;
