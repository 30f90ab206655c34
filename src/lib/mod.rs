use log::debug;
use std::io::Read;

pub use self::bbox::{
    feature_bbox, feature_collection_bbox, geometry_bbox, par_reduce_bbox, point_bbox,
    reduce_bbox, BBox, Bounded, Strategy,
};
pub use self::error::{Error, Result};
pub use self::document::{Feature, FeatureCollection, GeoJson, Geometry, Point};

pub mod bbox;
pub mod document;
pub mod error;
pub mod output;
#[cfg(test)]
mod test_helpers;

pub fn bbox_from_str(s: &str, strategy: Strategy) -> Result<BBox> {
    let document: GeoJson = s.parse()?;
    document.bbox_with(strategy)
}

pub fn bbox_from_reader(reader: impl Read, strategy: Strategy) -> Result<BBox> {
    let document = document::from_reader(reader)?;
    let bbox = document.bbox_with(strategy)?;
    debug!("computed bbox {}", bbox);
    Ok(bbox)
}
