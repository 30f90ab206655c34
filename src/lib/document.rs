use super::error::{Error, Result};
use log::debug;
use serde_json::Value;
use std::convert::TryFrom;
use std::io::Read;
use std::str::FromStr;

const GEOMETRY_KINDS: [&str; 7] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

/// A GeoJSON position. Ordinates after the second one (altitude) are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl TryFrom<geojson::Position> for Point {
    type Error = Error;

    fn try_from(position: geojson::Position) -> Result<Self> {
        match position.as_slice() {
            [x, y, ..] => Ok(Point::new(*x, *y)),
            _ => Err(Error::PositionTooShort(position.len())),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from(coordinates: (f64, f64)) -> Self {
        Point::new(coordinates.0, coordinates.1)
    }
}

pub type Ring = Vec<Point>;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(Vec<Point>),
    LineString(Vec<Point>),
    MultiLineString(Vec<Vec<Point>>),
    /// Exterior ring first, holes after it.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    GeometryCollection(Vec<Geometry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

fn to_points(positions: Vec<geojson::Position>) -> Result<Vec<Point>> {
    positions.into_iter().map(Point::try_from).collect()
}

fn to_rings(rings: geojson::PolygonType) -> Result<Vec<Ring>> {
    rings.into_iter().map(to_points).collect()
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }
}

impl TryFrom<geojson::Value> for Geometry {
    type Error = Error;

    fn try_from(value: geojson::Value) -> Result<Self> {
        use geojson::Value;

        let geometry = match value {
            Value::Point(position) => Geometry::Point(Point::try_from(position)?),
            Value::MultiPoint(positions) => Geometry::MultiPoint(to_points(positions)?),
            Value::LineString(positions) => Geometry::LineString(to_points(positions)?),
            Value::MultiLineString(lines) => Geometry::MultiLineString(
                lines.into_iter().map(to_points).collect::<Result<_>>()?,
            ),
            Value::Polygon(rings) => Geometry::Polygon(to_rings(rings)?),
            Value::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons.into_iter().map(to_rings).collect::<Result<_>>()?,
            ),
            Value::GeometryCollection(geometries) => Geometry::GeometryCollection(
                geometries
                    .into_iter()
                    .map(Geometry::try_from)
                    .collect::<Result<_>>()?,
            ),
        };
        Ok(geometry)
    }
}

impl TryFrom<geojson::Geometry> for Geometry {
    type Error = Error;

    fn try_from(geometry: geojson::Geometry) -> Result<Self> {
        Geometry::try_from(geometry.value)
    }
}

impl TryFrom<geojson::Feature> for Feature {
    type Error = Error;

    fn try_from(feature: geojson::Feature) -> Result<Self> {
        let geometry = feature.geometry.map(Geometry::try_from).transpose()?;
        Ok(Feature { geometry })
    }
}

impl TryFrom<geojson::FeatureCollection> for FeatureCollection {
    type Error = Error;

    fn try_from(collection: geojson::FeatureCollection) -> Result<Self> {
        let features = collection
            .features
            .into_iter()
            .map(Feature::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(FeatureCollection { features })
    }
}

impl TryFrom<geojson::GeoJson> for GeoJson {
    type Error = Error;

    fn try_from(document: geojson::GeoJson) -> Result<Self> {
        let document = match document {
            geojson::GeoJson::Geometry(geometry) => {
                let geometry = Geometry::try_from(geometry)?;
                debug!("decoded {} document", geometry.kind());
                GeoJson::Geometry(geometry)
            }
            geojson::GeoJson::Feature(feature) => {
                debug!("decoded feature document");
                GeoJson::Feature(Feature::try_from(feature)?)
            }
            geojson::GeoJson::FeatureCollection(collection) => {
                let collection = FeatureCollection::try_from(collection)?;
                debug!(
                    "decoded feature collection with {} features",
                    collection.features.len()
                );
                GeoJson::FeatureCollection(collection)
            }
        };
        Ok(document)
    }
}

fn unrecognized_geometry(value: &Value) -> Option<Error> {
    let kind = value.get("type")?.as_str()?;
    match kind {
        "GeometryCollection" => value
            .get("geometries")?
            .as_array()?
            .iter()
            .find_map(unrecognized_geometry),
        _ if GEOMETRY_KINDS.contains(&kind) => None,
        _ => Some(Error::UnrecognizedGeometryKind(kind.into())),
    }
}

// The geojson crate does not say which "type" it failed on, so the
// document is searched for the first one it would have rejected.
fn unrecognized_kind(value: &Value) -> Option<Error> {
    let kind = value.get("type")?.as_str()?;
    match kind {
        "FeatureCollection" => value
            .get("features")?
            .as_array()?
            .iter()
            .find_map(|feature| unrecognized_geometry(feature.get("geometry")?)),
        "Feature" => unrecognized_geometry(value.get("geometry")?),
        _ if GEOMETRY_KINDS.contains(&kind) => unrecognized_geometry(value),
        _ if value.get("coordinates").is_some() || value.get("geometries").is_some() => {
            Some(Error::UnrecognizedGeometryKind(kind.into()))
        }
        _ => Some(Error::UnrecognizedDocumentKind(kind.into())),
    }
}

impl FromStr for GeoJson {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        match geojson::GeoJson::from_json_value(value) {
            Ok(document) => GeoJson::try_from(document),
            Err(e @ geojson::Error::GeometryUnknownType)
            | Err(e @ geojson::Error::GeoJsonUnknownType) => {
                let value: Value = serde_json::from_str(s)?;
                Err(unrecognized_kind(&value).unwrap_or(Error::GeoJson(e)))
            }
            Err(e) => Err(Error::GeoJson(e)),
        }
    }
}

// Reading into a string first is faster than letting serde pull from the reader.
pub fn from_reader(mut reader: impl Read) -> Result<GeoJson> {
    let mut data = String::new();
    reader.read_to_string(&mut data)?;
    data.parse()
}
