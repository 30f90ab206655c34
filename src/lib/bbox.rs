use super::error::{Error, Result};
use super::document::{Feature, FeatureCollection, GeoJson, Geometry, Point};
use geo_types::{Coordinate, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(into = "[f64; 4]", from = "[f64; 4]")]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    // Antimeridian crossings are not considered.
    pub fn merge(&self, other: &BBox) -> Self {
        BBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Closed, counter-clockwise ring around the box, starting at the
    /// south-west corner.
    pub fn exterior(&self) -> Vec<(f64, f64)> {
        vec![
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
            (self.min_x, self.min_y),
        ]
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

impl From<BBox> for [f64; 4] {
    fn from(bbox: BBox) -> Self {
        [bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y]
    }
}

impl From<[f64; 4]> for BBox {
    fn from(values: [f64; 4]) -> Self {
        BBox::new(values[0], values[1], values[2], values[3])
    }
}

impl From<BBox> for Rect<f64> {
    fn from(bbox: BBox) -> Self {
        let min = Coordinate {
            x: bbox.min_x,
            y: bbox.min_y,
        };
        let max = Coordinate {
            x: bbox.max_x,
            y: bbox.max_y,
        };
        Rect::new(min, max)
    }
}

impl From<Rect<f64>> for BBox {
    fn from(rect: Rect<f64>) -> Self {
        BBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Sequential,
    /// Both halves of every split are handed to `rayon::join`.
    Parallel,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Sequential
    }
}

impl Strategy {
    pub fn reduce<T, F>(self, items: &[T], to_bbox: F) -> Result<BBox>
    where
        T: Sync,
        F: Fn(&T) -> Result<BBox> + Sync,
    {
        match self {
            Strategy::Sequential => reduce_bbox(items, to_bbox),
            Strategy::Parallel => par_reduce_bbox(items, to_bbox),
        }
    }
}

// The bounding box of a slice is the merged bounding box of its two halves.
// We split until a single element is left and let `to_bbox` handle it, so the
// same Vec<Vec<Point>> can be treated as rings or as lines depending on the
// function that is passed in.
pub fn reduce_bbox<T, F>(items: &[T], to_bbox: F) -> Result<BBox>
where
    F: Fn(&T) -> Result<BBox>,
{
    reduce(items, &to_bbox)
}

fn reduce<T, F>(items: &[T], to_bbox: &F) -> Result<BBox>
where
    F: Fn(&T) -> Result<BBox>,
{
    match items.len() {
        0 => Err(Error::EmptyInput),
        1 => to_bbox(&items[0]),
        len => {
            let (left, right) = items.split_at(len / 2);
            let left_bbox = reduce(left, to_bbox)?;
            let right_bbox = reduce(right, to_bbox)?;
            Ok(left_bbox.merge(&right_bbox))
        }
    }
}

pub fn par_reduce_bbox<T, F>(items: &[T], to_bbox: F) -> Result<BBox>
where
    T: Sync,
    F: Fn(&T) -> Result<BBox> + Sync,
{
    par_reduce(items, &to_bbox)
}

fn par_reduce<T, F>(items: &[T], to_bbox: &F) -> Result<BBox>
where
    T: Sync,
    F: Fn(&T) -> Result<BBox> + Sync,
{
    match items.len() {
        0 => Err(Error::EmptyInput),
        1 => to_bbox(&items[0]),
        len => {
            let (left, right) = items.split_at(len / 2);
            let (left_bbox, right_bbox) =
                rayon::join(|| par_reduce(left, to_bbox), || par_reduce(right, to_bbox));
            // left error wins, whichever half finished first
            Ok(left_bbox?.merge(&right_bbox?))
        }
    }
}

pub fn point_bbox(point: &Point) -> BBox {
    BBox::new(point.x, point.y, point.x, point.y)
}

fn points_bbox(points: &[Point], strategy: Strategy) -> Result<BBox> {
    strategy.reduce(points, |point| Ok(point_bbox(point)))
}

// Holes lie within the exterior ring, so only the first ring counts.
fn exterior_bbox(rings: &[Vec<Point>], strategy: Strategy) -> Result<BBox> {
    let exterior = rings.first().ok_or(Error::EmptyInput)?;
    points_bbox(exterior, strategy)
}

pub trait Bounded {
    fn bbox_with(&self, strategy: Strategy) -> Result<BBox>;

    fn bbox(&self) -> Result<BBox> {
        self.bbox_with(Strategy::Sequential)
    }
}

impl Bounded for Point {
    fn bbox_with(&self, _strategy: Strategy) -> Result<BBox> {
        Ok(point_bbox(self))
    }
}

impl Bounded for Geometry {
    fn bbox_with(&self, strategy: Strategy) -> Result<BBox> {
        match self {
            Geometry::Point(point) => Ok(point_bbox(point)),
            Geometry::MultiPoint(points) => points_bbox(points, strategy),
            Geometry::LineString(points) => points_bbox(points, strategy),
            Geometry::MultiLineString(lines) => {
                strategy.reduce(lines, |line| points_bbox(line, strategy))
            }
            Geometry::Polygon(rings) => exterior_bbox(rings, strategy),
            Geometry::MultiPolygon(polygons) => {
                strategy.reduce(polygons, |rings| exterior_bbox(rings, strategy))
            }
            Geometry::GeometryCollection(geometries) => {
                strategy.reduce(geometries, |geometry| geometry.bbox_with(strategy))
            }
        }
    }
}

impl Bounded for Feature {
    fn bbox_with(&self, strategy: Strategy) -> Result<BBox> {
        let geometry = self.geometry.as_ref().ok_or(Error::MissingGeometry)?;
        geometry.bbox_with(strategy)
    }
}

impl Bounded for FeatureCollection {
    fn bbox_with(&self, strategy: Strategy) -> Result<BBox> {
        strategy.reduce(&self.features, |feature| feature.bbox_with(strategy))
    }
}

impl Bounded for GeoJson {
    fn bbox_with(&self, strategy: Strategy) -> Result<BBox> {
        match self {
            GeoJson::Geometry(geometry) => geometry.bbox_with(strategy),
            GeoJson::Feature(feature) => feature.bbox_with(strategy),
            GeoJson::FeatureCollection(collection) => collection.bbox_with(strategy),
        }
    }
}

pub fn geometry_bbox(geometry: &Geometry) -> Result<BBox> {
    geometry.bbox()
}

pub fn feature_bbox(feature: &Feature) -> Result<BBox> {
    feature.bbox()
}

pub fn feature_collection_bbox(collection: &FeatureCollection) -> Result<BBox> {
    collection.bbox()
}



#[cfg(test)]
mod geometry {
    use super::*;
    use crate::test_helpers::{point, points};
    use approx::assert_relative_eq;
    use geo::algorithm::bounding_rect::BoundingRect;
    use geo_types::LineString;

    fn check(geometry: &Geometry, expected: BBox) {
        for strategy in &[Strategy::Sequential, Strategy::Parallel] {
            assert_eq!(geometry.bbox_with(*strategy).unwrap(), expected);
        }
    }

    #[test]
    fn point_bbox_is_degenerate() {
        assert_eq!(point_bbox(&Point::new(1.5, -2.)), BBox::new(1.5, -2., 1.5, -2.));
    }

    #[test]
    fn point_geometry() {
        check(&point(1., 2.), BBox::new(1., 2., 1., 2.));
    }

    #[test]
    fn line_string() {
        let line = Geometry::LineString(points(&[(0., 0.), (3., 4.), (1., 1.)]));
        check(&line, BBox::new(0., 0., 3., 4.));
    }

    #[test]
    fn multi_point() {
        let multi = Geometry::MultiPoint(points(&[(2., -1.), (-2., 1.)]));
        check(&multi, BBox::new(-2., -1., 2., 1.));
    }

    #[test]
    fn multi_line_string() {
        let lines = Geometry::MultiLineString(vec![
            points(&[(0., 0.), (1., 1.)]),
            points(&[(10., -3.), (11., 2.), (9., 0.)]),
        ]);
        check(&lines, BBox::new(0., -3., 11., 2.));
    }

    #[test]
    fn polygon_ignores_holes() {
        let exterior = points(&[(0., 0.), (0., 5.), (5., 5.), (5., 0.), (0., 0.)]);
        let hole = points(&[(1., 1.), (1., 2.), (2., 2.)]);
        check(&Geometry::Polygon(vec![exterior, hole]), BBox::new(0., 0., 5., 5.));
    }

    #[test]
    fn polygon_without_rings() {
        let result = Geometry::Polygon(vec![]).bbox();
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn multi_polygon() {
        let first = vec![points(&[(0., 0.), (0., 1.), (1., 1.), (0., 0.)])];
        // the second ring lies outside of the exterior and must not count
        let second = vec![
            points(&[(4., 4.), (4., 6.), (6., 6.), (4., 4.)]),
            points(&[(100., 100.), (101., 101.), (100., 101.)]),
        ];
        check(
            &Geometry::MultiPolygon(vec![first, second]),
            BBox::new(0., 0., 6., 6.),
        );
    }

    #[test]
    fn geometry_collection() {
        let collection = Geometry::GeometryCollection(vec![point(0., 0.), point(2., 2.)]);
        check(&collection, BBox::new(0., 0., 2., 2.));
    }

    #[test]
    fn nested_geometry_collection() {
        let inner = Geometry::GeometryCollection(vec![
            point(-1., 3.),
            Geometry::GeometryCollection(vec![point(8., -8.)]),
        ]);
        let outer = Geometry::GeometryCollection(vec![point(0., 0.), inner]);
        check(&outer, BBox::new(-1., -8., 8., 3.));
    }

    #[test]
    fn empty_geometry_collection() {
        let result = Geometry::GeometryCollection(vec![]).bbox();
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn empty_line_string() {
        let result = geometry_bbox(&Geometry::LineString(vec![]));
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn agrees_with_geo() {
        let coordinates = vec![(9.1, 50.2), (9.7, 51.3), (10.05, 50.9), (8.99, 50.4)];
        let line_string: LineString<f64> = coordinates.clone().into();
        let rect = line_string.bounding_rect().unwrap();
        let bbox = geometry_bbox(&Geometry::LineString(points(&coordinates))).unwrap();
        let expected: BBox = rect.into();
        assert_relative_eq!(bbox.min_x, expected.min_x);
        assert_relative_eq!(bbox.min_y, expected.min_y);
        assert_relative_eq!(bbox.max_x, expected.max_x);
        assert_relative_eq!(bbox.max_y, expected.max_y);
    }
}

#[cfg(test)]
mod features {
    use super::*;
    use crate::test_helpers::{feature, point};

    #[test]
    fn feature_uses_its_geometry() {
        let bbox = feature_bbox(&feature(point(3., 4.))).unwrap();
        assert_eq!(bbox, BBox::new(3., 4., 3., 4.));
    }

    #[test]
    fn feature_without_geometry() {
        let result = feature_bbox(&Feature { geometry: None });
        assert!(matches!(result, Err(Error::MissingGeometry)));
    }

    #[test]
    fn two_points() {
        let collection = FeatureCollection {
            features: vec![feature(point(10., 10.)), feature(point(-5., -5.))],
        };
        let bbox = feature_collection_bbox(&collection).unwrap();
        assert_eq!(bbox, BBox::new(-5., -5., 10., 10.));
    }

    #[test]
    fn empty_collection() {
        let collection = FeatureCollection { features: vec![] };
        let result = collection.bbox_with(Strategy::Parallel);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }
}
