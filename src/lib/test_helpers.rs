use super::document::{Feature, Geometry, Point};

pub fn points(coordinates: &[(f64, f64)]) -> Vec<Point> {
    coordinates.iter().map(|&co| co.into()).collect()
}

pub fn point(x: f64, y: f64) -> Geometry {
    Geometry::Point(Point::new(x, y))
}

pub fn feature(geometry: Geometry) -> Feature {
    Feature {
        geometry: Some(geometry),
    }
}
