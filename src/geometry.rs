use geo::{BoundingRect, Contains, Geometry, MultiPolygon, Point, Rect};
use wkt::TryFromWkt;

use crate::error::BoundaryError;

/// A geographic coordinate, latitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<&(f64, f64)> for LatLon {
    fn from(&(lat, lon): &(f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for LatLon {
    fn from(value: (f64, f64)) -> Self {
        Self::from(&value)
    }
}

impl From<&[f64; 2]> for LatLon {
    fn from(&[lat, lon]: &[f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for LatLon {
    fn from(value: [f64; 2]) -> Self {
        Self::from(&value)
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(val: LatLon) -> Self {
        [val.lat, val.lon]
    }
}

/// Builds the planar point for a coordinate.
///
/// The axes are swapped on purpose: boundaries are written as `x = longitude`,
/// `y = latitude`. Returns [`None`] if either coordinate is not finite.
pub fn make_point(coord: &LatLon) -> Option<Point<f64>> {
    let &LatLon { lat, lon } = coord;
    (lat.is_finite() && lon.is_finite()).then(|| Point::new(lon, lat))
}

/// Parses a WKT `POLYGON` or `MULTIPOLYGON`.
///
/// A polygon is promoted to a single-part multipolygon so every region has the same shape type.
pub fn parse_boundary(text: &str) -> Result<MultiPolygon<f64>, BoundaryError> {
    let geometry = Geometry::<f64>::try_from_wkt_str(text.trim())
        .map_err(|err| BoundaryError::Parse(err.to_string()))?;
    match geometry {
        Geometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        Geometry::MultiPolygon(multi_polygon) => Ok(multi_polygon),
        other => Err(BoundaryError::NotPolygonal(kind(&other))),
    }
}

fn kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::Line(_) | Geometry::LineString(_) => "LINESTRING",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        Geometry::Rect(_) => "RECT",
        Geometry::Triangle(_) => "TRIANGLE",
        Geometry::Polygon(_) => "POLYGON",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
    }
}

/// A boundary ready for repeated containment queries.
///
/// The bounding rectangle is computed once and rejects most far-away points
/// before the exact test runs.
#[derive(Debug, Clone)]
pub struct PreparedBoundary {
    shape: MultiPolygon<f64>,
    bbox: Rect<f64>,
}

impl PreparedBoundary {
    /// Prepares a parsed boundary.
    ///
    /// Fails if the boundary has no vertices at all.
    pub fn prepare(shape: MultiPolygon<f64>) -> Result<Self, BoundaryError> {
        let bbox = shape.bounding_rect().ok_or(BoundaryError::Empty)?;
        Ok(Self { shape, bbox })
    }

    /// Parses then prepares a WKT boundary.
    pub fn from_wkt(text: &str) -> Result<Self, BoundaryError> {
        Self::prepare(parse_boundary(text)?)
    }

    /// Returns `true` if the point lies strictly inside the boundary.
    ///
    /// Points on an edge are not contained, and neither are points inside a hole.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        let (min, max) = (self.bbox.min(), self.bbox.max());
        let (x, y) = point.x_y();
        if x < min.x || x > max.x || y < min.y || y > max.y {
            return false;
        }
        self.shape.contains(point)
    }

    pub fn bounding_rect(&self) -> Rect<f64> {
        self.bbox
    }

    pub fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }
}
