//! Planar point-in-polygon tests on (longitude, latitude) vertex rings.
//!
//! Rings are treated as flat equirectangular polygons, which is adequate for the coarse
//! region data (time zones, display overlays) they are used with. Edges crossing the
//! antimeridian are not split; such regions should be supplied as two polygons.

use geo::{Contains, Coord, Intersects, LineString, Point, Polygon};

use crate::{GeoError, GeoPoint};

/// Closed polygon given by its vertices; the closing edge is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPolygon {
    vertices: Vec<GeoPoint>,
    shape: Polygon<f64>,
}

impl GeoPolygon {
    pub fn new(vertices: Vec<GeoPoint>) -> Result<Self, GeoError> {
        if vertices.len() < 3 {
            return Err(GeoError::DegeneratePolygon(vertices.len()));
        }
        let ring: Vec<Coord<f64>> = vertices.iter().map(|v| planar(*v)).collect();
        let shape = Polygon::new(LineString::from(ring), Vec::new());
        Ok(Self { vertices, shape })
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Strict interior test; points on an edge are outside.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.shape.contains(&Point::from(planar(point)))
    }

    /// Interior or boundary. Adjacent regions sharing an edge both cover it.
    pub fn covers(&self, point: GeoPoint) -> bool {
        self.shape.intersects(&Point::from(planar(point)))
    }
}

fn planar(point: GeoPoint) -> Coord<f64> {
    Coord {
        x: point.longitude,
        y: point.latitude,
    }
}
