use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::mesh::TriangleMesh;
use crate::point::Point3d;
use crate::AnalysisError;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3d]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn center(&self) -> Point3d {
        self.min.midpoint(&self.max)
    }

    /// Extent per axis (`max - min`).
    pub fn size(&self) -> Point3d {
        self.max - self.min
    }

    pub fn contains_point(&self, p: &Point3d) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

/// Bounding box of every vertex position in the mesh.
///
/// Unreferenced vertices of an indexed mesh are included; the pass is over
/// positions, not triangles.
#[instrument(skip(mesh), fields(vertices = mesh.vertex_count()))]
pub fn compute_bounds(mesh: &TriangleMesh) -> Result<BoundingBox, AnalysisError> {
    if mesh.is_empty() {
        return Err(AnalysisError::EmptyMesh);
    }
    let bb = BoundingBox::from_points(mesh.positions());
    debug!(min = ?bb.min.to_array(), max = ?bb.max.to_array(), "bounds computed");
    Ok(bb)
}
