//! Geometric analysis of triangle meshes for print quoting.
//!
//! Turns a raw mesh into volume, bounding box and triangle count, independent
//! of any rendering concerns.

pub mod bounds;
pub mod diagnostics;
pub mod mesh;
pub mod point;
pub mod viewport;
pub mod volume;

pub use bounds::{compute_bounds, BoundingBox};
pub use diagnostics::{edge_counts, inspect, is_watertight, EdgeCounts, MeshReport};
pub use mesh::TriangleMesh;
pub use point::Point3d;
pub use viewport::{normalize_to_viewport, DEFAULT_VIEWPORT_SIZE, VIEWPORT_LIFT};
pub use volume::{compute_volume, count_triangles, signed_volume, surface_area};

use print_types::ModelStatistics;
use tracing::{info, instrument};

/// Errors from mesh analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("mesh has no vertices")]
    EmptyMesh,
}

/// Volume, bounds and triangle count of a mesh in one call.
#[instrument(skip(mesh), fields(vertices = mesh.vertex_count()))]
pub fn analyze(mesh: &TriangleMesh) -> Result<ModelStatistics, AnalysisError> {
    let bounds = compute_bounds(mesh)?;
    let volume_cubic_mm = compute_volume(mesh);
    let triangle_count = count_triangles(mesh);

    info!(
        volume_cubic_mm,
        triangle_count,
        size = ?bounds.size().to_array(),
        "mesh analyzed"
    );

    Ok(ModelStatistics {
        volume_cubic_mm,
        bounding_size: bounds.size().to_array(),
        bounding_center: bounds.center().to_array(),
        triangle_count,
    })
}
