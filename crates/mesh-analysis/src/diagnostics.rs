//! Mesh health checks shown next to the statistics of an uploaded model.
//!
//! Uploaded STL files are often not watertight. These checks report that
//! condition; they never reject a mesh.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use print_types::ModelStatistics;

use crate::mesh::TriangleMesh;
use crate::point::Point3d;
use crate::volume::{surface_area, triangle_area};
use crate::{analyze, AnalysisError};

/// Triangles with an area below this are counted as degenerate (mm²).
pub const DEGENERATE_AREA: f64 = 1e-12;

/// Vertices are matched by position after quantising to this many steps per mm.
const QUANTIZE_STEPS: f64 = 10_000.0;

/// Edge census of a mesh, matched by vertex position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeCounts {
    pub total: usize,
    /// Edges used by exactly one triangle.
    pub boundary: usize,
    /// Edges used by more than two triangles.
    pub non_manifold: usize,
}

/// Statistics plus health checks for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshReport {
    pub statistics: ModelStatistics,
    pub surface_area_mm2: f64,
    pub edges: EdgeCounts,
    pub degenerate_triangles: usize,
    pub watertight: bool,
}

type VertKey = (i64, i64, i64);

fn quantize(p: &Point3d) -> VertKey {
    (
        (p.x * QUANTIZE_STEPS).round() as i64,
        (p.y * QUANTIZE_STEPS).round() as i64,
        (p.z * QUANTIZE_STEPS).round() as i64,
    )
}

fn make_edge(a: VertKey, b: VertKey) -> (VertKey, VertKey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Count edges by how many triangles share them.
///
/// Works on triangle soup as well as indexed meshes since vertices are
/// matched by quantised position, not by index.
pub fn edge_counts(mesh: &TriangleMesh) -> EdgeCounts {
    let mut counts: HashMap<(VertKey, VertKey), usize> = HashMap::new();

    for [a, b, c] in mesh.triangles() {
        let (ka, kb, kc) = (quantize(&a), quantize(&b), quantize(&c));
        for (u, v) in [(ka, kb), (kb, kc), (kc, ka)] {
            if u == v {
                continue;
            }
            *counts.entry(make_edge(u, v)).or_insert(0) += 1;
        }
    }

    EdgeCounts {
        total: counts.len(),
        boundary: counts.values().filter(|&&c| c == 1).count(),
        non_manifold: counts.values().filter(|&&c| c > 2).count(),
    }
}

/// True when every edge is shared by exactly two triangles.
pub fn is_watertight(mesh: &TriangleMesh) -> bool {
    let edges = edge_counts(mesh);
    edges.total > 0 && edges.boundary == 0 && edges.non_manifold == 0
}

pub fn count_degenerate_triangles(mesh: &TriangleMesh) -> usize {
    mesh.triangles()
        .filter(|[a, b, c]| triangle_area(a, b, c) < DEGENERATE_AREA)
        .count()
}

/// Full report: statistics, surface area and watertightness.
#[instrument(skip(mesh), fields(vertices = mesh.vertex_count()))]
pub fn inspect(mesh: &TriangleMesh) -> Result<MeshReport, AnalysisError> {
    let statistics = analyze(mesh)?;
    let edges = edge_counts(mesh);
    let watertight = edges.total > 0 && edges.boundary == 0 && edges.non_manifold == 0;
    if !watertight {
        warn!(
            boundary = edges.boundary,
            non_manifold = edges.non_manifold,
            "mesh is not watertight, volume is approximate"
        );
    }

    Ok(MeshReport {
        statistics,
        surface_area_mm2: surface_area(mesh),
        edges,
        degenerate_triangles: count_degenerate_triangles(mesh),
        watertight,
    })
}
