use tracing::{debug, instrument};

use crate::mesh::TriangleMesh;
use crate::point::Point3d;

/// Signed volume of the tetrahedron spanned by the origin and triangle (a, b, c).
///
/// Positive when the triangle winds counter-clockwise seen from outside.
pub fn signed_tetrahedron_volume(a: &Point3d, b: &Point3d, c: &Point3d) -> f64 {
    (a.x * (b.y * c.z - c.y * b.z) + b.x * (c.y * a.z - a.y * c.z) + c.x * (a.y * b.z - b.y * a.z))
        / 6.0
}

/// Sum of signed tetrahedron volumes over all triangles.
///
/// Only independent of the origin for a closed, consistently wound mesh.
pub fn signed_volume(mesh: &TriangleMesh) -> f64 {
    mesh.triangles()
        .map(|[a, b, c]| signed_tetrahedron_volume(&a, &b, &c))
        .sum()
}

/// Enclosed volume in cubic model units, via the divergence theorem.
///
/// Open or inconsistently wound meshes still produce a finite number, but it
/// is only an approximation of the enclosed volume.
#[instrument(skip(mesh), fields(vertices = mesh.vertex_count()))]
pub fn compute_volume(mesh: &TriangleMesh) -> f64 {
    let signed = signed_volume(mesh);
    debug!(signed, "volume accumulated");
    signed.abs()
}

/// Total surface area of all triangles.
pub fn surface_area(mesh: &TriangleMesh) -> f64 {
    mesh.triangles().map(|[a, b, c]| triangle_area(&a, &b, &c)).sum()
}

pub(crate) fn triangle_area(a: &Point3d, b: &Point3d, c: &Point3d) -> f64 {
    let u = *b - *a;
    let v = *c - *a;
    let cx = u.y * v.z - u.z * v.y;
    let cy = u.z * v.x - u.x * v.z;
    let cz = u.x * v.y - u.y * v.x;
    (cx * cx + cy * cy + cz * cz).sqrt() / 2.0
}

/// Number of triangles the mesh describes: `index_count / 3` or `vertex_count / 3`.
pub fn count_triangles(mesh: &TriangleMesh) -> usize {
    match mesh.indices() {
        Some(indices) => indices.len() / 3,
        None => mesh.vertex_count() / 3,
    }
}
