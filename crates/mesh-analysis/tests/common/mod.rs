#![allow(dead_code)]

use mesh_analysis::{Point3d, TriangleMesh};

/// Outward-wound 12-triangle cuboid between `min` and `max`.
pub fn cuboid(min: [f64; 3], max: [f64; 3]) -> TriangleMesh {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    let v = vec![
        Point3d::new(x0, y0, z0), // 0
        Point3d::new(x1, y0, z0), // 1
        Point3d::new(x1, y1, z0), // 2
        Point3d::new(x0, y1, z0), // 3
        Point3d::new(x0, y0, z1), // 4
        Point3d::new(x1, y0, z1), // 5
        Point3d::new(x1, y1, z1), // 6
        Point3d::new(x0, y1, z1), // 7
    ];
    let indices = vec![
        0, 2, 1, 0, 3, 2, // z = z0
        4, 5, 6, 4, 6, 7, // z = z1
        0, 1, 5, 0, 5, 4, // y = y0
        3, 7, 6, 3, 6, 2, // y = y1
        0, 4, 7, 0, 7, 3, // x = x0
        1, 2, 6, 1, 6, 5, // x = x1
    ];
    TriangleMesh::indexed(v, indices)
}

/// The same cuboid as triangle soup, the way an STL file stores it.
pub fn cuboid_soup(min: [f64; 3], max: [f64; 3]) -> TriangleMesh {
    let indexed = cuboid(min, max);
    let positions = indexed.triangles().flatten().collect();
    TriangleMesh::from_positions(positions)
}
