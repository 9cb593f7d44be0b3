use serde::{Deserialize, Serialize};

use crate::point::Point3d;

/// A triangulated surface as handed over by the STL parser.
///
/// Without indices, every three consecutive positions form one triangle.
/// With indices, every three consecutive indices select one triangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    positions: Vec<Point3d>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    indices: Option<Vec<u32>>,
}

impl TriangleMesh {
    /// Triangle soup: positions are consumed three at a time.
    pub fn from_positions(positions: Vec<Point3d>) -> Self {
        Self {
            positions,
            indices: None,
        }
    }

    /// Indexed mesh sharing vertices between triangles.
    pub fn indexed(positions: Vec<Point3d>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
        }
    }

    /// Triangle soup from a flat `[x, y, z, x, y, z, ...]` buffer.
    ///
    /// A trailing partial coordinate is dropped.
    pub fn from_flat_positions(flat: &[f64]) -> Self {
        let positions = flat
            .chunks_exact(3)
            .map(|c| Point3d::new(c[0], c[1], c[2]))
            .collect();
        Self::from_positions(positions)
    }

    pub fn positions(&self) -> &[Point3d] {
        &self.positions
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate triangles as position triples.
    ///
    /// Triangles referencing an out-of-range index are skipped, as is a
    /// trailing partial triangle.
    pub fn triangles(&self) -> Triangles<'_> {
        Triangles { mesh: self, next: 0 }
    }

    /// A copy of this mesh with every vertex moved by `offset`.
    pub fn translated(&self, offset: Point3d) -> Self {
        Self {
            positions: self.positions.iter().map(|p| *p + offset).collect(),
            indices: self.indices.clone(),
        }
    }
}

/// Iterator over the triangles of a [`TriangleMesh`].
pub struct Triangles<'a> {
    mesh: &'a TriangleMesh,
    next: usize,
}

impl<'a> Iterator for Triangles<'a> {
    type Item = [Point3d; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let mesh = self.mesh;
        match &mesh.indices {
            Some(indices) => loop {
                let tri = indices.get(self.next..self.next + 3)?;
                self.next += 3;
                let lookup = |i: u32| mesh.positions.get(i as usize).copied();
                if let (Some(a), Some(b), Some(c)) = (lookup(tri[0]), lookup(tri[1]), lookup(tri[2])) {
                    return Some([a, b, c]);
                }
            },
            None => {
                let tri = mesh.positions.get(self.next..self.next + 3)?;
                self.next += 3;
                Some([tri[0], tri[1], tri[2]])
            }
        }
    }
}
