//! STL decoding into [`TriangleMesh`].
//!
//! Binary and ASCII files are both accepted; `stl_io` sniffs the format and
//! merges coincident vertices, so the result is always an indexed mesh.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use mesh_analysis::{Point3d, TriangleMesh};
use tracing::{info, instrument};

/// Errors from STL import.
#[derive(Debug, thiserror::Error)]
pub enum StlError {
    #[error("failed to read STL file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed STL: {reason}")]
    Parse { reason: String },

    #[error("STL contains no facets")]
    Empty,
}

/// Decode an in-memory STL file.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn parse_stl(bytes: &[u8]) -> Result<TriangleMesh, StlError> {
    let mut cursor = Cursor::new(bytes);
    let indexed = stl_io::read_stl(&mut cursor).map_err(|e| StlError::Parse {
        reason: e.to_string(),
    })?;
    into_triangle_mesh(indexed)
}

/// Read and decode an STL file from disk.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_stl_file(path: impl AsRef<Path>) -> Result<TriangleMesh, StlError> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let indexed = stl_io::read_stl(&mut reader).map_err(|e| StlError::Parse {
        reason: e.to_string(),
    })?;
    into_triangle_mesh(indexed)
}

fn into_triangle_mesh(indexed: stl_io::IndexedMesh) -> Result<TriangleMesh, StlError> {
    if indexed.faces.is_empty() {
        return Err(StlError::Empty);
    }

    let positions: Vec<Point3d> = indexed
        .vertices
        .iter()
        .map(|v| Point3d::from([v[0], v[1], v[2]]))
        .collect();

    let mut indices = Vec::with_capacity(indexed.faces.len() * 3);
    for face in &indexed.faces {
        for &vi in &face.vertices {
            let idx = u32::try_from(vi).map_err(|_| StlError::Parse {
                reason: format!("vertex index {vi} does not fit in 32 bits"),
            })?;
            indices.push(idx);
        }
    }

    info!(
        vertices = positions.len(),
        facets = indexed.faces.len(),
        "STL decoded"
    );
    Ok(TriangleMesh::indexed(positions, indices))
}
