//! Engine-agnostic triangle-mesh buffers produced by plant interpretation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index into the flat vertex buffers.
pub type VertexIndex = u32;

/// The complete, engine-agnostic mesh of a generated plant.
///
/// This structure represents the "Phenotype" generated from an L-System.
/// `positions`, `colors` and `normals` are parallel per-vertex buffers;
/// `indices` references them in triangle triples. Buffers are append-only
/// during interpretation and vertices are never deduplicated, so a renderer
/// can upload them verbatim.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlantMesh {
    /// World-space vertex positions.
    pub positions: Vec<Vec3>,

    /// Per-vertex linear RGB colors.
    pub colors: Vec<Vec3>,

    /// Per-vertex unit normals. Empty until [`compute_normals`](Self::compute_normals) runs.
    pub normals: Vec<Vec3>,

    /// Triangle list, three indices per face, counter-clockwise front faces.
    pub indices: Vec<VertexIndex>,
}

impl PlantMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices currently in the buffers.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles referenced by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends one vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3, color: Vec3) -> VertexIndex {
        let idx = self.positions.len() as VertexIndex;
        self.positions.push(position);
        self.colors.push(color);
        idx
    }

    /// Appends one triangle.
    pub fn push_triangle(&mut self, a: VertexIndex, b: VertexIndex, c: VertexIndex) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Computes smooth per-vertex normals from the index buffer.
    ///
    /// Un-normalized face normals are accumulated per vertex (implicitly
    /// area-weighted), then each sum is normalized. A vertex whose
    /// contributions cancel — both windings of a double-sided leaf share its
    /// vertices — is left at zero rather than producing NaN.
    pub fn compute_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let ab = self.positions[a] - self.positions[b];
            let cb = self.positions[c] - self.positions[b];
            let face = cb.cross(ab);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        for normal in &mut self.normals {
            *normal = normal.normalize_or_zero();
        }
    }
}
