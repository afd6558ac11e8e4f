//! Triangle geometry as seen by shaders.

use crate::math::{Vec2, Vec3};

/// Geometry addressable by face and corner.
///
/// Every face is a triangle, so `corner` is always in `0..3`.
pub trait Mesh {
    fn face_count(&self) -> usize;
    fn position(&self, face: usize, corner: usize) -> Vec3;
    fn normal(&self, face: usize, corner: usize) -> Vec3;
    fn uv(&self, face: usize, corner: usize) -> Vec2;
}

/// Unindexed triangle soup: three entries per face in each attribute list.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
}

impl TriangleMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_triangle(&mut self, positions: [Vec3; 3], normals: [Vec3; 3], uvs: [Vec2; 3]) {
        self.positions.extend(positions);
        self.normals.extend(normals);
        self.uvs.extend(uvs);
    }

    /// Add a planar quad `p0 p1 p2 p3` (counter-clockwise when seen from the
    /// front) as two triangles with a flat normal and UVs spanning `[0, 1]`.
    pub fn add_quad(&mut self, p: [Vec3; 4]) {
        let normal = (p[1] - p[0]).cross(p[2] - p[0]).normalize();
        let uv = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        self.add_triangle([p[0], p[1], p[2]], [normal; 3], [uv[0], uv[1], uv[2]]);
        self.add_triangle([p[0], p[2], p[3]], [normal; 3], [uv[0], uv[2], uv[3]]);
    }

    /// A square in the XZ plane at height `y`, facing +Y.
    ///
    /// UV (0, 0) is at `(-half, y, +half)` and v grows towards -Z.
    pub fn quad(name: impl Into<String>, half: f32, y: f32) -> Self {
        let mut mesh = Self::new(name);
        mesh.add_quad([
            Vec3::new(-half, y, half),
            Vec3::new(half, y, half),
            Vec3::new(half, y, -half),
            Vec3::new(-half, y, -half),
        ]);
        mesh
    }

    /// An axis-aligned box with outward-facing flat normals.
    pub fn cuboid(name: impl Into<String>, min: Vec3, max: Vec3) -> Self {
        let mut mesh = Self::new(name);
        let (a, b) = (min, max);
        // +X, -X
        mesh.add_quad([
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(b.x, b.y, b.z),
        ]);
        mesh.add_quad([
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(a.x, b.y, a.z),
        ]);
        // +Y, -Y
        mesh.add_quad([
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, b.y, a.z),
        ]);
        mesh.add_quad([
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, a.y, b.z),
        ]);
        // +Z, -Z
        mesh.add_quad([
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(b.x, b.y, b.z),
            Vec3::new(a.x, b.y, b.z),
        ]);
        mesh.add_quad([
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
        ]);
        mesh
    }

    /// Build from indexed data. `normals` and `uvs` are indexed like
    /// `positions`; missing normals are generated, missing UVs are zero.
    pub fn from_indexed(
        name: impl Into<String>,
        positions: &[Vec3],
        normals: Option<&[Vec3]>,
        uvs: Option<&[Vec2]>,
        indices: &[u32],
    ) -> Self {
        let generated;
        let normals = match normals {
            Some(n) => n,
            None => {
                generated = generate_normals(positions, indices);
                generated.as_slice()
            }
        };

        let mut mesh = Self::new(name);
        for tri in indices.chunks_exact(3) {
            let idx = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            mesh.add_triangle(
                idx.map(|i| positions[i]),
                idx.map(|i| normals[i]),
                idx.map(|i| uvs.map_or(Vec2::ZERO, |uv| uv[i])),
            );
        }
        mesh
    }
}

impl Mesh for TriangleMesh {
    fn face_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    fn position(&self, face: usize, corner: usize) -> Vec3 {
        self.positions[face * 3 + corner]
    }

    #[inline]
    fn normal(&self, face: usize, corner: usize) -> Vec3 {
        self.normals[face * 3 + corner]
    }

    #[inline]
    fn uv(&self, face: usize, corner: usize) -> Vec2 {
        self.uvs[face * 3 + corner]
    }
}

/// Area-weighted vertex normals for indexed triangles.
///
/// Each face adds its unnormalized cross product, whose length is twice its
/// area, to all three of its vertices.
pub fn generate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] = normals[a] + n;
        normals[b] = normals[b] + n;
        normals[c] = normals[c] + n;
    }
    normals.into_iter().map(|n| n.normalize()).collect()
}
