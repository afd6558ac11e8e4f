//! Meshes loaded from Wavefront OBJ files.
//!
//! A [`Model`] is the set of named [`TriangleMesh`]es found in one file.

use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::math::{Vec2, Vec3};
use crate::mesh::{Mesh, TriangleMesh};

/// All objects of one OBJ file, in file order.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    meshes: Vec<TriangleMesh>,
}

impl Model {
    pub fn new(name: impl Into<String>, meshes: Vec<TriangleMesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
        }
    }

    /// Load every object of an OBJ file, triangulating polygons.
    ///
    /// Objects without normals get area-weighted generated ones, objects
    /// without texture coordinates get zero UVs. Materials are ignored.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;
        if models.is_empty() {
            return Err(Error::EmptyModel(path.to_path_buf()));
        }

        let meshes: Vec<TriangleMesh> = models.into_iter().map(convert).collect();
        let faces: usize = meshes.iter().map(|m| m.face_count()).sum();
        info!(
            "loaded {} ({} objects, {} faces)",
            path.display(),
            meshes.len(),
            faces
        );

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, meshes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    /// Look up an object by its OBJ name.
    pub fn mesh(&self, name: &str) -> Option<&TriangleMesh> {
        self.meshes.iter().find(|m| m.name() == name)
    }
}

fn convert(model: tobj::Model) -> TriangleMesh {
    let mesh = model.mesh;
    let positions: Vec<Vec3> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();
    let normals: Vec<Vec3> = mesh
        .normals
        .chunks_exact(3)
        .map(|n| Vec3::new(n[0], n[1], n[2]).normalize())
        .collect();
    let uvs: Vec<Vec2> = mesh
        .texcoords
        .chunks_exact(2)
        .map(|t| Vec2::new(t[0], t[1]))
        .collect();

    if normals.is_empty() {
        warn!("object '{}' has no normals, generating them", model.name);
    }

    TriangleMesh::from_indexed(
        model.name,
        &positions,
        (normals.len() == positions.len()).then_some(normals.as_slice()),
        (uvs.len() == positions.len()).then_some(uvs.as_slice()),
        &mesh.indices,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    fn write_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tinyrender-{}-{name}.obj", std::process::id()));
        fs::write(&path, contents).expect("write temp obj");
        path
    }

    #[test]
    fn loads_and_triangulates_quads() {
        let path = write_obj(
            "quad",
            "o plane\n\
             v -1 0 1\nv 1 0 1\nv 1 0 -1\nv -1 0 -1\n\
             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
             vn 0 1 0\n\
             f 1/1/1 2/2/1 3/3/1 4/4/1\n",
        );
        let model = Model::from_obj(&path).expect("valid obj");
        fs::remove_file(&path).ok();

        let plane = model.mesh("plane").expect("named object");
        assert_eq!(plane.face_count(), 2);
        assert_eq!(plane.normal(1, 2), Vec3::UP);
        assert_relative_eq!(plane.uv(0, 1).x, 1.0);
    }

    #[test]
    fn generates_missing_normals() {
        let path = write_obj("bare", "o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let model = Model::from_obj(&path).expect("valid obj");
        fs::remove_file(&path).ok();

        let tri = &model.meshes()[0];
        assert_relative_eq!(tri.normal(0, 0).z, 1.0, epsilon = 1e-6);
        assert_eq!(tri.uv(0, 0), Vec2::ZERO);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Model::from_obj("/nonexistent/tinyrender/missing.obj");
        assert!(matches!(result, Err(Error::Obj(_))));
    }
}
