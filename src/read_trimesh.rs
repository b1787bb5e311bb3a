//! Loading Parry TriMesh from STL files (binary or ASCII).

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use nalgebra::Point3;
use parry3d::shape::TriMesh;
use stl_io::read_stl;
use crate::parameter_error::ParameterError;

/// Loads the mesh from the STL file. Vertices are multiplied by `scale` (use 1000.0 for meshes
/// exported in meters, as the robot model is in millimeters).
pub fn load_trimesh_from_stl<P: AsRef<Path>>(stl_file_path: P, scale: f32) -> Result<TriMesh, ParameterError> {
    let path = stl_file_path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_trimesh_from_stl(&mut reader, scale)
        .map_err(|err| match err {
            ParameterError::MeshError(msg) => ParameterError::MeshError(format!("{}: {}", path.display(), msg)),
            other => other,
        })
}

/// Reads the mesh from any STL source
pub fn read_trimesh_from_stl<R: Read + Seek>(reader: &mut R, scale: f32) -> Result<TriMesh, ParameterError> {
    let stl = read_stl(reader)?;

    let vertices: Vec<Point3<f32>> = stl
        .vertices
        .into_iter()
        .map(|vertex| Point3::new(vertex[0] * scale, vertex[1] * scale, vertex[2] * scale))
        .collect();

    let indices: Vec<[u32; 3]> = stl
        .faces
        .into_iter()
        .map(|face| [
            face.vertices[0] as u32,
            face.vertices[1] as u32,
            face.vertices[2] as u32,
        ])
        .collect();

    if indices.is_empty() {
        return Err(ParameterError::MeshError("mesh has no triangles".to_string()));
    }

    TriMesh::new(vertices, indices)
        .map_err(|err| ParameterError::MeshError(format!("{:?}", err)))
}
