//! Wavefront OBJ reading and writing

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::UnpackedMesh;
use crate::error::{GenError, Result};

/// Write a mesh as an OBJ file
///
/// Faces reference normals (`f v//vn`) when the mesh has one normal per
/// vertex, otherwise only positions are written.
pub fn write_obj(mesh: &UnpackedMesh, path: &Path, name: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| GenError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    write_obj_to(mesh, &mut writer, name)
        .and_then(|_| writer.flush())
        .map_err(|e| GenError::io(path, e))
}

fn write_obj_to<W: Write>(mesh: &UnpackedMesh, w: &mut W, name: &str) -> std::io::Result<()> {
    writeln!(w, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;
    writeln!(w, "o {name}")?;

    for [x, y, z] in &mesh.positions {
        writeln!(w, "v {x:.6} {y:.6} {z:.6}")?;
    }

    let with_normals = mesh.normals.len() == mesh.positions.len();
    if with_normals {
        for [x, y, z] in &mesh.normals {
            writeln!(w, "vn {x:.6} {y:.6} {z:.6}")?;
        }
    }

    // OBJ indices are 1-based
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        if with_normals {
            writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}")?;
        } else {
            writeln!(w, "f {a} {b} {c}")?;
        }
    }

    Ok(())
}

/// Read positions and faces from an OBJ file
///
/// Polygons are fan-triangulated. Texture coordinates, normals, groups and
/// material records are ignored, so the returned mesh has no normals.
pub fn read_obj(path: &Path) -> Result<UnpackedMesh> {
    let file = File::open(path).map_err(|e| GenError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut mesh = UnpackedMesh::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| GenError::io(path, e))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parse_err = |message: String| GenError::ObjParse {
            path: path.to_path_buf(),
            line: line_no + 1,
            message,
        };

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords: Vec<f32> = parts
                    .take(3)
                    .map(|s| s.parse::<f32>())
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|e| parse_err(format!("bad vertex coordinate: {e}")))?;
                if coords.len() != 3 {
                    return Err(parse_err("vertex needs 3 coordinates".to_string()));
                }
                mesh.positions.push([coords[0], coords[1], coords[2]]);
            }
            Some("f") => {
                let vertex_count = mesh.positions.len();
                let face: Vec<u32> = parts
                    .map(|s| resolve_index(s, vertex_count))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(parse_err)?;
                if face.len() < 3 {
                    return Err(parse_err("face needs at least 3 vertices".to_string()));
                }
                for i in 1..face.len() - 1 {
                    mesh.indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// Resolve a face token (`v`, `v/vt`, `v//vn`, `v/vt/vn`) to a 0-based index
fn resolve_index(token: &str, vertex_count: usize) -> std::result::Result<u32, String> {
    let raw = token.split('/').next().unwrap_or_default();
    let index: i64 = raw
        .parse()
        .map_err(|_| format!("bad face index {token:?}"))?;

    let resolved = if index < 0 {
        vertex_count as i64 + index
    } else {
        index - 1
    };

    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(format!(
            "face index {index} out of range ({vertex_count} vertices)"
        ));
    }

    Ok(resolved as u32)
}
