//! Model geometry: Wavefront OBJ loading and the built-in cube.
//!
//! Geometry is converted to Q12 once, at load time. Normals are flat: one per
//! face, computed from the face winding, so counter-clockwise triangles face
//! the viewer.

use std::io::BufRead;
use std::path::Path;

use log::{info, warn};

use crate::error::LoadError;
use crate::math::fixed::{float_to_fixed, int_to_fixed, FIXED_ONE};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::triangle::Face;

/// Vertex, normal, texture coordinate and face arrays of one model.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub faces: Vec<Face>,
}

const ONE: i32 = int_to_fixed(1);

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-ONE, -ONE, -ONE),
    Vec3::new(-ONE, ONE, -ONE),
    Vec3::new(ONE, ONE, -ONE),
    Vec3::new(ONE, -ONE, -ONE),
    Vec3::new(ONE, ONE, ONE),
    Vec3::new(ONE, -ONE, ONE),
    Vec3::new(-ONE, ONE, ONE),
    Vec3::new(-ONE, -ONE, ONE),
];

/// Each side as a counter-clockwise quad seen from outside, with its normal.
const CUBE_SIDES: [([u32; 4], Vec3); 6] = [
    ([0, 1, 2, 3], Vec3::new(0, 0, -ONE)),
    ([3, 2, 4, 5], Vec3::new(ONE, 0, 0)),
    ([5, 4, 6, 7], Vec3::new(0, 0, ONE)),
    ([7, 6, 1, 0], Vec3::new(-ONE, 0, 0)),
    ([1, 6, 4, 2], Vec3::new(0, ONE, 0)),
    ([5, 7, 0, 3], Vec3::new(0, -ONE, 0)),
];

const QUAD_TEXCOORDS: [Vec2; 4] = [
    Vec2::new(0, 0),
    Vec2::new(0, FIXED_ONE),
    Vec2::new(FIXED_ONE, FIXED_ONE),
    Vec2::new(FIXED_ONE, 0),
];

/// A cube spanning -1..1 on every axis, each side mapping the whole texture
/// from texture slot 0.
pub fn cube() -> MeshData {
    let mut faces = Vec::with_capacity(12);
    let mut normals = Vec::with_capacity(6);
    for (side, &([a, b, c, d], normal)) in CUBE_SIDES.iter().enumerate() {
        let n = side as u32;
        normals.push(normal);
        faces.push(Face::new([a, b, c], n, [0, 1, 2], 0));
        faces.push(Face::new([a, c, d], n, [0, 2, 3], 0));
    }
    MeshData {
        vertices: CUBE_VERTICES.to_vec(),
        normals,
        texcoords: QUAD_TEXCOORDS.to_vec(),
        faces,
    }
}

/// Flat normal of a counter-clockwise triangle.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize()
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    }
}

/// Load all objects of an OBJ file into one mesh.
///
/// The texture slot of each face is its material index (0 without materials).
pub fn load_obj(path: &Path) -> Result<MeshData, LoadError> {
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let mesh = from_tobj(&models)?;
    info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Parse OBJ source from a reader. Material libraries are not resolved.
pub fn parse_obj<R: BufRead>(reader: &mut R) -> Result<MeshData, LoadError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;
    from_tobj(&models)
}

fn from_tobj(models: &[tobj::Model]) -> Result<MeshData, LoadError> {
    let mut data = MeshData::default();
    let mut untextured = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let vertex_base = data.vertices.len() as u32;
        let texcoord_base = data.texcoords.len() as u32;

        data.vertices.extend(mesh.positions.chunks_exact(3).map(|p| {
            Vec3::new(float_to_fixed(p[0]), float_to_fixed(p[1]), float_to_fixed(p[2]))
        }));
        // OBJ puts the texture origin bottom-left; texture rows start at the top.
        data.texcoords.extend(
            mesh.texcoords
                .chunks_exact(2)
                .map(|t| Vec2::new(float_to_fixed(t[0]), float_to_fixed(1.0 - t[1]))),
        );

        let slot = mesh.material_id.unwrap_or(0) as u32;
        for (i, tri) in mesh.indices.chunks_exact(3).enumerate() {
            let vertices = [
                tri[0] + vertex_base,
                tri[1] + vertex_base,
                tri[2] + vertex_base,
            ];
            let normal = face_normal(
                data.vertices[vertices[0] as usize],
                data.vertices[vertices[1] as usize],
                data.vertices[vertices[2] as usize],
            );
            let normal_index = data.normals.len() as u32;
            data.normals.push(normal);

            let texcoords = match mesh.texcoord_indices.get(i * 3..i * 3 + 3) {
                Some(t) if !mesh.texcoords.is_empty() => [
                    t[0] + texcoord_base,
                    t[1] + texcoord_base,
                    t[2] + texcoord_base,
                ],
                _ => {
                    untextured.push(data.faces.len());
                    [0; 3]
                }
            };

            data.faces
                .push(Face::new(vertices, normal_index, texcoords, slot));
        }
    }

    if data.faces.is_empty() {
        return Err(LoadError::EmptyMesh);
    }

    if !untextured.is_empty() {
        warn!(
            "{} faces have no texture coordinates, mapping them to the texture origin",
            untextured.len()
        );
        let origin = data.texcoords.len() as u32;
        data.texcoords.push(Vec2::ZERO);
        for i in untextured {
            data.faces[i].texcoords = [origin; 3];
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD_OBJ: &str = "\
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

    #[test]
    fn cube_normals_match_winding() {
        let cube = cube();
        assert_eq!(cube.faces.len(), 12);
        for face in &cube.faces {
            let [a, b, c] = face.vertices.map(|i| cube.vertices[i as usize]);
            assert_eq!(face_normal(a, b, c), cube.normals[face.normal as usize]);
        }
    }

    #[test]
    fn parses_and_triangulates_quad() {
        let mesh = parse_obj(&mut Cursor::new(QUAD_OBJ)).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.vertices[2], Vec3::new(FIXED_ONE, FIXED_ONE, 0));
        // V is flipped so the top of the image maps to v = 1 in the file.
        assert_eq!(mesh.texcoords[0], Vec2::new(0, FIXED_ONE));
        for face in &mesh.faces {
            assert_eq!(mesh.normals[face.normal as usize], Vec3::FORWARD);
            assert_eq!(face.texture_slot, 0);
        }
    }

    #[test]
    fn missing_texcoords_fall_back_to_origin() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = parse_obj(&mut Cursor::new(src)).unwrap();
        let face = &mesh.faces[0];
        assert_eq!(mesh.texcoords[face.texcoords[0] as usize], Vec2::ZERO);
    }

    #[test]
    fn empty_obj_is_an_error() {
        let result = parse_obj(&mut Cursor::new("v 0 0 0\n"));
        assert!(matches!(result, Err(LoadError::EmptyMesh)));
    }
}
