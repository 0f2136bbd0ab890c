//! Wavefront OBJ loader for the sub-cube mesh
//!
//! Only geometry is read: `v`, `vn` and `f`. Texture and parameter-space
//! coordinates, lines, groups, smoothing and material statements are accepted
//! and ignored.
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, i64 as parse_i64, space0, space1},
    combinator::{all_consuming, map, opt, value},
    multi::separated_list1,
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use std::path::Path;

use crate::error::ObjError;
use crate::geometry::{Mesh, Triangle, Vertex};

/// One `v/vt/vn` reference inside a face statement
#[derive(Debug, Clone, Copy, PartialEq)]
struct FaceVertex {
    position: i64,
    normal: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Position([f32; 3]),
    Normal([f32; 3]),
    Face(Vec<FaceVertex>),
    Ignored,
}

fn parse_vector3(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    // Optional w component
    let (input, _) = opt(preceded(space1, float))(input)?;
    Ok((input, [x, y, z]))
}

fn parse_face_vertex(input: &str) -> IResult<&str, FaceVertex> {
    let (input, position) = parse_i64(input)?;
    let (input, _texcoord) = opt(preceded(char('/'), opt(parse_i64)))(input)?;
    let (input, normal) = opt(preceded(char('/'), parse_i64))(input)?;
    Ok((input, FaceVertex { position, normal }))
}

fn parse_face(input: &str) -> IResult<&str, Vec<FaceVertex>> {
    preceded(space1, separated_list1(space1, parse_face_vertex))(input)
}

fn parse_ignored(input: &str) -> IResult<&str, Statement> {
    let keyword = alt((
        tag("vt"),
        tag("vp"),
        tag("o"),
        tag("g"),
        tag("s"),
        tag("l"),
        tag("mtllib"),
        tag("usemtl"),
    ));
    value(
        Statement::Ignored,
        tuple((keyword, nom::combinator::rest)),
    )(input)
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    all_consuming(terminated(
        alt((
            map(preceded(tag("vn"), parse_vector3), Statement::Normal),
            parse_ignored,
            map(preceded(tag("v"), parse_vector3), Statement::Position),
            map(preceded(tag("f"), parse_face), Statement::Face),
        )),
        space0,
    ))(input)
}

/// Resolve a 1-based (or negative, relative) OBJ index into `0..len`
fn resolve_index(index: i64, len: usize, line: usize) -> Result<usize, ObjError> {
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => len as i64 + i,
        _ => -1,
    };
    usize::try_from(resolved)
        .ok()
        .filter(|&i| i < len)
        .ok_or(ObjError::IndexOutOfRange { line, index })
}

/// Parse OBJ text into a mesh, fan-triangulating polygons
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut mesh = Mesh::new();

    for (line_index, raw_line) in input.lines().enumerate() {
        let line = line_index + 1;
        let content = raw_line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let statement = match parse_statement(content) {
            Ok((_, statement)) => statement,
            Err(_) => {
                return Err(ObjError::Syntax {
                    line,
                    content: content.to_string(),
                })
            }
        };

        match statement {
            Statement::Position(p) => positions.push(p),
            Statement::Normal(n) => normals.push(n),
            Statement::Ignored => {}
            Statement::Face(refs) => {
                if refs.len() < 3 {
                    return Err(ObjError::Syntax {
                        line,
                        content: content.to_string(),
                    });
                }
                let mut vertices = Vec::with_capacity(refs.len());
                for face_vertex in refs {
                    let [x, y, z] = positions[resolve_index(face_vertex.position, positions.len(), line)?];
                    let [nx, ny, nz] = match face_vertex.normal {
                        Some(n) => normals[resolve_index(n, normals.len(), line)?],
                        None => [0.0; 3],
                    };
                    vertices.push(Vertex::new(x, y, z, nx, ny, nz));
                }
                for i in 1..vertices.len() - 1 {
                    mesh.add_triangle(Triangle::new(vertices[0], vertices[i], vertices[i + 1]));
                }
            }
        }
    }

    if mesh.is_empty() {
        return Err(ObjError::Empty);
    }
    log::debug!(
        "parsed OBJ mesh: {} positions, {} normals, {} triangles",
        positions.len(),
        normals.len(),
        mesh.triangles.len()
    );
    Ok(mesh)
}

/// Read and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ObjError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    const QUAD: &str = "\
# a unit quad
mtllib quad.mtl
o Quad
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
usemtl Material
s off
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_parse_quad_fan() {
        let mesh = parse_obj(QUAD).unwrap();
        assert_eq!(mesh.triangles.len(), 2);
        for triangle in &mesh.triangles {
            assert_eq!(triangle.vertices[0].normal, Vector3::z());
            assert!((triangle.calculate_normal() - Vector3::z()).norm() < 1e-6);
        }
        assert_eq!(mesh.triangles[1].vertices[2].position.x, -1.0);
    }

    #[test]
    fn test_bundled_cube_matches_builtin() {
        let mesh = parse_obj(include_str!("../../assets/cube.obj")).unwrap();
        assert_eq!(mesh.triangles.len(), 12);
        for triangle in &mesh.triangles {
            assert!((triangle.calculate_normal() - triangle.vertices[0].normal).norm() < 1e-6);
        }

        let home = Vector3::new(1.0, -1.0, 0.0);
        let colors = |m: &Mesh| {
            let mut colors: Vec<_> = m.paint_stickers(&home).triangles.iter().map(|t| t.color).collect();
            colors.sort_by_key(|c| *c as u8);
            colors
        };
        assert_eq!(colors(&mesh), colors(&Mesh::cube(2.0)));
    }

    #[test]
    fn test_lines_and_parameter_vertices_are_ignored() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvp 0.5 0.5\nl 1 2\nl 2 3 1\nf 1 2 3\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
    }

    #[test]
    fn test_face_vertex_forms() {
        let (_, v) = parse_face_vertex("3").unwrap();
        assert_eq!(v, FaceVertex { position: 3, normal: None });
        let (_, v) = parse_face_vertex("3/7").unwrap();
        assert_eq!(v, FaceVertex { position: 3, normal: None });
        let (_, v) = parse_face_vertex("3//2").unwrap();
        assert_eq!(v, FaceVertex { position: 3, normal: Some(2) });
        let (_, v) = parse_face_vertex("3/7/2").unwrap();
        assert_eq!(v, FaceVertex { position: 3, normal: Some(2) });
    }

    #[test]
    fn test_negative_indices() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(mesh.triangles[0].vertices[1].position.x, 1.0);
    }

    #[test]
    fn test_out_of_range_index() {
        let text = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        match parse_obj(text) {
            Err(ObjError::IndexOutOfRange { line, index }) => {
                assert_eq!(line, 3);
                assert_eq!(index, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let text = "v 0 0 0\nv 1 zero 0\n";
        match parse_obj(text) {
            Err(ObjError::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_face_is_rejected() {
        let text = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        assert!(matches!(parse_obj(text), Err(ObjError::Syntax { line: 3, .. })));
    }

    #[test]
    fn test_no_faces() {
        assert!(matches!(parse_obj("v 0 0 0\n"), Err(ObjError::Empty)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("/nonexistent/cube.obj").unwrap_err();
        assert!(matches!(err, ObjError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/cube.obj"));
    }
}
