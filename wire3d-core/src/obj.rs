//! Wavefront OBJ mesh loader.
//!
//! Only geometry is read: `v` statements become vertices and `f` statements
//! become triangles (fan-triangulated) plus their outline edges. Texture
//! coordinates, normals, groups and materials are skipped.
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::take_till,
    character::complete::{char, digit1, space1},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::many1,
    number::complete::double,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::color::Color;
use crate::geometry::Object;
use crate::math::Vec3;

/// Edge color of loaded meshes.
pub const EDGE_COLOR: Color = Color::WHITE;
/// Fill color of loaded meshes.
pub const TRIANGLE_COLOR: Color = Color::GRAY;

#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("failed to read OBJ file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed `{keyword}` statement")]
    Syntax { line: usize, keyword: String },

    #[error("line {line}: vertex needs 3 coordinates, found {found}")]
    VertexArity { line: usize, found: usize },

    #[error("line {line}: face needs at least 3 vertices, found {found}")]
    FaceArity { line: usize, found: usize },

    #[error("line {line}: vertex index {index} does not refer to a vertex")]
    BadIndex { line: usize, index: i64 },

    #[error("OBJ data does not define any vertices")]
    NoVertices,
}

enum Statement {
    Vertex(Vec<f64>),
    Face(Vec<i64>),
    Ignored,
}

/// Reads and parses an OBJ file, scaling every vertex by `scale`.
pub fn load_obj(path: impl AsRef<Path>, scale: f64) -> Result<Object, ObjError> {
    let text = fs::read_to_string(path)?;
    parse_obj(&text, scale)
}

/// Parses OBJ text, scaling every vertex by `scale`.
pub fn parse_obj(text: &str, scale: f64) -> Result<Object, ObjError> {
    let mut vertices = Vec::new();
    let mut faces: Vec<(usize, Vec<usize>)> = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line_no = line_no + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let (_, statement) = all_consuming(statement)(line).map_err(|_| ObjError::Syntax {
            line: line_no,
            keyword: line.split_whitespace().next().unwrap_or_default().to_string(),
        })?;

        match statement {
            Statement::Vertex(coords) => {
                if coords.len() < 3 {
                    return Err(ObjError::VertexArity {
                        line: line_no,
                        found: coords.len(),
                    });
                }
                // a fourth (w) coordinate is allowed and ignored
                vertices.push(Vec3::new(coords[0], coords[1], coords[2]) * scale);
            }
            Statement::Face(refs) => {
                if refs.len() < 3 {
                    return Err(ObjError::FaceArity {
                        line: line_no,
                        found: refs.len(),
                    });
                }
                let indices = refs
                    .iter()
                    .map(|&index| {
                        resolve_index(index, vertices.len()).ok_or(ObjError::BadIndex {
                            line: line_no,
                            index,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                faces.push((line_no, indices));
            }
            Statement::Ignored => {}
        }
    }

    if vertices.is_empty() {
        return Err(ObjError::NoVertices);
    }

    let mut object = Object::new(vertices, EDGE_COLOR, TRIANGLE_COLOR);
    for (line_no, indices) in faces {
        // positive indices may refer forward, so range checks wait until here
        if let Some(&bad) = indices.iter().find(|&&i| i >= object.vertices.len()) {
            return Err(ObjError::BadIndex {
                line: line_no,
                index: bad as i64 + 1,
            });
        }
        let n = indices.len();
        for i in 1..n - 1 {
            object
                .triangle_mesh
                .push([indices[0], indices[i], indices[i + 1]]);
        }
        for i in 0..n {
            object.edges.push([indices[i], indices[(i + 1) % n]]);
        }
    }

    Ok(object)
}

/// Converts a 1-based (or negative, relative) OBJ index to a 0-based one.
fn resolve_index(index: i64, defined: usize) -> Option<usize> {
    if index > 0 {
        usize::try_from(index - 1).ok()
    } else if index < 0 {
        defined.checked_sub(usize::try_from(index.unsigned_abs()).ok()?)
    } else {
        None
    }
}

fn statement(input: &str) -> IResult<&str, Statement> {
    let (rest, keyword) = take_till(|c: char| c.is_whitespace())(input)?;
    match keyword {
        "v" => map(coordinates, Statement::Vertex)(rest),
        "f" => map(vertex_refs, Statement::Face)(rest),
        _ => Ok(("", Statement::Ignored)),
    }
}

fn coordinates(input: &str) -> IResult<&str, Vec<f64>> {
    many1(preceded(space1, double))(input)
}

fn vertex_refs(input: &str) -> IResult<&str, Vec<i64>> {
    many1(preceded(space1, vertex_ref))(input)
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`; only `v` is kept.
fn vertex_ref(input: &str) -> IResult<&str, i64> {
    terminated(
        index,
        opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))),
    )(input)
}

fn index(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>)(input)
}
