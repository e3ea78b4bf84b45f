/// Wavefront OBJ parser for vertex, texture, normal and face statements
use nom::{
    bytes::complete::take_till1,
    character::complete::{char, i64 as index, space0, space1},
    combinator::{all_consuming, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use std::fmt;

use crate::geometry::{Face, FaceItem, Mesh, MeshElement, Normal, Texture, Vertex};

/// Element list a face index points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Vertex,
    Texture,
    Normal,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Texture => write!(f, "texture"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjErrorKind {
    /// The statement could not be parsed
    Syntax(String),
    /// OBJ indices are 1-based; 0 never resolves
    ZeroIndex,
    /// Index points past the elements seen so far
    IndexOutOfRange {
        element: ElementKind,
        index: i64,
        available: usize,
    },
}

/// Parse failure with the 1-based line it occurred on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjError {
    pub line: usize,
    pub kind: ObjErrorKind,
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ObjErrorKind::Syntax(statement) => {
                write!(f, "line {}: malformed statement `{statement}`", self.line)
            }
            ObjErrorKind::ZeroIndex => write!(f, "line {}: index 0 is not valid", self.line),
            ObjErrorKind::IndexOutOfRange {
                element,
                index,
                available,
            } => write!(
                f,
                "line {}: {element} index {index} does not resolve ({available} defined so far)",
                self.line
            ),
        }
    }
}

impl std::error::Error for ObjError {}

/// Face corner before its indices are resolved
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawItem {
    vertex: i64,
    texture: Option<i64>,
    normal: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Vertex(Vertex),
    Texture(Texture),
    Normal(Normal),
    Face(Vec<RawItem>),
    Ignored,
}

/// Parse OBJ text into a mesh. Faces are resolved against the elements seen
/// before them.
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut mesh = Mesh::new();

    for (number, raw) in input.lines().enumerate() {
        let line = number + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let syntax_error = || ObjError {
            line,
            kind: ObjErrorKind::Syntax(content.to_string()),
        };
        let statement = parse_statement(content).map_err(|_| syntax_error())?;

        let element = match statement {
            Statement::Vertex(v) => MeshElement::Vertex(v),
            Statement::Texture(t) => MeshElement::Texture(t),
            Statement::Normal(n) => MeshElement::Normal(n),
            Statement::Face(items) => {
                if items.len() < 3 {
                    return Err(syntax_error());
                }
                let face = resolve_face(&items, &mesh).map_err(|kind| ObjError { line, kind })?;
                MeshElement::Face(face)
            }
            Statement::Ignored => continue,
        };
        mesh.push(element);
    }

    log::debug!(
        "parsed mesh: {} vertices, {} textures, {} normals, {} faces",
        mesh.vertices.len(),
        mesh.textures.len(),
        mesh.normals.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

fn parse_statement(input: &str) -> Result<Statement, nom::Err<nom::error::Error<&str>>> {
    let (rest, keyword) = keyword(input)?;
    let statement = match keyword {
        "v" => Statement::Vertex(finish(parse_vertex, rest)?),
        "vt" => Statement::Texture(finish(parse_texture, rest)?),
        "vn" => Statement::Normal(finish(parse_normal, rest)?),
        "f" => Statement::Face(finish(parse_face, rest)?),
        _ => Statement::Ignored,
    };
    Ok(statement)
}

fn finish<'a, O>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
    input: &'a str,
) -> Result<O, nom::Err<nom::error::Error<&'a str>>> {
    all_consuming(terminated(parser, space0))(input).map(|(_, output)| output)
}

fn keyword(input: &str) -> IResult<&str, &str> {
    preceded(space0, take_till1(|c: char| c.is_whitespace()))(input)
}

fn parse_vertex(input: &str) -> IResult<&str, Vertex> {
    let (input, (x, y, z, w)) = tuple((
        preceded(space1, double),
        preceded(space1, double),
        preceded(space1, double),
        opt(preceded(space1, double)),
    ))(input)?;
    Ok((input, Vertex::with_w(x, y, z, w.unwrap_or(1.0))))
}

fn parse_texture(input: &str) -> IResult<&str, Texture> {
    let (input, (u, v, w)) = tuple((
        preceded(space1, double),
        opt(preceded(space1, double)),
        opt(preceded(space1, double)),
    ))(input)?;
    Ok((input, Texture { u, v, w }))
}

fn parse_normal(input: &str) -> IResult<&str, Normal> {
    let (input, (i, j, k)) = tuple((
        preceded(space1, double),
        preceded(space1, double),
        preceded(space1, double),
    ))(input)?;
    Ok((input, Normal { i, j, k }))
}

fn parse_face(input: &str) -> IResult<&str, Vec<RawItem>> {
    preceded(space1, separated_list1(space1, parse_face_item))(input)
}

/// `v`, `v/t`, `v//n` or `v/t/n`
fn parse_face_item(input: &str) -> IResult<&str, RawItem> {
    let (input, vertex) = index(input)?;
    let (input, rest) = opt(preceded(
        char('/'),
        tuple((opt(index), opt(preceded(char('/'), index)))),
    ))(input)?;
    let (texture, normal) = rest.unwrap_or((None, None));
    Ok((
        input,
        RawItem {
            vertex,
            texture,
            normal,
        },
    ))
}

fn resolve_face(items: &[RawItem], mesh: &Mesh) -> Result<Face, ObjErrorKind> {
    items
        .iter()
        .map(|item| {
            let vertex = mesh.vertices[resolve(item.vertex, mesh.vertices.len(), ElementKind::Vertex)?];
            let texture = item
                .texture
                .map(|i| resolve(i, mesh.textures.len(), ElementKind::Texture))
                .transpose()?
                .map(|i| mesh.textures[i]);
            let normal = item
                .normal
                .map(|i| resolve(i, mesh.normals.len(), ElementKind::Normal))
                .transpose()?
                .map(|i| mesh.normals[i]);
            Ok(FaceItem {
                vertex,
                texture,
                normal,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Face::new)
}

/// Map a 1-based or negative (relative-from-end) index onto `0..available`
fn resolve(index: i64, available: usize, element: ElementKind) -> Result<usize, ObjErrorKind> {
    let out_of_range = || ObjErrorKind::IndexOutOfRange {
        element,
        index,
        available,
    };
    let resolved = match index {
        0 => return Err(ObjErrorKind::ZeroIndex),
        i if i > 0 => i - 1,
        i => available as i64 + i,
    };
    usize::try_from(resolved)
        .ok()
        .filter(|&i| i < available)
        .ok_or_else(out_of_range)
}
