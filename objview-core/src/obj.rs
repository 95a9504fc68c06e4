/// OBJ parser and writer for the vertex/face subset of the format
use std::io::Write;

use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_while, take_while1},
    character::complete::{char, u64 as decimal},
    combinator::{eof, peek, rest, value},
    multi::many0,
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::{ParseError, ParseResult};
use crate::geometry::{Polygon, Vertex};
use crate::options::LoadOptions;

/// Geometry read from an OBJ file, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMesh {
    pub vertices: Vec<Vertex>,
    pub polygons: Vec<Polygon>,
}

/// Parse OBJ text with the default options
pub fn parse_obj(input: &str) -> ParseResult<ParsedMesh> {
    parse_obj_with(input, &LoadOptions::default())
}

/// Parse OBJ text.
///
/// Only `v` and `f` records are read; every other record type is skipped.
/// Parsing stops at the first invalid line.
pub fn parse_obj_with(input: &str, options: &LoadOptions) -> ParseResult<ParsedMesh> {
    let mut mesh = ParsedMesh::default();
    // Line of each polygon, for range errors reported after the last line
    let mut polygon_lines = Vec::new();

    for (i, line) in input.lines().enumerate() {
        let line_number = i + 1;
        let Ok((body, keyword)) = record_keyword(strip_comment(line)) else {
            continue;
        };

        match keyword {
            "v" => {
                let vertex = parse_vertex_record(body).ok_or_else(|| ParseError::InvalidVertex {
                    line_number,
                    line: line.to_string(),
                })?;
                mesh.vertices.push(vertex);
            }
            "f" => {
                mesh.polygons.push(parse_face_record(body, line_number, line)?);
                polygon_lines.push(line_number);
            }
            _ => {}
        }
    }

    if options.validate_indices {
        check_indices(&mesh, &polygon_lines)?;
    }

    debug!(
        "Parsed {} vertices and {} polygons",
        mesh.vertices.len(),
        mesh.polygons.len()
    );

    Ok(mesh)
}

/// Write vertices and polygons as OBJ text with 1-based face references
pub fn write_obj<W: Write>(
    writer: &mut W,
    vertices: &[Vertex],
    polygons: &[Polygon],
) -> std::io::Result<()> {
    for vertex in vertices {
        writeln!(writer, "v {} {} {}", vertex.x(), vertex.y(), vertex.z())?;
    }

    for polygon in polygons {
        write!(writer, "f")?;
        for index in &polygon.indices {
            write!(writer, " {}", index + 1)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Token separator, shared by every combinator so that a token always ends
/// where the next separator begins
fn is_separator(c: char) -> bool {
    c.is_whitespace()
}

fn separator0(input: &str) -> IResult<&str, &str> {
    take_while(is_separator)(input)
}

fn separator1(input: &str) -> IResult<&str, &str> {
    take_while1(is_separator)(input)
}

fn record_keyword(input: &str) -> IResult<&str, &str> {
    preceded(separator0, take_till1(is_separator))(input)
}

/// Succeeds without consuming when the next token has ended
fn token_end(input: &str) -> IResult<&str, ()> {
    peek(alt((value((), separator1), value((), eof))))(input)
}

fn coordinate(input: &str) -> IResult<&str, f32> {
    preceded(separator1, terminated(float, token_end))(input)
}

fn vertex_coordinates(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, x) = coordinate(input)?;
    let (input, y) = coordinate(input)?;
    let (input, z) = coordinate(input)?;
    Ok((input, (x, y, z)))
}

fn parse_vertex_record(body: &str) -> Option<Vertex> {
    // Anything after the third coordinate (w, vertex colors) is ignored
    let (_, (x, y, z)) = vertex_coordinates(body).ok()?;
    if x.is_finite() && y.is_finite() && z.is_finite() {
        Some(Vertex::new(x, y, z))
    } else {
        None
    }
}

fn face_token(input: &str) -> IResult<&str, &str> {
    preceded(separator1, take_till1(is_separator))(input)
}

/// Zero-based vertex index of a `v`, `v/vt`, `v//vn` or `v/vt/vn` reference
fn vertex_reference(token: &str) -> Option<usize> {
    let parsed: IResult<&str, u64> =
        terminated(decimal, alt((eof, preceded(char('/'), rest))))(token);
    match parsed {
        Ok((_, index)) if index > 0 => usize::try_from(index - 1).ok(),
        _ => None,
    }
}

fn parse_face_record(body: &str, line_number: usize, line: &str) -> ParseResult<Polygon> {
    let tokens = match many0(face_token)(body) {
        Ok((_, tokens)) => tokens,
        Err(_) => Vec::new(),
    };

    let mut indices = Vec::with_capacity(tokens.len());
    for token in tokens {
        let index = vertex_reference(token).ok_or_else(|| ParseError::InvalidFaceIndex {
            line_number,
            line: line.to_string(),
            token: token.to_string(),
        })?;
        indices.push(index);
    }

    if indices.len() < 3 {
        return Err(ParseError::DegeneratePolygon {
            line_number,
            line: line.to_string(),
            count: indices.len(),
        });
    }

    Ok(Polygon::new(indices))
}

fn check_indices(mesh: &ParsedMesh, polygon_lines: &[usize]) -> ParseResult<()> {
    let vertex_count = mesh.vertices.len();

    for (polygon, &line_number) in mesh.polygons.iter().zip(polygon_lines) {
        if let Some(&index) = polygon.indices.iter().find(|&&i| i >= vertex_count) {
            return Err(ParseError::IndexOutOfRange {
                line_number,
                index: index + 1,
                vertex_count,
            });
        }
    }

    Ok(())
}
