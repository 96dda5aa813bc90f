/// OFF mesh file parser
use nom::{
    character::complete::{multispace0, multispace1, u32 as integer},
    number::complete::float,
    sequence::preceded,
    IResult,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use nalgebra::Point3;

use crate::error::OffError;
use crate::geometry::{Face, Mesh};

/// The first line of every OFF file, terminator included
const HEADER: &str = "OFF\n";

/// Load an OFF file from disk
pub fn load_off<P: AsRef<Path>>(path: P) -> Result<Mesh, OffError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| OffError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    read_off(BufReader::new(file))
}

/// Read an OFF mesh from a buffered reader.
///
/// Only the header line is read before it is checked; a reader that does not
/// start with `OFF\n` is left positioned after its first line.
pub fn read_off<R: BufRead>(mut reader: R) -> Result<Mesh, OffError> {
    // Raw bytes, so a binary file is a header mismatch and not a decode error
    let mut header = Vec::new();
    reader.read_until(b'\n', &mut header)?;
    if header != HEADER.as_bytes() {
        return Err(OffError::MalformedHeader);
    }

    let mut body = String::new();
    reader.read_to_string(&mut body)?;
    parse_off_body(&body)
}

/// Parse a complete OFF document held in memory
pub fn parse_off(input: &str) -> Result<Mesh, OffError> {
    match input.strip_prefix(HEADER) {
        Some(body) => parse_off_body(body),
        None => Err(OffError::MalformedHeader),
    }
}

/// Parse everything after the header line: counts, vertices, faces
fn parse_off_body(body: &str) -> Result<Mesh, OffError> {
    let lines = LineTracker::new(body);

    let (rest, (vertex_count, face_count)) =
        lines.run(body, "vertex, face and edge counts", parse_counts)?;
    let vertex_count = vertex_count as usize;
    let face_count = face_count as usize;

    // Every record takes at least a few bytes, so the input length caps what a
    // truthful header can ask for.
    let mut mesh = Mesh::with_capacity(
        vertex_count.min(body.len()),
        face_count.min(body.len()),
    );

    let mut input = rest;
    for _ in 0..vertex_count {
        let (rest, (x, y, z)) = lines.run(input, "vertex coordinates", parse_vector3)?;
        mesh.add_vertex(Point3::new(x, y, z));
        input = rest;
    }

    for face in 0..face_count {
        let (rest, (arity, i0, i1, i2)) = lines.run(input, "face indices", parse_face)?;
        if arity != 3 {
            return Err(OffError::UnsupportedFaceArity { face, arity });
        }
        mesh.add_face(Face::new(i0 as usize, i1 as usize, i2 as usize))?;
        input = rest;
    }

    Ok(mesh)
}

/// Tracks the start of the body so nom failures can be reported by line
struct LineTracker<'a> {
    body: &'a str,
}

impl<'a> LineTracker<'a> {
    fn new(body: &'a str) -> Self {
        Self { body }
    }

    fn run<T>(
        &self,
        input: &'a str,
        expected: &'static str,
        parser: impl FnOnce(&'a str) -> IResult<&'a str, T>,
    ) -> Result<(&'a str, T), OffError> {
        parser(input).map_err(|err| {
            let remaining = match err {
                nom::Err::Error(e) | nom::Err::Failure(e) => e.input,
                nom::Err::Incomplete(_) => "",
            };
            if remaining.trim_start().is_empty() {
                OffError::UnexpectedEof { expected }
            } else {
                OffError::Syntax {
                    line: self.line_of(remaining.trim_start()),
                    expected,
                }
            }
        })
    }

    /// 1-based line of a suffix of the body; the header is line 1
    fn line_of(&self, remaining: &str) -> usize {
        let consumed = self.body.len() - remaining.len();
        self.body[..consumed].matches('\n').count() + 2
    }
}

fn parse_counts(input: &str) -> IResult<&str, (u32, u32)> {
    let (input, vertices) = preceded(multispace0, integer)(input)?;
    let (input, faces) = preceded(multispace1, integer)(input)?;
    let (input, _edges) = preceded(multispace1, integer)(input)?;
    Ok((input, (vertices, faces)))
}

fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, x) = preceded(multispace1, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, (x, y, z)))
}

fn parse_face(input: &str) -> IResult<&str, (u32, u32, u32, u32)> {
    let (input, arity) = preceded(multispace1, integer)(input)?;
    let (input, i0) = preceded(multispace1, integer)(input)?;
    let (input, i1) = preceded(multispace1, integer)(input)?;
    let (input, i2) = preceded(multispace1, integer)(input)?;
    Ok((input, (arity, i0, i1, i2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "OFF\n3 1 0\n0.0 0.0 0.0\n1.0 0.0 0.0\n0.0 1.0 0.0\n3 0 1 2\n";

    #[test]
    fn test_parse_single_triangle() {
        let mesh = parse_off(TRIANGLE).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces()[0], Face::new(0, 1, 2));
        assert_eq!(mesh.vertices()[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_tokens_may_span_lines() {
        let input = "OFF\n  4 2\n 5\n0 0 0 1 0 0\n1 1 0\n0 1 0\n\n3 0 1 2 3\t0 2 3\n";
        let mesh = parse_off(input).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces()[1], Face::new(0, 2, 3));
        assert_eq!(mesh.vertices()[2], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_scientific_and_negative_coordinates() {
        let input = "OFF\n1 0 0\n-1.5e2 2.5E-1 -0\n";
        let mesh = parse_off(input).unwrap();
        assert_eq!(mesh.vertices()[0], Point3::new(-150.0, 0.25, 0.0));
    }

    #[test]
    fn test_trailing_content_is_ignored() {
        let input = format!("{TRIANGLE}# exported by hand\n");
        assert_eq!(parse_off(&input).unwrap().face_count(), 1);
    }

    #[test]
    fn test_header_must_match_exactly() {
        for input in ["OFS\n3 1 0\n", " OFF\n", "OFF \n", "OFF\r\n0 0 0\n", "OFF", "off\n", ""] {
            assert!(
                matches!(parse_off(input), Err(OffError::MalformedHeader)),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_reader_stops_after_bad_header() {
        let mut reader = std::io::Cursor::new("OFS\n3 1 0\n".as_bytes());
        assert!(matches!(read_off(&mut reader), Err(OffError::MalformedHeader)));
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_binary_first_line_is_a_header_mismatch() {
        let png: &[u8] = b"\x89PNG\r\n\x1a\n rest";
        let mut reader = std::io::Cursor::new(png);
        assert!(matches!(read_off(&mut reader), Err(OffError::MalformedHeader)));
        assert_eq!(reader.position(), 6);

        let reader = std::io::Cursor::new(b"OFF\xff\n3 1 0\n".as_slice());
        assert!(matches!(read_off(reader), Err(OffError::MalformedHeader)));
    }

    #[test]
    fn test_non_utf8_body_is_an_io_error() {
        let reader = std::io::Cursor::new(b"OFF\n1 0 0\n\xff 0 0\n".as_slice());
        assert!(matches!(read_off(reader), Err(OffError::Io(_))));
    }

    #[test]
    fn test_missing_vertices() {
        let input = "OFF\n3 1 0\n0.0 0.0 0.0\n1.0 0.0 0.0\n";
        assert!(matches!(
            parse_off(input),
            Err(OffError::UnexpectedEof {
                expected: "vertex coordinates"
            })
        ));
    }

    #[test]
    fn test_bad_token_reports_line() {
        let input = "OFF\n2 0 0\n0.0 0.0 0.0\n1.0 oops 0.0\n";
        match parse_off(input) {
            Err(OffError::Syntax { line, expected }) => {
                assert_eq!(line, 4);
                assert_eq!(expected, "vertex coordinates");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_quad_face_rejected() {
        let input = "OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        assert!(matches!(
            parse_off(input),
            Err(OffError::UnsupportedFaceArity { face: 0, arity: 4 })
        ));
    }

    #[test]
    fn test_face_index_out_of_range() {
        let input = "OFF\n3 2 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n3 0 1 3\n";
        assert!(matches!(
            parse_off(input),
            Err(OffError::IndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3
            })
        ));
    }

    #[test]
    fn test_negative_index_is_a_syntax_error() {
        let input = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 -1 2\n";
        assert!(matches!(
            parse_off(input),
            Err(OffError::Syntax { line: 6, .. })
        ));
    }

    #[test]
    fn test_large_header_counts_do_not_preallocate() {
        let input = "OFF\n4000000000 0 0\n";
        assert!(matches!(
            parse_off(input),
            Err(OffError::UnexpectedEof { .. })
        ));
    }
}
