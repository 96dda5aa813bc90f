/// Error types shared by the parser, the mesh model and the vector helpers
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading an OFF file
#[derive(Debug, Error)]
pub enum OffError {
    #[error("could not open {}: {source}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("first line is not the OFF header")]
    MalformedHeader,
    #[error("line {line}: expected {expected}")]
    Syntax { line: usize, expected: &'static str },
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("face {face} has {arity} vertices, only triangles are supported")]
    UnsupportedFaceArity { face: usize, arity: u32 },
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error(transparent)]
    Mesh(MeshError),
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    EmptyMesh,
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

impl From<MeshError> for OffError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            } => OffError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            },
            other => OffError::Mesh(other),
        }
    }
}

/// Axis selector outside of `x`, `y` and `z`
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid rotation axis {0:?}, expected 'x', 'y' or 'z'")]
pub struct InvalidAxis(pub char);
