/// Error types for mesh loading.
use std::path::PathBuf;
use thiserror::Error;

/// Result type for OBJ parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for mesh loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors produced while parsing OBJ text.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A `v` record without three numeric coordinates.
    #[error("invalid vertex at line {line_number}: {line}")]
    InvalidVertex { line_number: usize, line: String },

    /// An `f` record with fewer than three vertex references.
    #[error("invalid polygon (less than 3 vertices, got {count}) at line {line_number}: {line}")]
    DegeneratePolygon {
        line_number: usize,
        line: String,
        count: usize,
    },

    /// An `f` record with a reference that is not a positive integer.
    #[error("invalid face index `{token}` at line {line_number}: {line}")]
    InvalidFaceIndex {
        line_number: usize,
        line: String,
        token: String,
    },

    /// A face reference past the end of the vertex list.
    #[error("face index {index} at line {line_number} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        line_number: usize,
        /// The 1-based index as written in the file.
        index: usize,
        vertex_count: usize,
    },
}

impl ParseError {
    /// Line the error was reported on
    pub fn line_number(&self) -> usize {
        match self {
            Self::InvalidVertex { line_number, .. }
            | Self::DegeneratePolygon { line_number, .. }
            | Self::InvalidFaceIndex { line_number, .. }
            | Self::IndexOutOfRange { line_number, .. } => *line_number,
        }
    }
}

/// Errors produced while loading a mesh.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("cannot open file: {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but its contents could not be read as text.
    #[error("cannot read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not a valid mesh.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
