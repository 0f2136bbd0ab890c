use std::path::PathBuf;

/// Error loading a sub-cube mesh from a Wavefront OBJ file
#[derive(thiserror::Error, Debug)]
pub enum ObjError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: cannot parse {content:?}")]
    Syntax { line: usize, content: String },
    #[error("line {line}: vertex index {index} does not refer to a known vertex")]
    IndexOutOfRange { line: usize, index: i64 },
    #[error("mesh has no faces")]
    Empty,
}
