/// Error types for the geometry core
use thiserror::Error;

/// Misuse of a `VectorN`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Component index outside `[0, len)`.
    #[error("index {index} out of range for vector of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Normalizing a zero-length vector.
    #[error("cannot normalize a zero-length vector")]
    DivideByZero,

    /// Source or destination buffer cannot hold the vector.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Failure to load a raw mesh file.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Header declares more vertices than the loader is configured to allocate.
    #[error("mesh declares {declared} vertices, limit is {limit}")]
    TooManyVertices { declared: u32, limit: u32 },
}

pub type MeshResult<T> = Result<T, MeshError>;
