use thiserror::Error;

/// Top-level error type for the muralis kernel.
#[derive(Debug, Error)]
pub enum MuralisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length segment")]
    ZeroLengthSegment,
}

/// Errors related to the document model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("invalid parameter {parameter} = {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },
}

/// Convenience type alias for results using [`MuralisError`].
pub type Result<T> = std::result::Result<T, MuralisError>;
