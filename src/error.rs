//! Error types for hex coverage generation

use thiserror::Error;

/// Boxed error produced by an external collaborator (projection or feature I/O)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during tessellation, selection or a pipeline run
#[derive(Debug, Error)]
pub enum HexCoverageError {
    /// Configuration validation failed (bad radius, degenerate bounds, bad builder value)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tessellation produced no hexagons, so there is nothing to index
    #[error("tessellation produced no cells")]
    EmptyTessellation,

    /// The reprojection collaborator failed; its error is passed through as-is
    #[error(transparent)]
    Reprojection(BoxError),

    /// The feature writer failed; its error is passed through as-is
    #[error(transparent)]
    Write(BoxError),
}

/// Result type alias for hex coverage operations
pub type Result<T> = std::result::Result<T, HexCoverageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = HexCoverageError::InvalidConfig("radius must be positive (got 0)".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: radius must be positive (got 0)"
        );
        assert_eq!(
            HexCoverageError::EmptyTessellation.to_string(),
            "tessellation produced no cells"
        );
    }

    #[test]
    fn test_collaborator_errors_are_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let err = HexCoverageError::Write(Box::new(io));
        assert_eq!(err.to_string(), "read-only volume");
    }
}
