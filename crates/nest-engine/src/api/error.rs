use thiserror::Error;

/// Errors raised by the field and the per-frame pipeline.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The drawing surface has a zero, negative or non-finite dimension.
    /// Fatal to `initialize`/`start`; never retried.
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },
    /// A particle position left the finite number range during a tick.
    #[error("particle {index} diverged to a non-finite position")]
    Diverged { index: usize },
    /// A render surface call failed mid-frame.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl FieldError {
    /// Check a surface size, returning `InvalidSurface` when unusable.
    pub fn check_surface(width: f32, height: f32) -> Result<(), FieldError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(FieldError::InvalidSurface { width, height })
        }
    }
}

/// Failure reported by a render surface backend.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The backing context is gone (canvas detached, GPU device lost, ...).
    #[error("render surface lost: {0}")]
    Lost(String),
    /// The surface refused a command (e.g. a full command buffer).
    #[error("render surface rejected command: {0}")]
    Rejected(String),
}

/// Failure fetching idea records. Recovered locally: the field degrades
/// to an empty one and the loading indicator stays up.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed idea records: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Invalid field configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_surface_rejects_degenerate_sizes() {
        assert!(FieldError::check_surface(800.0, 600.0).is_ok());
        assert!(FieldError::check_surface(0.0, 600.0).is_err());
        assert!(FieldError::check_surface(800.0, -1.0).is_err());
        assert!(FieldError::check_surface(f32::NAN, 600.0).is_err());
    }

    #[test]
    fn surface_error_converts_into_field_error() {
        let err: FieldError = SurfaceError::Lost("context".into()).into();
        assert!(matches!(err, FieldError::Surface(_)));
        assert_eq!(err.to_string(), "render surface lost: context");
    }
}
