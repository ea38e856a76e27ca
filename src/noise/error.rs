//! Parameter validation errors for noise synthesis.

use thiserror::Error;

/// Errors reported at the synthesis call boundary.
///
/// Most variants describe inputs rejected before any field is allocated;
/// `NonFiniteOutput` is raised when accepted parameters still overflow
/// during octave accumulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    #[error("Invalid field dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Field width {width} exceeds height {height}; rows are strided by height")]
    WidthExceedsStride { width: u32, height: u32 },
    #[error("Invalid noise period: {0} (must be positive)")]
    InvalidPeriod(u32),
    #[error("Invalid lacunarity: {0} (must be finite and positive)")]
    InvalidLacunarity(f32),
    #[error("Invalid octave count: {0} (must be at least 1)")]
    InvalidOctaves(u32),
    #[error("Parameter '{0}' must be finite")]
    NonFiniteParameter(&'static str),
    #[error("{variant} accumulation overflowed at cell ({i}, {j}); reduce octaves or offset")]
    NonFiniteOutput { variant: &'static str, i: u32, j: u32 },
    #[error("Buffer length {actual} does not match field size {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Checks that `width x height` describes a field this crate can index.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), NoiseError> {
    if width == 0 || height == 0 {
        return Err(NoiseError::InvalidDimensions { width, height });
    }
    if width > height {
        return Err(NoiseError::WidthExceedsStride { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(4, 4).is_ok());
        assert!(validate_dimensions(2, 8).is_ok());
        assert_eq!(
            validate_dimensions(0, 4),
            Err(NoiseError::InvalidDimensions { width: 0, height: 4 })
        );
        assert_eq!(
            validate_dimensions(8, 4),
            Err(NoiseError::WidthExceedsStride { width: 8, height: 4 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = NoiseError::InvalidLacunarity(-2.0);
        assert!(err.to_string().contains("-2"));
        let err = NoiseError::NonFiniteParameter("offset");
        assert_eq!(err.to_string(), "Parameter 'offset' must be finite");
    }
}
