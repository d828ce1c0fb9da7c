//! Error type shared by the library and the binaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimbiError {
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Root finding did not converge after {iterations} iterations: {message}")]
    NoConvergence { iterations: usize, message: String },

    #[error("Shape mismatch: {0}")]
    Shape(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimbiResult<T> = Result<T, SimbiError>;

/// Checks that `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> SimbiResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimbiError::InvalidParameter {
            name,
            message: format!("expected a positive finite value, got {value:e}"),
        })
    }
}

/// Checks that `value` is finite and not negative.
pub fn ensure_non_negative(name: &'static str, value: f64) -> SimbiResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimbiError::InvalidParameter {
            name,
            message: format!("expected a non-negative finite value, got {value:e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("mass", 1.0).is_ok());
        assert!(ensure_positive("mass", 0.0).is_err());
        assert!(ensure_positive("mass", f64::NAN).is_err());
        assert!(ensure_non_negative("time_of_flight", 0.0).is_ok());
        assert!(ensure_non_negative("time_of_flight", -1e-3).is_err());
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = ensure_positive("temperature", -1.0).unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }
}
