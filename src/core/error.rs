//! Error types for the GELF exporter

pub type Result<T> = std::result::Result<T, GelfError>;

#[derive(Debug, thiserror::Error)]
pub enum GelfError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Transport-level delivery failure
    #[error("Transport error ({transport}): {message}")]
    TransportError {
        transport: &'static str,
        message: String,
    },

    /// Collector answered an HTTP request with a non-success status
    #[error("HTTP delivery failed with status {status}")]
    HttpStatus { status: u16 },

    /// Encoded event needs more chunks than the collector will reassemble
    #[error("Encoded event requires {required} chunks, the maximum is {max}")]
    TooManyChunks { required: usize, max: usize },
}

impl GelfError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        GelfError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(transport: &'static str, message: impl Into<String>) -> Self {
        GelfError::TransportError {
            transport,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = GelfError::config("transport", "unknown kind 'ftp'");
        assert!(matches!(err, GelfError::InvalidConfiguration { .. }));

        let err = GelfError::transport("tcp", "connection reset");
        assert!(matches!(err, GelfError::TransportError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = GelfError::config("tls", "cannot read CA file '/tmp/ca.pem'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for tls: cannot read CA file '/tmp/ca.pem'"
        );

        let err = GelfError::HttpStatus { status: 503 };
        assert_eq!(err.to_string(), "HTTP delivery failed with status 503");

        let err = GelfError::TooManyChunks {
            required: 200,
            max: 128,
        };
        assert_eq!(
            err.to_string(),
            "Encoded event requires 200 chunks, the maximum is 128"
        );
    }
}
