use std::path::PathBuf;
use thiserror::Error;

/// None of these reach the user verbatim; every failure becomes one generic alert.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not build the conversion request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Conversion request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Conversion service answered HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to read the converted document: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Could not start the transfer runtime: {0}")]
    Runtime(#[source] std::io::Error),

    // Worker thread went away without a result.
    #[error("Transfer worker stopped before reporting a result")]
    Interrupted,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Save target '{path}' has no parent directory")]
    NoParent { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid service address '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("Service address '{value}' must use http or https")]
    UnsupportedScheme { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_carries_code() {
        let e = TransferError::Status { status: 502 };
        assert!(e.to_string().contains("502"), "got: {e}");
    }

    #[test]
    fn read_error_keeps_source() {
        let e = TransferError::Read {
            path: PathBuf::from("/tmp/book.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(e.to_string().contains("book.pdf"));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn config_error_names_value() {
        let e = ConfigError::UnsupportedScheme {
            value: "ftp://example.com".into(),
        };
        assert!(e.to_string().contains("ftp://example.com"));
    }
}
