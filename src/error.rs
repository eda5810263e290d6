//! Error types for the grid decoding pipeline

use thiserror::Error;

/// Boxed cause preserved on errors that wrap an underlying failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a message grid
///
/// Every variant is terminal for the current invocation: the orchestrator
/// never emits partial output after a failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Network or I/O failure reaching the source
    #[error("failed to fetch {resource}{}", status_suffix(.status))]
    Fetch {
        /// URL or path that was being fetched
        resource: String,
        /// HTTP status code, when the failure was an HTTP response
        status: Option<u16>,
        /// Underlying transport or I/O error, when one exists
        #[source]
        cause: Option<BoxError>,
    },

    /// Source markup could not be structurally parsed into rows
    #[error("failed to parse source markup: {0}")]
    Parse(String),

    /// A table row had insufficient or non-numeric coordinate data.
    /// Row-text dialect only; the plain-text dialect skips bad lines instead.
    #[error("row has insufficient coordinate data: {row:?}")]
    Validation {
        /// Text content of the offending row
        row: String,
    },

    /// Zero usable records after parsing (plain-text dialect)
    #[error("no coordinate records found in source")]
    NoData,

    /// Computed grid dimensions are unusable
    #[error("invalid grid dimensions: {width}x{height}")]
    Dimension { width: u64, height: u64 },

    /// Failed to write rendered rows to the output sink
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_includes_status() {
        let err = Error::Fetch {
            resource: "http://example.com/doc".into(),
            status: Some(503),
            cause: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("http://example.com/doc"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn validation_error_names_row() {
        let err = Error::Validation {
            row: "only 7 here".into(),
        };
        assert!(err.to_string().contains("only 7 here"));
    }

    #[test]
    fn fetch_error_preserves_cause() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::Fetch {
            resource: "message.txt".into(),
            status: None,
            cause: Some(Box::new(io)),
        };
        assert!(err.source().is_some());
    }
}
