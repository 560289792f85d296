/// Error types for the lago library
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for lake observation operations
#[derive(Error, Debug)]
pub enum LagoError {
    /// Date string did not parse as YYYY-MM-DD
    #[error("Invalid date format (expected YYYY-MM-DD): {0}")]
    InvalidDateFormat(String),

    /// Start bound is after the end bound
    #[error("Start date {start} is after end date {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    /// Image variant outside the known set
    #[error("Invalid image variant: {0} (expected raw or border)")]
    InvalidVariant(String),

    /// No observations matched the request
    #[error("No observations found")]
    NoObservations,

    /// No observation in the series carries a polygon
    #[error("No polygon data available")]
    NoPolygonData,

    /// Polygons were present but produced no coordinates
    #[error("Aggregation produced no coordinates")]
    EmptyAggregate,

    /// Stored polygon payload failed to parse
    #[error("Malformed polygon payload: {0}")]
    PolygonParse(String),

    /// Asset store read failed
    #[error("Asset store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Observation store failed
    #[error("Observation store failure: {0}")]
    Store(String),
}

impl LagoError {
    /// True for caller-correctable input errors. These are surfaced
    /// immediately and never retried.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LagoError::InvalidDateFormat(_)
                | LagoError::EmptyRange { .. }
                | LagoError::InvalidVariant(_)
        )
    }

    /// True when the request was well-formed but there is nothing to show.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LagoError::NoObservations | LagoError::NoPolygonData | LagoError::EmptyAggregate
        )
    }

    /// HTTP-style status for callers that report errors numerically:
    /// 400 for validation, 404 for not-found, 500 for infrastructure.
    pub fn status_code(&self) -> u16 {
        if self.is_validation() {
            400
        } else if self.is_not_found() {
            404
        } else {
            500
        }
    }
}

/// Type alias for Results using LagoError
pub type Result<T> = std::result::Result<T, LagoError>;
