use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the AeroNav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// An input table could not be located at the resolved path.
    #[error("{table} table not found at {path}")]
    TableNotFound { table: &'static str, path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the airline dataset")]
    ProjectDirsUnavailable,

    /// A row did not match the fixed field layout of its table.
    #[error("malformed {table} row at line {line}: {message}")]
    MalformedRow {
        table: &'static str,
        line: u64,
        message: String,
    },

    /// The travel query did not contain an origin and a destination.
    #[error("invalid travel query: {message}")]
    InvalidQuery { message: String },

    /// A path referenced an airport code that is absent from the catalog.
    #[error("unknown airport code: {code}")]
    UnknownCode { code: String },

    /// Raised when no route could be found between two places.
    #[error("no route found between {origin} and {destination}{reason}")]
    RouteNotFound {
        origin: String,
        destination: String,
        reason: NoRouteReason,
    },

    /// Raised when a computed route lacks any airports.
    #[error("route was empty")]
    EmptyRoute,

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Why a whole route request produced no route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoRouteReason {
    /// The origin city/country resolved to no airport codes.
    NoOriginAirports { suggestions: Vec<String> },
    /// The destination city/country resolved to no airport codes.
    NoDestinationAirports { suggestions: Vec<String> },
    /// Every candidate pair was searched and none produced a scorable path.
    AllCandidatesFailed { attempted: usize },
}

impl fmt::Display for NoRouteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoRouteReason::NoOriginAirports { suggestions } => {
                write!(
                    f,
                    ": no airports serve the origin{}",
                    format_suggestions(suggestions)
                )
            }
            NoRouteReason::NoDestinationAirports { suggestions } => {
                write!(
                    f,
                    ": no airports serve the destination{}",
                    format_suggestions(suggestions)
                )
            }
            NoRouteReason::AllCandidatesFailed { attempted } => {
                write!(f, " ({attempted} candidate pairs searched)")
            }
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
