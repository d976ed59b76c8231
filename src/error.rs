use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date {0:?}: dates have to follow the format YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("start date and end date must be given together")]
    IncompleteDateRange,

    #[error("start date {start} cannot be after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("unknown file category: {0}")]
    UnknownCategory(String),

    #[error("error in batch file format in line {line}: {source}")]
    BatchFormat {
        line: u64,
        #[source]
        source: Box<Error>,
    },

    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("download of {url} failed: {reason}")]
    FileDownloadFailed { url: String, reason: String },

    #[error("cannot write to destination {}: {source}", .path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Errors that abort the whole run. Everything else is reported and the
    /// run moves on to the next file or query.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::CatalogUnavailable(_) | Error::FileDownloadFailed { .. }
        )
    }

    /// Argument and input-file problems, reported with usage-style exit status.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::InvalidDateFormat(_)
                | Error::IncompleteDateRange
                | Error::InvalidDateRange { .. }
                | Error::UnknownCategory(_)
                | Error::BatchFormat { .. }
                | Error::Usage(_)
        )
    }
}
