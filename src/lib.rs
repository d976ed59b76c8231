#![forbid(unsafe_code)]

//! Client for the ADMIE (IPTO) open-data file API.
//!
//! A query names a date range and a file category; the catalog answers with a
//! list of downloadable files, which are then fetched one by one into a local
//! directory. Many queries can be run from a batch file.
//!
//! **Quick start**
//! ```no_run
//! use admie_opendata::{Client, ClientOptions, QueryRequest, download};
//! use admie_opendata::CatalogOutcome;
//!
//! let client = Client::new(ClientOptions::default())?;
//! let request = QueryRequest::build(Some("2023-01-01"), Some("2023-01-02"), "DayAheadLoadForecast")?;
//! if let CatalogOutcome::Files { files, .. } = client.execute(&request)? {
//!     let report = download(&client, &files, "data".as_ref())?;
//!     for record in report.ledger.iter() {
//!         println!("{} {}", record.date, record.filepath.display());
//!     }
//! }
//! # Ok::<(), admie_opendata::Error>(())
//! ```
//!
//! Validation is strict and happens before any network call; execution is
//! lenient: a failed query or file is reported and the run moves on.

mod batch;
mod categories;
mod client;
mod config;
mod date;
mod download;
mod error;
mod query;
mod run;

pub use crate::batch::{BatchRow, read_batch, read_batch_file};
pub use crate::categories::{CATEGORIES, INFO, INFO_URL, QUERY_URL, is_known_category};
pub use crate::client::{
    CatalogOutcome, CategoryInfo, Client, ClientOptions, FileDescriptor, HttpTransport, LocaleInfo, Transport,
};
pub use crate::config::{RunArgs, RunConfig, RunMode};
pub use crate::date::{parse_date, parse_range, validate_range};
pub use crate::download::{DownloadRecord, DownloadReport, Ledger, download};
pub use crate::error::{Error, Result};
pub use crate::query::{QueryRequest, QuerySpec};
pub use crate::run::{RunReport, Runner};
