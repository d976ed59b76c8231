use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, warn};
use url::Url;

use crate::client::{Client, FileDescriptor, Transport};
use crate::error::{Error, Result};

/// One successfully saved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    /// Filename prefix before the first underscore. A label taken from the
    /// remote naming scheme, not a parsed date.
    pub date: String,
    pub filepath: PathBuf,
    pub description: String,
}

/// Append-only record of saved files, in download order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<DownloadRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DownloadRecord) {
        self.records.push(record);
    }

    pub fn append(&mut self, other: Ledger) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DownloadRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &DownloadRecord> {
        self.records.iter()
    }
}

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct DownloadReport {
    pub ledger: Ledger,
    pub failed: Vec<Error>,
    pub elapsed: Duration,
}

/// Final path segment of the remote URL, percent-decoded.
///
/// `None` when the decoded name is empty, `.`/`..`, or contains a path separator.
pub fn file_name_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    let name = urlencoding::decode(segment).ok()?;
    let unusable = name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']);
    (!unusable).then(|| name.into_owned())
}

/// Everything before the first underscore, or the whole name if there is none.
pub fn date_label(file_name: &str) -> &str {
    file_name.split('_').next().unwrap_or(file_name)
}

/// Create the destination directory if needed. Failure here is fatal.
pub fn prepare_destination(dest_dir: &Path) -> Result<()> {
    fs::create_dir_all(dest_dir).map_err(|source| Error::DestinationUnwritable {
        path: dest_dir.to_path_buf(),
        source,
    })
}

/// Download every descriptor into `dest_dir`, sequentially and in order.
///
/// A failing file is logged and skipped; only an unusable destination
/// directory aborts the call.
pub fn download<T: Transport>(
    client: &Client<T>,
    files: &[FileDescriptor],
    dest_dir: &Path,
) -> Result<DownloadReport> {
    let started = Instant::now();
    prepare_destination(dest_dir)?;

    let mut ledger = Ledger::new();
    let mut failed = Vec::new();

    if !files.is_empty() {
        info!("starting download of {} files into {}", files.len(), dest_dir.display());
    }

    for (i, fd) in files.iter().enumerate() {
        match download_one(client, fd, dest_dir, i + 1, files.len()) {
            Ok(record) => ledger.push(record),
            Err(e) => {
                warn!("error in request: {e}");
                failed.push(e);
            }
        }
    }

    let elapsed = started.elapsed();
    info!(
        "finished in {:.2} seconds, {} files saved",
        elapsed.as_secs_f64(),
        ledger.len()
    );

    Ok(DownloadReport {
        ledger,
        failed,
        elapsed,
    })
}

fn download_one<T: Transport>(
    client: &Client<T>,
    fd: &FileDescriptor,
    dest_dir: &Path,
    index: usize,
    total: usize,
) -> Result<DownloadRecord> {
    let failed = |reason: String| Error::FileDownloadFailed {
        url: fd.url.clone(),
        reason,
    };

    let url = Url::parse(&fd.url).map_err(|e| failed(e.to_string()))?;
    let file_name = file_name_from_url(&url).ok_or_else(|| failed("url has no usable file name".to_string()))?;
    info!("[{index}/{total}] downloading file: {file_name}");

    let body = client.fetch(&url).map_err(|e| failed(e.to_string()))?;
    let filepath = dest_dir.join(&file_name);
    fs::write(&filepath, &body).map_err(|e| failed(format!("{}: {e}", filepath.display())))?;

    Ok(DownloadRecord {
        date: date_label(&file_name).to_string(),
        filepath,
        description: fd.description.clone(),
    })
}
