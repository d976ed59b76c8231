use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::batch::read_batch_file;
use crate::client::{CatalogOutcome, CategoryInfo, Client, Transport};
use crate::config::{RunConfig, RunMode};
use crate::download::{Ledger, download};
use crate::error::{Error, Result};
use crate::query::QueryRequest;

/// Summary of a whole run.
#[derive(Debug)]
pub struct RunReport {
    pub ledger: Ledger,
    /// Category listings fetched during the run, in request order.
    pub listings: Vec<Vec<CategoryInfo>>,
    pub queries: usize,
    /// Per-query and per-file failures, in the order they happened.
    pub errors: Vec<Error>,
    pub elapsed: Duration,
}

/// Drives requests through the catalog and the download pipeline, one at a time.
pub struct Runner<T> {
    client: Client<T>,
    ledger: Ledger,
    listings: Vec<Vec<CategoryInfo>>,
    errors: Vec<Error>,
    queries: usize,
}

impl<T: Transport> Runner<T> {
    pub fn new(client: Client<T>) -> Self {
        Self {
            client,
            ledger: Ledger::new(),
            listings: Vec::new(),
            errors: Vec::new(),
            queries: 0,
        }
    }

    /// Execute the configured run.
    ///
    /// A batch file is read and validated completely before the first
    /// network call. Once execution starts, catalog and file failures are
    /// logged and the run continues; only an unusable destination aborts it.
    pub fn run(mut self, config: &RunConfig) -> Result<RunReport> {
        let started = Instant::now();

        match &config.mode {
            RunMode::Single(request) => self.execute(request, &config.dest_dir)?,
            RunMode::Batch(path) => {
                let requests = read_batch_file(path)?;
                info!("read {} queries from {}", requests.len(), path.display());
                for request in &requests {
                    self.execute(request, &config.dest_dir)?;
                }
            }
        }

        let elapsed = started.elapsed();
        info!(
            "run finished in {:.2} seconds: {} queries, {} files downloaded, {} errors",
            elapsed.as_secs_f64(),
            self.queries,
            self.ledger.len(),
            self.errors.len()
        );

        Ok(RunReport {
            ledger: self.ledger,
            listings: self.listings,
            queries: self.queries,
            errors: self.errors,
            elapsed,
        })
    }

    fn execute(&mut self, request: &QueryRequest, dest_dir: &Path) -> Result<()> {
        self.queries += 1;

        let outcome = match self.client.execute(request) {
            Ok(outcome) => outcome,
            Err(e) if !e.is_fatal() => {
                warn!("query for {} skipped: {e}", request.category());
                self.errors.push(e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match outcome {
            CatalogOutcome::Categories(infos) => {
                self.listings.push(infos);
            }
            CatalogOutcome::Files { url, files } => {
                if files.is_empty() {
                    info!("no results found for request: {url}");
                }
                let report = download(&self.client, &files, dest_dir)?;
                self.ledger.append(report.ledger);
                self.errors.extend(report.failed);
            }
        }
        Ok(())
    }
}
