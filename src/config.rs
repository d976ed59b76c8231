use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::query::QueryRequest;

/// Raw argument values, before any constraint checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dest_dir: Option<PathBuf>,
    pub batch_file: Option<PathBuf>,
    pub category: Option<String>,
}

impl RunArgs {
    fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.dest_dir.is_none()
            && self.batch_file.is_none()
            && self.category.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// One request, already validated.
    Single(QueryRequest),
    /// Requests read from a batch file when the run starts.
    Batch(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: RunMode,
    pub dest_dir: PathBuf,
}

impl RunConfig {
    /// Check argument combinations and build the run configuration.
    ///
    /// - at least one argument must be given;
    /// - a batch file may only be combined with a destination directory, and must exist;
    /// - start and end dates come together;
    /// - a single query needs a category and is fully validated here.
    pub fn from_args(args: RunArgs) -> Result<Self> {
        if args.is_empty() {
            return Err(Error::Usage("no arguments were selected".into()));
        }

        let dest_dir = args.dest_dir.unwrap_or_else(|| PathBuf::from("."));

        if let Some(path) = args.batch_file {
            if args.start_date.is_some() || args.end_date.is_some() || args.category.is_some() {
                return Err(Error::Usage(
                    "only the destination (-d/--dest-dir) argument is allowed with an input file (-f/--file)"
                        .into(),
                ));
            }
            if !path.is_file() {
                return Err(Error::Usage(format!("file does not exist: {}", path.display())));
            }
            return Ok(Self {
                mode: RunMode::Batch(path),
                dest_dir,
            });
        }

        if args.start_date.is_some() != args.end_date.is_some() {
            return Err(Error::IncompleteDateRange);
        }

        let Some(category) = args.category else {
            return Err(Error::Usage("a file type (-t/--type) is required".into()));
        };
        let request = QueryRequest::build(args.start_date.as_deref(), args.end_date.as_deref(), &category)?;

        Ok(Self {
            mode: RunMode::Single(request),
            dest_dir,
        })
    }
}
