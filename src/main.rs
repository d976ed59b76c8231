use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use admie_opendata::{Client, ClientOptions, INFO_URL, QUERY_URL, RunArgs, RunConfig, Runner};

/// Download files from the ADMIE open-data API.
#[derive(Debug, Parser)]
#[command(name = "admie-dl", version, about)]
struct Cli {
    /// Start date of the query, format YYYY-MM-DD
    #[arg(short = 's', long = "start-date")]
    start_date: Option<String>,

    /// End date of the query, format YYYY-MM-DD
    #[arg(short = 'e', long = "end-date")]
    end_date: Option<String>,

    /// Directory to save the data in (created if missing)
    #[arg(short = 'd', long = "dest-dir")]
    dest_dir: Option<PathBuf>,

    /// Input file for batch queries, one `startDate,endDate,filetype` per line
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// File type to query, or `info` to list the available types
    #[arg(short = 't', long = "type")]
    file_type: Option<String>,

    /// Catalog query endpoint
    #[arg(long, default_value = QUERY_URL)]
    query_url: String,

    /// Category metadata endpoint
    #[arg(long, default_value = INFO_URL)]
    info_url: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let args = RunArgs {
        start_date: cli.start_date,
        end_date: cli.end_date,
        dest_dir: cli.dest_dir,
        batch_file: cli.file,
        category: cli.file_type,
    };

    let config = match RunConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}\n\nFor more information, try '--help'.");
            return ExitCode::from(2);
        }
    };

    let opts = ClientOptions {
        query_url: cli.query_url,
        info_url: cli.info_url,
        ..ClientOptions::default()
    };
    let result = Client::new(opts).and_then(|client| Runner::new(client).run(&config));

    match result {
        Ok(report) => {
            for listing in &report.listings {
                println!("Available file types:");
                for info in listing {
                    println!("{info}\n");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_usage() => {
            eprintln!("error: {e}\n\nFor more information, try '--help'.");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
