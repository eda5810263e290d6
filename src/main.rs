use std::error::Error as _;
use std::io;
use std::process;

use clap::{Parser, ValueEnum};

use gridmsg::fetch::FileFetcher;
use gridmsg::pipeline::WriteSink;
use gridmsg::{FetchConfig, Pipeline, Result, SourceFormat};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Plain-text document export
    Doc,
    /// HTML page containing a coordinate table
    Table,
}

impl From<Format> for SourceFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Doc => SourceFormat::Document,
            Format::Table => SourceFormat::Table,
        }
    }
}

/// Decode a coordinate-encoded message and print the character grid.
#[derive(Parser, Debug)]
#[command(name = "gridmsg", version, about)]
struct Cli {
    /// URL or local file path of the encoded message
    source: String,

    /// Input format
    #[arg(long, value_enum, default_value = "table")]
    format: Format,

    /// Retries after the initial request, for transient HTTP failures
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,
}

fn run(cli: &Cli) -> Result<()> {
    let format = SourceFormat::from(cli.format);
    let mut sink = WriteSink::new(io::stdout().lock());

    if cli.source.starts_with("http://") || cli.source.starts_with("https://") {
        #[cfg(feature = "net")]
        {
            let config = FetchConfig {
                max_retries: cli.retries,
                timeout_ms: cli.timeout_ms,
                ..Default::default()
            };
            let fetcher = gridmsg::fetch::HttpFetcher::new(config)?;
            return Pipeline::new(fetcher, format).run(&cli.source, &mut sink);
        }

        #[cfg(not(feature = "net"))]
        {
            return Err(gridmsg::Error::Fetch {
                resource: cli.source.clone(),
                status: None,
                cause: Some("built without the `net` feature".into()),
            });
        }
    }

    Pipeline::new(FileFetcher::new(), format).run(&cli.source, &mut sink)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        let mut cause = err.source();
        while let Some(inner) = cause {
            eprintln!("  caused by: {inner}");
            cause = inner.source();
        }
        process::exit(2);
    }
}
