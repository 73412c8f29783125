//! helpcrawl: crawl a help center and write section-aware text chunks.
//!
//! Fetches the index page, discovers article links, and writes every article
//! as `{title}_part_{n}.txt` files into the output directory.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use helpchunk::{CrawlConfig, FileSink, HttpFetcher, OversizePolicy, Pipeline};

// ── CLI ─────────────────────────────────────────────────────────────

/// Crawl a help center and write section-aware text chunks.
#[derive(Parser, Debug)]
#[command(name = "helpcrawl", version, about)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long, env = "HELPCRAWL_CONFIG")]
    config: Option<PathBuf>,

    /// Index page to crawl.
    #[arg(long, env = "HELPCRAWL_BASE_URL")]
    base_url: Option<String>,

    /// Directory chunk files are written to.
    #[arg(long, short, env = "HELPCRAWL_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum chunk length in characters.
    #[arg(long, env = "HELPCRAWL_MAX_LENGTH")]
    max_length: Option<usize>,

    /// Maximum number of documents processed at once.
    #[arg(long, env = "HELPCRAWL_WORKERS")]
    workers: Option<usize>,

    /// Split oversized sections on line boundaries instead of keeping them whole.
    #[arg(long)]
    split_oversized: bool,

    /// Process these article URLs instead of discovering links.
    #[arg(long = "url")]
    urls: Vec<String>,
}

impl Cli {
    fn into_config(self) -> helpchunk::Result<(CrawlConfig, Vec<String>)> {
        let mut config = match &self.config {
            Some(path) => {
                let config = CrawlConfig::from_json_file(path)?;
                info!(path = %path.display(), "loaded crawl config");
                config
            }
            None => CrawlConfig::default(),
        };

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(max_length) = self.max_length {
            config.max_chunk_length = max_length;
        }
        if let Some(workers) = self.workers {
            config.max_workers = workers;
        }
        if self.split_oversized {
            config.oversize_policy = OversizePolicy::SplitOnLines;
        }

        config.validate()?;
        Ok((config, self.urls))
    }
}

// ── main ────────────────────────────────────────────────────────────

fn run(cli: Cli) -> helpchunk::Result<()> {
    let (config, urls) = cli.into_config()?;

    let fetcher = HttpFetcher::new(&config.fetch_config())?;
    let sink = FileSink::new(&config.output_dir)?;
    info!(output_dir = %sink.dir().display(), "writing chunks");

    let pipeline = Pipeline::new(&config, fetcher, sink)?;
    let summary = if urls.is_empty() {
        pipeline.crawl()?
    } else {
        pipeline.run(urls)?
    };

    info!(
        documents = summary.documents,
        chunks = summary.chunks_written,
        skipped = summary.skipped(),
        "crawl finished"
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!(error = %err, "crawl failed");
        std::process::exit(1);
    }
}
