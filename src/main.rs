//! LeetCode Sync: mirror accepted submissions into a `solutions/` directory
//!
//! Reads the signed-in user's submission index from leetcode.com, fetches the
//! code of every accepted submission and writes it to
//! `solutions/{title_slug}.{ext}`. A later accepted submission for the same
//! problem overwrites the earlier file.
//!
//! ## Usage
//! 1. Configure the application using either a `.env` file or command-line arguments:
//!    ```env
//!    LEETCODE_SESSION=<value of the LEETCODE_SESSION cookie>
//!    LEETCODE_USERNAME=<your username>
//!    ```
//! 2. Run the application:
//!    ```sh
//!    cargo run -- --solutions-dir solutions
//!    ```
//! 3. Logs are controlled by the `RUST_LOG` environment variable (default `info`).
//!
//! ## Exit status
//! - `0`: the run completed (individual submissions may have been skipped).
//! - `1`: an index page could not be fetched.
//! - `2`: missing or invalid configuration; nothing was requested.
//! - `3`: any other startup failure.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use dotenvy::dotenv;
use leetcode_sync::config::{self, SourceKind, SyncConfig};
use leetcode_sync::error::SyncError;
use leetcode_sync::fetch::LeetCodeSource;
use leetcode_sync::sync::Synchronizer;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Command-line arguments for configuring a sync run.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
  /// Value of the LEETCODE_SESSION cookie of a signed-in browser session.
  #[clap(long, env = "LEETCODE_SESSION", hide_env_values = true, default_value = "")]
  session: String,

  /// LeetCode username whose submissions are listed (graphql source).
  #[clap(long, env = "LEETCODE_USERNAME", default_value = "")]
  username: String,

  /// Value of the csrftoken cookie, sent when the site requires it.
  #[clap(long, env = "LEETCODE_CSRF_TOKEN", hide_env_values = true)]
  csrf_token: Option<String>,

  /// Site root of the judge.
  #[clap(long, env = "LEETCODE_ENDPOINT", default_value = config::DEFAULT_ENDPOINT)]
  endpoint: String,

  /// Directory the solution files are written to.
  #[clap(long, env = "SOLUTIONS_DIR", default_value = config::DEFAULT_SOLUTIONS_DIR)]
  solutions_dir: PathBuf,

  /// Submissions requested per index page.
  #[clap(long, env = "PAGE_SIZE", default_value_t = config::DEFAULT_PAGE_SIZE)]
  page_size: u32,

  /// Timeout in seconds for each HTTP request.
  #[clap(long, env = "TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
  timeout_secs: u64,

  /// Stop after this many index pages.
  #[clap(long, env = "MAX_PAGES")]
  max_pages: Option<usize>,

  /// Which submission listing to read.
  #[clap(long, env = "SOURCE", value_enum, default_value_t = SourceKind::Graphql)]
  source: SourceKind,
}

impl Args {
  fn into_config(self) -> SyncConfig {
    let mut config = SyncConfig::new(self.session, self.username);
    config.csrf_token = self.csrf_token.filter(|t| !t.trim().is_empty());
    config.endpoint = self.endpoint;
    config.solutions_dir = self.solutions_dir;
    config.page_size = self.page_size;
    config.timeout = Duration::from_secs(self.timeout_secs);
    config.max_pages = self.max_pages;
    config.source = self.source;
    config
  }
}

/// Maps a fatal error onto the process exit status.
fn exit_code(err: &anyhow::Error) -> ExitCode {
  match err.downcast_ref::<SyncError>() {
    Some(SyncError::Index { .. }) => ExitCode::from(1),
    Some(SyncError::Config { .. }) => ExitCode::from(2),
    _ => ExitCode::from(3),
  }
}

async fn run(config: SyncConfig) -> AnyhowResult<()> {
  let source = LeetCodeSource::new(&config).context("Failed to set up LeetCode client")?;
  info!(
    "Syncing {:?} submissions from {} into {}",
    config.source,
    config.endpoint,
    config.solutions_dir.display()
  );

  let report = Synchronizer::new(&source, &config)
    .run()
    .await
    .context("Sync aborted")?;
  info!(
    "Done: {} file(s) written, {} unchanged, {} skipped",
    report.written(),
    report.unchanged,
    report.skipped()
  );
  Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
  // Load environment variables from .env file (if present)
  dotenv().ok();

  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let config = Args::parse().into_config();
  match run(config).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{:#}", err);
      exit_code(&err)
    }
  }
}
