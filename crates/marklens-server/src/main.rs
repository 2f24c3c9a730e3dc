//! MarkLens server binary.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use marklens_linkcheck::{CheckerConfig, LinkChecker};
use marklens_server::{AppState, router};
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Batch bookmark annotation service.
#[derive(Debug, Parser)]
#[command(name = "marklens", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "MARKLENS_BIND", default_value = "127.0.0.1:7070")]
    bind: String,

    /// Outlier detector wall-clock budget, in seconds.
    #[arg(long, env = "MARKLENS_TIME_BUDGET_SECS", default_value_t = 10)]
    time_budget_secs: u64,

    /// Maximum in-flight link probes per request.
    #[arg(long, env = "MARKLENS_MAX_CONCURRENCY", default_value_t = 24)]
    max_concurrency: usize,

    /// Per-probe timeout, in seconds.
    #[arg(long, env = "MARKLENS_PROBE_TIMEOUT_SECS", default_value_t = 3)]
    probe_timeout_secs: u64,

    /// Redirect hops followed before reporting the redirect status as final.
    #[arg(long, env = "MARKLENS_MAX_REDIRECTS", default_value_t = 3)]
    max_redirects: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .try_init();

    let args = Args::parse();

    let checker = LinkChecker::new(CheckerConfig {
        max_concurrency: args.max_concurrency,
        timeout: Duration::from_secs(args.probe_timeout_secs),
        max_redirects: args.max_redirects,
    })?;
    let state = AppState {
        checker: Arc::new(checker),
        time_budget: Duration::from_secs(args.time_budget_secs),
    };

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!(bind = %args.bind, "marklens v{} listening", env!("CARGO_PKG_VERSION"));
    axum::serve(listener, router(state)).await?;
    Ok(())
}
