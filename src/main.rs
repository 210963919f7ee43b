//! Mini Cache - An embeddable in-memory LRU cache
//!
//! Interactive console over stdin/stdout for trying the cache out.

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::cache::EvictCallback;
use mini_cache::console::run_session;
use mini_cache::{Config, SharedCache};

/// Main entry point for the Mini Cache console.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load and validate configuration from environment variables
/// 3. Create the shared cache with an eviction logger
/// 4. Serve commands from stdin until EOF, QUIT or Ctrl+C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Mini Cache console");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_bytes={}, eviction_threshold={}",
        config.max_bytes, config.eviction_threshold
    );

    let on_evict: EvictCallback<String> = Box::new(|key, value| {
        debug!(key = %key, bytes = value.len(), "entry left the cache");
    });
    let cache = SharedCache::from_config(&config, Some(on_evict))
        .context("failed to build cache from configuration")?;
    info!("Cache initialized");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = run_session(&cache, stdin, stdout) => {
            result.context("console session failed")?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    let stats = cache.stats().await;
    info!(
        "Shutdown complete: entries={}, used_bytes={}, evictions={}",
        stats.entries, stats.used_bytes, stats.evictions
    );
    Ok(())
}
