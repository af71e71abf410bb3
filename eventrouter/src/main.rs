//! Route newline delimited JSON envelopes read from stdin to the print sink.
use anyhow::Context;
use envconfig::Envconfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use eventrouter::cache::StaticCache;
use eventrouter::config::Config;
use eventrouter::envelope::Envelope;
use eventrouter::prometheus::{serve, setup_metrics_recorder, setup_metrics_router};
use eventrouter::router::EventRouter;
use eventrouter::sinks::print::PrintSink;

async fn consume(router: &EventRouter) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let envelope: Envelope = match serde_json::from_str(&line) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("skipping undecodable envelope: {}", e);
                continue;
            }
        };

        // Delivery failures are already reported to the sink, keep consuming.
        if let Err(e) = router.route(&envelope).await {
            tracing::error!("failed to route envelope: {}", e);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::init_from_env().context("invalid configuration")?;

    let log_layer = tracing_subscriber::fmt::layer().with_filter(
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.log_level).into())
            .from_env_lossy(),
    );
    tracing_subscriber::registry().with(log_layer).init();

    let cache = match &config.app_metadata_path {
        Some(path) => StaticCache::from_file(path).context("failed to load app metadata")?,
        None => StaticCache::default(),
    };

    let router = EventRouter::new(cache, PrintSink {}, &config.router())
        .context("invalid router configuration")?;

    if config.export_prometheus {
        let recorder_handle = setup_metrics_recorder()?;
        let bind = config.bind.to_string();
        tokio::task::spawn(async move {
            if let Err(e) = serve(setup_metrics_router(recorder_handle), &bind).await {
                tracing::error!("failed to serve metrics: {}", e);
            }
        });
    }

    tracing::info!(selected_events = %config.selected_events, "routing envelopes from stdin");

    tokio::select! {
        result = consume(&router) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted, shutting down"),
    }

    Ok(())
}
