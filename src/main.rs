use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use latency_sampler::{load_generator, server, AppState, Sampler, SamplerConfig, Timeline};

#[derive(Debug, Parser)]
#[command(name = "latency-sampler", about = "Rolling latency sampling and summaries")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Ring capacity: how many recent durations are retained
    #[arg(long, default_value_t = 50, global = true)]
    size: usize,

    /// Histogram bins per summary
    #[arg(long, default_value_t = 10, global = true)]
    bins: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Time random sleeps and print the JSON, text and histogram output
    Simple {
        #[arg(long, default_value_t = 100)]
        events: usize,
        #[arg(long, default_value_t = 30)]
        max_delay_ms: u64,
    },
    /// Run several iterations and write one HTML page of their histograms
    Graph {
        #[arg(long, default_value_t = 3)]
        iterations: usize,
        #[arg(long, default_value_t = 100)]
        events: usize,
        #[arg(long, default_value_t = 30)]
        max_delay_ms: u64,
        /// Directory the page is written to
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Serve the sampler over HTTP
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,
    },
}

fn init_tracing(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = SamplerConfig::new(cli.size, cli.bins);
    let sampler = Sampler::with_config(&config).context("invalid sampler configuration")?;

    match cli.command {
        Command::Simple {
            events,
            max_delay_ms,
        } => {
            let summary = tokio::task::spawn_blocking(move || {
                load_generator::run_blocking(&sampler, events, max_delay_ms, rand::random());
                sampler.calc()
            })
            .await?;

            println!("{}\n", summary.to_json()?);
            println!("{summary}\n");
            if let Some(histogram) = &summary.histogram {
                println!("{}", histogram.render(25));
            }
        }
        Command::Graph {
            iterations,
            events,
            max_delay_ms,
            out,
        } => {
            let timeline = tokio::task::spawn_blocking(move || {
                let mut timeline = Timeline::new();
                for iteration in 0..iterations {
                    info!(iteration, "running iteration");
                    load_generator::run_blocking(&sampler, events, max_delay_ms, rand::random());
                    timeline.add_event(sampler.calc());
                    sampler.reset();
                }
                timeline
            })
            .await?;

            let path = timeline
                .write_html(&out)
                .with_context(|| format!("writing timeline to {}", out.display()))?;
            println!("Results written to {}", path.display());
        }
        Command::Serve { addr } => {
            let state = Arc::new(AppState::new(sampler));
            let app = server::create_router(state);

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            info!(%addr, size = config.size, bins = config.bins, "server listening");
            info!("Metrics JSON    → http://{addr}/api/metrics");
            info!("Metrics SSE     → http://{addr}/api/metrics/stream");
            info!("Timeline        → http://{addr}/api/timeline");

            axum::serve(listener, app).await.context("server exited with error")?;
        }
    }

    Ok(())
}
