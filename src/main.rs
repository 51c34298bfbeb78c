use anyhow::Result;
use clap::Parser;
use nagios_status::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser, Debug)]
#[command(name = "nagios-status")]
#[command(about = "Parse a Nagios status.dat file and print it as JSON or as a problem list")]
struct Args {
    /// Path to status.dat (overrides status.path from the config file)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (default: $CONFIG_FILE or config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every record as JSON instead of the problem list
    #[arg(long, conflicts_with = "serve")]
    all: bool,

    /// Include problems whose notifications are disabled
    #[arg(long)]
    mute: bool,

    /// Include acknowledged problems
    #[arg(long)]
    ack: bool,

    /// Serve the parsed status over HTTP, refreshing periodically
    #[arg(long)]
    serve: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut app_config = config::AppConfig::load(args.config.as_deref())?;
    if let Some(file) = &args.file {
        app_config.status.path = file.display().to_string();
    }
    let parser = StatusParser::from_path(&app_config.status.path);

    if args.serve {
        return serve(parser, app_config).await;
    }

    let snapshot = parser.parse().await?;
    for diagnostic in snapshot.diagnostics() {
        tracing::warn!(%diagnostic, "block dropped");
    }

    if args.all {
        println!("{}", to_json(&snapshot)?);
    } else {
        let filter = report::ProblemFilter {
            include_acknowledged: args.ack,
            include_muted: args.mute,
        };
        for problem in report::problems(&snapshot, filter) {
            println!("{problem}");
        }
    }
    Ok(())
}

async fn serve(parser: StatusParser<source::FileSource>, app_config: config::AppConfig) -> Result<()> {
    let parser = Arc::new(parser);
    let store = Arc::new(worker::SnapshotStore::new());

    // Fail fast on an unreadable file; later refresh failures only log.
    worker::refresh_once(&parser, &store).await?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            parser: parser.clone(),
            store: store.clone(),
            shutdown_rx,
        },
        worker::WorkerConfig {
            refresh_interval_ms: app_config.monitoring.refresh_interval_ms,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let app = routes::app(store, app_config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(_) => {
                        let _ = tokio::signal::ctrl_c().await;
                        return;
                    }
                };
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            #[cfg(not(unix))]
            {
                let _ = tokio::signal::ctrl_c().await;
            }
        } => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            let _ = worker_handle.await;
        }
    }

    Ok(())
}
