use clap::Parser;
use cookielab_api::{AppState, PredictClient, RestApi, TableState};
use cookielab_core::Dataset;
use cookielab_table::TableSession;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// In-memory cookie quality dataset service
#[derive(Parser, Debug)]
#[command(name = "cookielab")]
#[command(about = "Similarity search and category filtering over a cookie dataset", long_about = None)]
struct Args {
    /// Path to the dataset CSV
    #[arg(short, long, default_value = "./data/cookies.csv")]
    dataset: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Base URL of the external prediction service
    #[arg(long, default_value = "http://127.0.0.1:23300")]
    predict_url: String,

    /// Rows per table page
    #[arg(long, default_value_t = 10)]
    page_size: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cookielab v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.dataset);
    info!("HTTP API port: {}", args.http_port);
    info!("Prediction service: {}", args.predict_url);

    // Single load attempt; a broken dataset degrades the table endpoints
    // to a 503 state instead of aborting startup.
    let table = match Dataset::from_path(&args.dataset) {
        Ok(dataset) => {
            info!(
                "Dataset loaded: {} rows, {} category options",
                dataset.len(),
                dataset.category_options().len().saturating_sub(1)
            );
            TableState::Ready(TableSession::with_page_size(dataset, args.page_size))
        }
        Err(e) => {
            error!("Dataset load failed: {}", e);
            TableState::Unavailable(e.to_string())
        }
    };

    let state = Arc::new(AppState::new(
        table,
        PredictClient::new(args.predict_url),
    ));

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("cookielab started successfully");
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
