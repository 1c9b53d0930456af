use clap::Parser;
use orgpulse_api::{ApiConfig, RestApi};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Derived metrics and member similarity for nonprofit operations
#[derive(Parser, Debug)]
#[command(name = "orgpulse")]
#[command(about = "Scoring and similarity service for nonprofit operations data", long_about = None)]
struct Args {
    /// Address to bind the HTTP API to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Results returned by /members/similar when a request sets no limit
    #[arg(long, default_value_t = orgpulse_similarity::DEFAULT_LIMIT)]
    default_similar_limit: usize,

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

    info!("Starting OrgPulse v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    let config = ApiConfig {
        host: args.host,
        port: args.http_port,
        default_similar_limit: args.default_similar_limit,
    };
    config.validate()?;

    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(config).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

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
