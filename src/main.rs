//! Storefront binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

use storefront::sources::ApiClient;
use storefront::{app, args, config, i18n};

/// Log timestamp format: local time, `YYYY-MM-DD-T HH:MM:SS`.
struct StorefrontTimer;

impl tracing_subscriber::fmt::time::FormatTime for StorefrontTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

/// Keeps the non-blocking log writer alive for the whole process.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing, writing to `~/.config/storefront/logs/storefront.log`.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is not set
///
/// Details:
/// - Falls back to a stderr logger when the log file cannot be opened.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = config::logs_dir();
    log_path.push("storefront.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(StorefrontTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: init stderr logger to avoid blocking startup
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(StorefrontTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let mut settings = config::settings();
    if let Some(url) = args.api_url.as_deref() {
        settings.api_base_url = url.to_string();
        config::normalize(&mut settings);
    }
    let locale = i18n::init(args.locale.as_deref().unwrap_or(&settings.locale));
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %settings.api_base_url,
        locale,
        "Storefront starting"
    );

    let api = match ApiClient::from_settings(&settings) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{e}");
            tracing::error!(error = %e, "invalid API configuration");
            std::process::exit(2);
        }
    };

    if let Some(code) = args::process_args(&args, &api, &settings).await {
        tracing::info!(code, "Storefront exited");
        std::process::exit(code);
    }

    if let Err(err) = app::run(api, &settings, args.listing_filters(), args.deal_filters()).await {
        tracing::error!(error = ?err, "Application error");
    }
    tracing::info!("Storefront exited");
}
