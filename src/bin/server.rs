use std::{
    fs::OpenOptions,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::{ArgGroup, Parser};
use reqwest::Url;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use adoption_dashboard::{
    AppState, DataSource, build_router, graceful_shutdown, logging_middleware,
};

/// The web server for the AI adoption dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["data_url", "data_path"])))]
struct Args {
    /// URL of the dataset JSON document. It is fetched on every page load.
    #[arg(long)]
    data_url: Option<Url>,

    /// File path to the dataset JSON document. It is read on every page load.
    #[arg(long)]
    data_path: Option<PathBuf>,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The address to listen on.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// The directory of static assets served under `/static`.
    #[arg(long, default_value = "static/")]
    static_dir: PathBuf,

    /// File path for the debug log.
    #[arg(long, default_value = "debug.log")]
    log_file: PathBuf,

    /// How long to wait for the dataset before giving up, in seconds.
    #[arg(long, default_value_t = 10)]
    request_timeout_secs: u64,

    /// Log request and response bodies.
    #[arg(long)]
    log_bodies: bool,
}

impl Args {
    fn data_source(&self) -> Option<DataSource> {
        match (&self.data_url, &self.data_path) {
            (Some(url), _) => Some(DataSource::Http(url.clone())),
            (None, Some(path)) => Some(DataSource::File(path.clone())),
            (None, None) => None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(&args.log_file) {
        eprintln!("Could not open log file {}: {error}", args.log_file.display());
        return ExitCode::FAILURE;
    }

    let Some(data_source) = args.data_source() else {
        tracing::error!("Either --data-url or --data-path must be given");
        return ExitCode::FAILURE;
    };

    let state = match AppState::new(
        data_source.clone(),
        Duration::from_secs(args.request_timeout_secs),
    ) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not create the app state: {error}");
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state, &args.static_dir);
    let router = if args.log_bodies {
        router.layer(middleware::from_fn(logging_middleware))
    } else {
        router
    };
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!("HTTP server listening on {addr}, serving data from {data_source}");

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging(log_path: &Path) -> std::io::Result<()> {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are handled.
        .on_failure(());

    router.layer(tracing_layer)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn requires_a_data_source() {
        assert!(Args::try_parse_from(["server"]).is_err());
    }

    #[test]
    fn rejects_both_data_sources() {
        let result = Args::try_parse_from([
            "server",
            "--data-url",
            "http://localhost/data.json",
            "--data-path",
            "data.json",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn defaults_apply_with_a_data_path() {
        let args = Args::try_parse_from(["server", "--data-path", "data.json"]).unwrap();

        assert_eq!(args.port, 3000);
        assert_eq!(args.host.to_string(), "127.0.0.1");
        assert_eq!(args.request_timeout_secs, 10);
        assert!(!args.log_bodies);
        assert!(args.data_source().is_some());
    }
}
