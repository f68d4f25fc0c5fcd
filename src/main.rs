use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fs};
use tokio::time::interval;
use tracing::{Level, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Registry, layer::SubscriberExt};
use version_fetcher::api::VersionApi;
use version_fetcher::api::node::ApiNode;
use version_fetcher::config::settings::{Logger, Settings};
use version_fetcher::probe;
use version_fetcher::system::signals;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const BASE_DIRECTORY_LOG: &str = "logs";
const BASE_DIRECTORY_SIZE: usize = 5;
const PREFIX_LOG_NAME: &str = "version-fetcher.log";

fn init_logger(logger_config: &Logger) -> Option<WorkerGuard> {
    let log_level = Level::from_str(logger_config.level.as_str()).unwrap_or(Level::INFO);
    let json_console = logger_config.json_console();
    let pretty_console_layer = (logger_config.console && !json_console).then(|| {
        Layer::new()
            .with_writer(std::io::stderr.with_max_level(log_level))
            .pretty()
    });
    let json_console_layer = (logger_config.console && json_console).then(|| {
        Layer::new()
            .with_writer(std::io::stderr.with_max_level(log_level))
            .json()
    });
    let (file_layer, guard) = match logger_config.directory.then(file_appender).flatten() {
        Some(file_appender) => {
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = Layer::new()
                .with_writer(file_writer.with_max_level(log_level))
                .json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    Registry::default()
        .with(pretty_console_layer)
        .with(json_console_layer)
        .with(file_layer)
        .init();
    guard
}

fn file_appender() -> Option<BasicRollingFileAppender> {
    let current_exe_path = env::current_exe().ok()?;
    let log_path = current_exe_path.parent()?.join(BASE_DIRECTORY_LOG);
    fs::create_dir_all(&log_path).ok()?;
    let condition = RollingConditionBasic::new().daily();
    BasicRollingFileAppender::new(log_path.join(PREFIX_LOG_NAME), condition, BASE_DIRECTORY_SIZE).ok()
}

fn build_nodes(settings: &Settings) -> Vec<Box<dyn VersionApi + Send + Sync>> {
    settings
        .nodes
        .iter()
        .filter_map(|node| match ApiNode::new(node) {
            Ok(api) => Some(Box::new(api) as Box<dyn VersionApi + Send + Sync>),
            Err(err) => {
                error!(node = node.name.as_str(), error = err.to_string(), "Skipping node");
                None
            }
        })
        .collect()
}

async fn fetch_once(nodes: &[Box<dyn VersionApi + Send + Sync>]) -> ExitCode {
    let results = probe::probe(nodes).await;
    match probe::report(&results, std::io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = err.to_string(), "Failed to write fetch report");
            ExitCode::FAILURE
        }
    }
}

async fn watch(nodes: &[Box<dyn VersionApi + Send + Sync>], schedule: u64) {
    let mut interval = interval(Duration::from_secs(schedule));
    tokio::select! {
        _ = signals::handle_stop_signals() => {}
        _ = async {
            loop {
                interval.tick().await;
                probe::probe(nodes).await;
            }
        } => {}
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let _guard = init_logger(&settings.logger);
    let env = Settings::mode();
    info!(version = VERSION, env, "Starting version fetcher");

    let nodes = build_nodes(&settings);
    if nodes.is_empty() {
        warn!("No usable node configured");
        return ExitCode::FAILURE;
    }
    if settings.schedule == 0 {
        fetch_once(&nodes).await
    } else {
        watch(&nodes, settings.schedule).await;
        ExitCode::SUCCESS
    }
}
