//! Command-line interface for the pub crawl planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use log::debug;
use pubcrawl_core::{DirectionsProvider, DistanceOracle};
use pubcrawl_data::routing::{OsrmClient, OsrmClientConfig};
use std::time::Duration;

mod error;
mod plan;
mod precompute;
mod report;

pub use error::CliError;
use plan::{PlanArgs, run_plan};
use precompute::{PrecomputeArgs, run_precompute};

const ARG_PUBS: &str = "pubs";
const ARG_MATRIX: &str = "matrix";
const ARG_OUTPUT: &str = "output";
const ARG_ARTEFACTS_DIR: &str = "artefacts-dir";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_OSRM_PROFILE: &str = "osrm-profile";
const ARG_OSRM_TIMEOUT_SECS: &str = "osrm-timeout-secs";
const ARG_PLAN_REQUEST: &str = "request";
const ARG_DIRECTIONS: &str = "directions";
const ARG_SAMPLE_COUNT: &str = "sample-count";
const ARG_MAX_SOLVE_MS: &str = "max-solve-ms";
const ENV_PLAN_REQUEST: &str = "PUBCRAWL_CMDS_PLAN_REQUEST_PATH";

/// File name of the venue list inside the artefacts directory.
const PUBS_FILE: &str = "pubs.json";
/// File name of the distance matrix inside the artefacts directory.
const MATRIX_FILE: &str = "distances.bin";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration or the selected
/// command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.log_level.as_deref());
    match cli.command {
        Command::Precompute(args) => run_precompute(args),
        Command::Plan(args) => run_plan(args),
    }
}

/// Install `env_logger` on stderr. `filter` uses `RUST_LOG` syntax and
/// overrides the environment; the default level is `warn`.
fn init_logging(filter: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(filters) = filter {
        builder.parse_filters(filters);
    }
    builder.format_timestamp(None).format_target(false);
    if builder.try_init().is_err() {
        debug!("logger already installed");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pubcrawl",
    about = "Plan walking pub crawls between two points",
    version
)]
struct Cli {
    /// Log filter, e.g. `info` or `pubcrawl_planner=debug`.
    #[arg(long, global = true, value_name = "filter")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the pub-to-pub distance matrix for a venue list.
    Precompute(PrecomputeArgs),
    /// Plan a crawl from prepared artefacts.
    Plan(PlanArgs),
}

/// Routing backend used by both commands.
pub(crate) trait RoutingService: DistanceOracle + DirectionsProvider + Send + Sync {}

impl<T: DistanceOracle + DirectionsProvider + Send + Sync> RoutingService for T {}

/// Connection settings shared by both commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoutingConfig {
    pub(crate) base_url: String,
    pub(crate) profile: String,
    pub(crate) timeout_secs: u64,
}

impl RoutingConfig {
    fn from_overrides(
        base_url: Option<String>,
        profile: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        let defaults = OsrmClientConfig::default();
        Self {
            base_url: base_url.unwrap_or(defaults.base_url),
            profile: profile.unwrap_or(defaults.profile),
            timeout_secs: timeout_secs.unwrap_or_else(|| defaults.timeout.as_secs()),
        }
    }
}

/// Builds the routing backend for a command invocation.
pub(crate) trait RoutingServiceBuilder {
    fn build(&self, config: &RoutingConfig) -> Result<Box<dyn RoutingService>, CliError>;
}

pub(crate) struct OsrmServiceBuilder;

impl RoutingServiceBuilder for OsrmServiceBuilder {
    fn build(&self, config: &RoutingConfig) -> Result<Box<dyn RoutingService>, CliError> {
        let client_config = OsrmClientConfig::new(config.base_url.clone())
            .with_profile(config.profile.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs));
        let client =
            OsrmClient::with_config(client_config).map_err(|source| CliError::BuildRoutingService {
                base_url: config.base_url.clone(),
                source,
            })?;
        Ok(Box::new(client))
    }
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(
    path: &camino::Utf8Path,
    field: &'static str,
) -> Result<(), CliError> {
    match pubcrawl_data::fs::is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
