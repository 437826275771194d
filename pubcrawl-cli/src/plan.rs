//! Plan command implementation.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pubcrawl_core::{PlanRequest, PlanStatus, Planner};
use pubcrawl_data::fs::open_file;
use pubcrawl_data::{load_matrix_for, load_pubs};
use pubcrawl_planner::{CrawlPlanner, PlannerConfig, navigation_legs};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::time::Duration;

use crate::report::{PlanReport, write_json};
use crate::{
    ARG_ARTEFACTS_DIR, ARG_DIRECTIONS, ARG_MATRIX, ARG_MAX_SOLVE_MS, ARG_OSRM_BASE_URL,
    ARG_OSRM_PROFILE, ARG_OSRM_TIMEOUT_SECS, ARG_PLAN_REQUEST, ARG_PUBS, ARG_SAMPLE_COUNT,
    CliError, ENV_PLAN_REQUEST, MATRIX_FILE, OsrmServiceBuilder, PUBS_FILE, RoutingConfig,
    RoutingServiceBuilder, require_existing,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a pub crawl by loading prepared artefacts (pubs.json, \
                 distances.bin) and querying an OSRM instance for distances \
                 from the start and to the end. The request itself is \
                 provided as a JSON-encoded PlanRequest.",
    about = "Plan a pub crawl"
)]
#[ortho_config(prefix = "PUBCRAWL")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a PlanRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Directory containing the default artefact filenames.
    #[arg(long = ARG_ARTEFACTS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) artefacts_dir: Option<Utf8PathBuf>,
    /// Override the path to the venue list (`pubs.json`).
    #[arg(long = ARG_PUBS, value_name = "path")]
    #[serde(default)]
    pub(crate) pubs: Option<Utf8PathBuf>,
    /// Override the path to the distance matrix (`distances.bin`).
    #[arg(long = ARG_MATRIX, value_name = "path")]
    #[serde(default)]
    pub(crate) matrix: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5005").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile (default "foot").
    #[arg(long = ARG_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_OSRM_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) osrm_timeout_secs: Option<u64>,
    /// Number of random subsets drawn for short crawls.
    #[arg(long = ARG_SAMPLE_COUNT, value_name = "count")]
    #[serde(default)]
    pub(crate) sample_count: Option<usize>,
    /// Wall-clock budget for the search in milliseconds.
    #[arg(long = ARG_MAX_SOLVE_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) max_solve_ms: Option<u64>,
    /// Fetch turn-by-turn directions for every leg.
    #[arg(long = ARG_DIRECTIONS)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) directions: bool,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the venue list.
    pub(crate) pubs: Utf8PathBuf,
    /// Path to the distance matrix artefact.
    pub(crate) matrix: Utf8PathBuf,
    /// Routing service connection.
    pub(crate) routing: RoutingConfig,
    /// Planner tuning.
    pub(crate) planner: PlannerConfig,
    /// Whether to fetch directions for each leg.
    pub(crate) directions: bool,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        require_existing(&self.pubs, ARG_PUBS)?;
        require_existing(&self.matrix, ARG_MATRIX)?;
        Ok(())
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let artefacts_dir = args.artefacts_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let pubs = args.pubs.unwrap_or_else(|| artefacts_dir.join(PUBS_FILE));
        let matrix = args
            .matrix
            .unwrap_or_else(|| artefacts_dir.join(MATRIX_FILE));

        let mut planner = PlannerConfig::default();
        if let Some(samples) = args.sample_count {
            planner = planner.with_sample_count(samples);
        }
        if let Some(ms) = args.max_solve_ms {
            planner = planner.with_max_solve_time(Some(Duration::from_millis(ms)));
        }

        Ok(Self {
            request_path,
            pubs,
            matrix,
            routing: RoutingConfig::from_overrides(
                args.osrm_base_url,
                args.osrm_profile,
                args.osrm_timeout_secs,
            ),
            planner,
            directions: args.directions,
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &OsrmServiceBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn RoutingServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_plan(args, builder)?;
    write_json(writer, &report)
}

fn execute_plan(
    args: PlanArgs,
    builder: &dyn RoutingServiceBuilder,
) -> Result<PlanReport, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request = load_plan_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidPlanRequest {
            path: config.request_path.clone(),
            source,
        })?;

    let registry = load_pubs(&config.pubs)?;
    let matrix = load_matrix_for(&config.matrix, &registry)?;
    let service = builder.build(&config.routing)?;
    let planner =
        CrawlPlanner::with_config(registry, matrix, service.as_ref(), config.planner.clone())?;

    let response = planner
        .plan(&request)
        .map_err(|source| CliError::Plan { source })?;
    info!(
        "planned {} of {} pubs, {:.0} m",
        response.route.pub_count(),
        request.count,
        response.total_distance_meters
    );
    if response.status == PlanStatus::NoFeasibleRoute {
        warn!("no route satisfies the forward-progress constraint");
    }

    let report = PlanReport::new(&response, planner.registry());
    if !config.directions {
        return Ok(report);
    }
    let legs = navigation_legs(
        &response.route,
        planner.registry(),
        request.start,
        request.end,
        service.as_ref(),
    )?;
    Ok(report.with_legs(&response, planner.registry(), legs))
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(crate) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
