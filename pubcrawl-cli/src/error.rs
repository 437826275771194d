//! Error types emitted by the pub crawl CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use pubcrawl_core::{PlanError, PlanRequestValidationError};
use pubcrawl_data::routing::ProviderBuildError;
use pubcrawl_data::{LoadError, PersistError, PrecomputeError};
use pubcrawl_planner::{NavigationError, PlannerBuildError};
use thiserror::Error;

/// Errors emitted by the pub crawl CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Loading the venue list or the distance matrix failed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Computing the distance matrix failed.
    #[error("failed to precompute distances: {0}")]
    Precompute(#[from] PrecomputeError),
    /// Writing the distance matrix failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// Constructing the routing client failed.
    #[error("failed to build routing client for {base_url:?}: {source}")]
    BuildRoutingService {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The artefacts do not fit together.
    #[error("failed to build planner: {0}")]
    BuildPlanner(#[from] PlannerBuildError),
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The plan request payload failed validation.
    #[error("plan request in {path:?} failed validation: {source}")]
    InvalidPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: PlanRequestValidationError,
    },
    /// The planner rejected the request.
    #[error("planner failed: {source}")]
    Plan { source: PlanError },
    /// Fetching turn-by-turn directions failed.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
