//! Precompute command implementation.

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pubcrawl_data::{MatrixArtefact, load_pubs, precompute_distance_matrix, write_matrix_artefact};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_ARTEFACTS_DIR, ARG_OSRM_BASE_URL, ARG_OSRM_PROFILE, ARG_OSRM_TIMEOUT_SECS, ARG_OUTPUT,
    ARG_PUBS, CliError, MATRIX_FILE, OsrmServiceBuilder, PUBS_FILE, RoutingConfig,
    RoutingServiceBuilder, require_existing,
};

/// CLI arguments for the `precompute` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read a JSON venue list (pubs.json), query an OSRM instance \
                 for walking distances between every pair of pubs and write \
                 the resulting matrix to distances.bin.",
    about = "Precompute the pub-to-pub distance matrix"
)]
#[ortho_config(prefix = "PUBCRAWL")]
pub(crate) struct PrecomputeArgs {
    /// Directory containing the default artefact filenames.
    #[arg(long = ARG_ARTEFACTS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) artefacts_dir: Option<Utf8PathBuf>,
    /// Override the path to the venue list (`pubs.json`).
    #[arg(long = ARG_PUBS, value_name = "path")]
    #[serde(default)]
    pub(crate) pubs: Option<Utf8PathBuf>,
    /// Override the path of the written matrix (`distances.bin`).
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
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
}

impl PrecomputeArgs {
    pub(crate) fn into_config(self) -> Result<PrecomputeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(PrecomputeConfig::from(merged))
    }
}

/// Resolved `precompute` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrecomputeConfig {
    /// Path to the venue list.
    pub(crate) pubs: Utf8PathBuf,
    /// Path the matrix artefact is written to.
    pub(crate) output: Utf8PathBuf,
    /// Routing service connection.
    pub(crate) routing: RoutingConfig,
}

impl PrecomputeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.pubs, ARG_PUBS)
    }
}

impl From<PrecomputeArgs> for PrecomputeConfig {
    fn from(args: PrecomputeArgs) -> Self {
        let artefacts_dir = args.artefacts_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        Self {
            pubs: args.pubs.unwrap_or_else(|| artefacts_dir.join(PUBS_FILE)),
            output: args.output.unwrap_or_else(|| artefacts_dir.join(MATRIX_FILE)),
            routing: RoutingConfig::from_overrides(
                args.osrm_base_url,
                args.osrm_profile,
                args.osrm_timeout_secs,
            ),
        }
    }
}

/// Summary printed after a successful precompute run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PrecomputeSummary {
    /// Number of pubs in the matrix.
    pub(crate) pubs: usize,
    /// Where the matrix was written.
    pub(crate) matrix: Utf8PathBuf,
}

pub(crate) fn run_precompute(args: PrecomputeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_precompute_with(args, &OsrmServiceBuilder, &mut stdout)
}

pub(crate) fn run_precompute_with(
    args: PrecomputeArgs,
    builder: &dyn RoutingServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let summary = execute_precompute(&config, builder)?;
    crate::report::write_json(writer, &summary)
}

fn execute_precompute(
    config: &PrecomputeConfig,
    builder: &dyn RoutingServiceBuilder,
) -> Result<PrecomputeSummary, CliError> {
    let registry = load_pubs(&config.pubs)?;
    info!("loaded {} pubs from {}", registry.len(), config.pubs);
    let service = builder.build(&config.routing)?;
    let matrix = precompute_distance_matrix(service.as_ref(), &registry)?;
    write_matrix_artefact(&config.output, &MatrixArtefact::new(&registry, matrix))?;
    Ok(PrecomputeSummary {
        pubs: registry.len(),
        matrix: config.output.clone(),
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PrecomputeConfig, CliError> {
    let merged = PrecomputeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(PrecomputeConfig::from(merged))
}
