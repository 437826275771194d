//! JSON output for the `plan` command.

use pubcrawl_core::{
    LegStep, PlanResponse, PlanStatus, PubRegistry, RouteElement, RouteLeg, SearchStrategy,
};
use pubcrawl_data::encode_polyline;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::CliError;

/// Label used for the crawl's start in leg endpoints.
const START_LABEL: &str = "start";
/// Label used for the crawl's end in leg endpoints.
const END_LABEL: &str = "end";

/// Planned crawl as printed by `pubcrawl plan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanReport {
    pub(crate) status: PlanStatus,
    pub(crate) requested_count: usize,
    pub(crate) num_pubs: usize,
    pub(crate) stops: Vec<ReportStop>,
    pub(crate) total_distance_meters: f64,
    pub(crate) estimated_time_minutes: f64,
    pub(crate) diagnostics: ReportDiagnostics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) legs: Option<Vec<ReportLeg>>,
}

/// One venue on the crawl, in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReportStop {
    pub(crate) position: usize,
    pub(crate) index: usize,
    pub(crate) pub_id: String,
    pub(crate) name: String,
    pub(crate) longitude: f64,
    pub(crate) latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReportDiagnostics {
    pub(crate) strategy: SearchStrategy,
    pub(crate) candidates_considered: usize,
    pub(crate) tours_evaluated: usize,
    pub(crate) feasible_tours: usize,
    pub(crate) solve_time_ms: u128,
}

/// Walking directions between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReportLeg {
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) distance_meters: f64,
    pub(crate) duration_seconds: f64,
    pub(crate) geometry_encoded: String,
    pub(crate) steps: Vec<LegStep>,
}

impl PlanReport {
    pub(crate) fn new(response: &PlanResponse, registry: &PubRegistry) -> Self {
        let stops = response
            .route
            .pubs()
            .enumerate()
            .filter_map(|(position, index)| {
                registry.get(index).map(|venue| ReportStop {
                    position,
                    index: index.get(),
                    pub_id: venue.id.clone(),
                    name: venue.name.clone(),
                    longitude: venue.location.x,
                    latitude: venue.location.y,
                })
            })
            .collect();
        Self {
            status: response.status,
            requested_count: response.requested_count,
            num_pubs: response.route.pub_count(),
            stops,
            total_distance_meters: response.total_distance_meters,
            estimated_time_minutes: response.estimated_time_minutes,
            diagnostics: ReportDiagnostics {
                strategy: response.diagnostics.strategy,
                candidates_considered: response.diagnostics.candidates_considered,
                tours_evaluated: response.diagnostics.tours_evaluated,
                feasible_tours: response.diagnostics.feasible_tours,
                solve_time_ms: response.diagnostics.solve_time.as_millis(),
            },
            legs: None,
        }
    }

    /// Attach `legs`, one per consecutive pair of route elements.
    pub(crate) fn with_legs(
        mut self,
        response: &PlanResponse,
        registry: &PubRegistry,
        legs: Vec<RouteLeg>,
    ) -> Self {
        let label = |element: RouteElement| match element {
            RouteElement::Start => START_LABEL.to_owned(),
            RouteElement::End => END_LABEL.to_owned(),
            RouteElement::Pub(index) => registry
                .get(index)
                .map_or_else(|| index.to_string(), |venue| venue.id.clone()),
        };
        self.legs = Some(
            response
                .route
                .legs()
                .zip(legs)
                .map(|((from, to), leg)| ReportLeg {
                    from: label(from),
                    to: label(to),
                    distance_meters: leg.distance_meters,
                    duration_seconds: leg.duration_seconds,
                    geometry_encoded: encode_polyline(&leg.geometry),
                    steps: leg.steps,
                })
                .collect(),
        );
        self
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
