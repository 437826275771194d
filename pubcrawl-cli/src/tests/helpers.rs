//! Test helpers for staging artefacts and stubbing the routing service.

use super::*;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use geo::Coord;
use pubcrawl_core::test_support::{PlanarDistanceOracle, StraightLineDirections};
use pubcrawl_core::{DistanceError, PlanRequest, RouteLeg};
use pubcrawl_data::{MatrixArtefact, load_pubs, precompute_distance_matrix, write_matrix_artefact};
use std::cell::RefCell;
use tempfile::TempDir;

pub(super) const START: Coord<f64> = Coord { x: -2.600, y: 51.450 };
pub(super) const END: Coord<f64> = Coord { x: -2.590, y: 51.450 };

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directory");
    }
    std::fs::write(path, contents).expect("write test file");
}

/// Venues spread along the street from [`START`] to [`END`], alternating
/// either side of it.
pub(super) fn street(count: usize) -> Vec<Coord<f64>> {
    let step = 0.01 / f64::from(u32::try_from(count + 1).expect("small street"));
    (1..=count)
        .map(|i| {
            let along = f64::from(u32::try_from(i).expect("small street")) * step;
            let side = if i.is_multiple_of(2) { 0.0001 } else { -0.0001 };
            Coord {
                x: START.x + along,
                y: START.y + side,
            }
        })
        .collect()
}

/// Routing service answering from straight lines, or failing every call.
#[derive(Debug, Clone)]
pub(super) enum StubService {
    Planar,
    Failing(DistanceError),
}

impl DistanceOracle for StubService {
    fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
        match self {
            Self::Planar => PlanarDistanceOracle.distance_table(coords),
            Self::Failing(err) => Err(err.clone()),
        }
    }
}

impl DirectionsProvider for StubService {
    fn directions(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, DistanceError> {
        match self {
            Self::Planar => StraightLineDirections.directions(from, to),
            Self::Failing(err) => Err(err.clone()),
        }
    }
}

/// Builder handing out a [`StubService`] and remembering its configuration.
#[derive(Debug)]
pub(super) struct StubServiceBuilder {
    service: StubService,
    pub(super) seen: RefCell<Option<RoutingConfig>>,
}

impl StubServiceBuilder {
    pub(super) const fn new(service: StubService) -> Self {
        Self {
            service,
            seen: RefCell::new(None),
        }
    }

    pub(super) const fn planar() -> Self {
        Self::new(StubService::Planar)
    }
}

impl RoutingServiceBuilder for StubServiceBuilder {
    fn build(&self, config: &RoutingConfig) -> Result<Box<dyn RoutingService>, CliError> {
        self.seen.replace(Some(config.clone()));
        Ok(Box::new(self.service.clone()))
    }
}

/// Temporary artefacts directory.
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn pubs_path(&self) -> Utf8PathBuf {
        self.root.join(PUBS_FILE)
    }

    pub(super) fn matrix_path(&self) -> Utf8PathBuf {
        self.root.join(MATRIX_FILE)
    }

    pub(super) fn request_path(&self) -> Utf8PathBuf {
        self.root.join("request.json")
    }

    pub(super) fn write_pubs(&self, coords: &[Coord<f64>]) {
        let records: Vec<serde_json::Value> = coords
            .iter()
            .enumerate()
            .map(|(i, coord)| {
                serde_json::json!({
                    "id": format!("pub-{i}"),
                    "name": format!("The Crown {i}"),
                    "latitude": coord.y,
                    "longitude": coord.x,
                })
            })
            .collect();
        let payload = serde_json::to_vec(&records).expect("serialize pubs");
        write_utf8(&self.pubs_path(), &payload);
    }

    /// Compute and persist the straight-line matrix for the current pubs.
    pub(super) fn write_matrix(&self) {
        let registry = load_pubs(&self.pubs_path()).expect("load pubs");
        let matrix =
            precompute_distance_matrix(&PlanarDistanceOracle, &registry).expect("planar matrix");
        write_matrix_artefact(&self.matrix_path(), &MatrixArtefact::new(&registry, matrix))
            .expect("write matrix");
    }

    /// Stage pubs along the street plus their matrix.
    pub(super) fn prepare_street(&self, count: usize) {
        self.write_pubs(&street(count));
        self.write_matrix();
    }

    pub(super) fn write_request(&self, request: &PlanRequest) {
        let payload = serde_json::to_string_pretty(request).expect("serialize request");
        write_utf8(&self.request_path(), payload.as_bytes());
    }
}
