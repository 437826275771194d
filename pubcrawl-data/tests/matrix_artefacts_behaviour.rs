//! Behavioural tests for pub loading, matrix precomputation and artefact
//! persistence.

use camino::Utf8PathBuf;
use pubcrawl_core::test_support::PlanarDistanceOracle;
use pubcrawl_core::{DistanceMatrix, PubRegistry};
use pubcrawl_data::routing::test_support::RecordingOracle;
use pubcrawl_data::{
    LoadError, MatrixArtefact, load_matrix_for, load_pubs, precompute_distance_matrix,
    write_matrix_artefact,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

struct ArtefactWorld {
    dir: TempDir,
    oracle: RecordingOracle<PlanarDistanceOracle>,
    registry: RefCell<Option<PubRegistry>>,
    matrix: RefCell<Option<DistanceMatrix>>,
}

impl ArtefactWorld {
    fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name)).expect("utf-8 temp path")
    }

    fn pubs_path(&self) -> Utf8PathBuf {
        self.path("pubs.json")
    }

    fn matrix_path(&self) -> Utf8PathBuf {
        self.path("artefacts/distances.bin")
    }

    fn write_pubs(&self, located: usize, unlocated: usize) {
        let records: Vec<serde_json::Value> = (0..located)
            .map(|i| {
                let offset = f64::from(u32::try_from(i).expect("small count")) * 0.0004;
                serde_json::json!({
                    "id": format!("osm-{i}"),
                    "name": format!("The Anchor {i}"),
                    "address": {"street": format!("{i} Harbour Side"), "postalCode": "BS1 5DB"},
                    "latitude": 51.449 + offset,
                    "longitude": -2.600 + offset,
                })
            })
            .chain((0..unlocated).map(|i| {
                serde_json::json!({"id": format!("lost-{i}"), "name": "Somewhere"})
            }))
            .collect();
        std::fs::write(
            self.pubs_path(),
            serde_json::to_string(&records).expect("serialise records"),
        )
        .expect("write pubs file");
    }

    fn load_registry(&self) {
        let registry = load_pubs(&self.pubs_path()).expect("load pubs");
        *self.registry.borrow_mut() = Some(registry);
    }
}

#[fixture]
fn world() -> ArtefactWorld {
    ArtefactWorld {
        dir: TempDir::new().expect("create temp dir"),
        oracle: RecordingOracle::new(PlanarDistanceOracle),
        registry: RefCell::new(None),
        matrix: RefCell::new(None),
    }
}

#[given("a pubs file with {located} located pubs and {unlocated} without coordinates")]
fn pubs_file(world: &ArtefactWorld, located: usize, unlocated: usize) {
    world.write_pubs(located, unlocated);
}

#[when("the pubs are loaded")]
fn load(world: &ArtefactWorld) {
    world.load_registry();
}

#[when("the distance matrix is precomputed and written")]
fn precompute(world: &ArtefactWorld) {
    let registry = world.registry.borrow();
    let registry = registry.as_ref().expect("pubs loaded");
    let matrix = precompute_distance_matrix(&world.oracle, registry).expect("precompute");
    write_matrix_artefact(
        &world.matrix_path(),
        &MatrixArtefact::new(registry, matrix.clone()),
    )
    .expect("write artefact");
    *world.matrix.borrow_mut() = Some(matrix);
}

#[when("the pubs file is replaced with {located} located pubs")]
fn replace_pubs(world: &ArtefactWorld, located: usize) {
    world.write_pubs(located, 0);
    world.load_registry();
}

#[then("{count} pubs are available")]
fn pubs_available(world: &ArtefactWorld, count: usize) {
    let registry = world.registry.borrow();
    assert_eq!(registry.as_ref().expect("pubs loaded").len(), count);
}

#[then("the routing service received {count} request")]
fn one_request(world: &ArtefactWorld, count: usize) {
    assert_eq!(world.oracle.request_sizes().len(), count);
}

#[then("the routing service received {count} requests")]
fn many_requests(world: &ArtefactWorld, count: usize) {
    assert_eq!(world.oracle.request_sizes().len(), count);
}

#[then("the reloaded matrix matches the computed one")]
fn reloaded_matches(world: &ArtefactWorld) {
    let registry = world.registry.borrow();
    let reloaded = load_matrix_for(&world.matrix_path(), registry.as_ref().expect("pubs loaded"))
        .expect("reload artefact");
    assert_eq!(Some(reloaded), world.matrix.borrow().clone());
}

#[then("reloading the matrix reports a stale artefact")]
fn reload_is_stale(world: &ArtefactWorld) {
    let registry = world.registry.borrow();
    let err = load_matrix_for(&world.matrix_path(), registry.as_ref().expect("pubs loaded"))
        .expect_err("artefact is stale");
    assert!(
        matches!(err, LoadError::StaleMatrix { .. }),
        "expected a stale artefact, got {err:?}"
    );
}

#[scenario(path = "tests/features/matrix_artefacts.feature", index = 0)]
fn small_pub_list(world: ArtefactWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matrix_artefacts.feature", index = 1)]
fn large_pub_list(world: ArtefactWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matrix_artefacts.feature", index = 2)]
fn stale_artefact(world: ArtefactWorld) {
    let _ = world;
}
