//! Behavioural tests for `DistanceOracle` implementations.

use std::cell::RefCell;

use geo::Coord;
use pubcrawl_core::{DistanceError, DistanceOracle, test_support::PlanarDistanceOracle};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Outcome = RefCell<Result<Vec<f64>, DistanceError>>;

const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

#[fixture]
fn oracle() -> PlanarDistanceOracle {
    PlanarDistanceOracle
}

#[fixture]
fn result() -> Outcome {
    RefCell::new(Ok(Vec::new()))
}

#[given("a planar distance oracle")]
fn given_oracle(#[from(oracle)] _oracle: &PlanarDistanceOracle, #[from(result)] result: &Outcome) {
    *result.borrow_mut() = Ok(Vec::new());
}

#[when("I request distances from the origin to two venues")]
fn request_two(#[from(oracle)] oracle: &PlanarDistanceOracle, #[from(result)] result: &Outcome) {
    let venues = [Coord { x: 0.0, y: 0.002 }, Coord { x: 0.001, y: 0.0 }];
    *result.borrow_mut() = oracle.distances_from(ORIGIN, &venues);
}

#[when("I request distances from the origin to no venues")]
fn request_none(#[from(oracle)] oracle: &PlanarDistanceOracle, #[from(result)] result: &Outcome) {
    *result.borrow_mut() = oracle.distances_from(ORIGIN, &[]);
}

#[then("two distances are returned in venue order")]
fn then_distances(#[from(result)] result: &Outcome) {
    let borrow = result.borrow();
    let distances = borrow.as_ref().expect("expected Ok result");
    assert_eq!(distances.len(), 2);
    assert!((distances[0] - 222.0).abs() < 1e-6);
    assert!((distances[1] - 111.0).abs() < 1e-6);
}

#[then("an empty input error is returned")]
fn then_error(#[from(result)] result: &Outcome) {
    assert_eq!(*result.borrow(), Err(DistanceError::EmptyInput));
}

#[scenario(path = "tests/features/distance_oracle.feature", index = 0)]
fn distances_returned(oracle: PlanarDistanceOracle, result: Outcome) {
    let _ = (oracle, result);
}

#[scenario(path = "tests/features/distance_oracle.feature", index = 1)]
fn error_on_empty(oracle: PlanarDistanceOracle, result: Outcome) {
    let _ = (oracle, result);
}
