#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for golden routes using rstest-bdd.
//!
//! These scenarios plan well-defined corridors loaded from JSON files and
//! verify that the planner keeps producing the recorded routes.

mod common;

use std::cell::RefCell;

use common::{GoldenRoute, load_golden_route};
use pubcrawl_core::{PlanResponse, Planner};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for golden route BDD scenarios.
#[derive(Debug, Default)]
struct GoldenRouteWorld {
    golden: RefCell<Option<GoldenRoute>>,
    response: RefCell<Option<PlanResponse>>,
}

impl GoldenRouteWorld {
    fn golden(&self) -> GoldenRoute {
        self.golden
            .borrow()
            .clone()
            .expect("golden route should be loaded")
    }

    fn response(&self) -> PlanResponse {
        self.response
            .borrow()
            .clone()
            .expect("response should be recorded")
    }
}

#[fixture]
fn world() -> GoldenRouteWorld {
    GoldenRouteWorld::default()
}

#[given("a golden route {name:word}")]
fn given_golden_route(world: &GoldenRouteWorld, name: String) {
    // Strip surrounding quotes that rstest-bdd may include from Gherkin syntax.
    let clean_name = name.trim_matches('"');
    world.golden.replace(Some(load_golden_route(clean_name)));
}

#[when("the planner plans the golden route")]
fn when_planner_runs(world: &GoldenRouteWorld) {
    let golden = world.golden();
    let response = golden
        .planner()
        .plan(&golden.request)
        .expect("plan should succeed");
    world.response.replace(Some(response));
}

#[then("the route visits the expected pubs in order")]
fn then_route_matches(world: &GoldenRouteWorld) {
    let golden = world.golden();
    let response = world.response();
    assert_eq!(
        golden.visited_ids(&response),
        golden.expected.route_pub_ids,
        "{}: {}",
        golden.name,
        golden.description
    );
}

#[then("the total distance matches the recorded value")]
fn then_distance_matches(world: &GoldenRouteWorld) {
    let golden = world.golden();
    let response = world.response();
    assert!(
        golden.distance_matches(response.total_distance_meters),
        "total {} differs from {}",
        response.total_distance_meters,
        golden.expected.total_distance_meters
    );
}

#[then("the plan reports the expected strategy and status")]
fn then_strategy_matches(world: &GoldenRouteWorld) {
    let golden = world.golden();
    let response = world.response();
    assert_eq!(response.diagnostics.strategy, golden.expected.strategy);
    assert_eq!(response.status, golden.expected.status);
}

#[scenario(path = "tests/features/golden_routes.feature", index = 0)]
fn ordered_corridor(world: GoldenRouteWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/golden_routes.feature", index = 1)]
fn direct_distance(world: GoldenRouteWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/golden_routes.feature", index = 2)]
fn even_spacing(world: GoldenRouteWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/golden_routes.feature", index = 3)]
fn long_greedy(world: GoldenRouteWorld) {
    let _ = world;
}
