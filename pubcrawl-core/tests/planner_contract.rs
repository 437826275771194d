//! Tests for the `Planner` trait using a dummy implementation.

use std::time::Duration;

use geo::Coord;
use pubcrawl_core::{
    Diagnostics, PlanError, PlanRequest, PlanResponse, PlanStatus, Planner, Route, SearchStrategy,
    WALKING_SPEED_METERS_PER_MINUTE,
};
use rstest::rstest;

struct DummyPlanner {
    available: usize,
}

impl Planner for DummyPlanner {
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError> {
        request.validate_for(self.available)?;
        Ok(PlanResponse {
            route: Route::empty(),
            total_distance_meters: 0.0,
            estimated_time_minutes: 0.0 / WALKING_SPEED_METERS_PER_MINUTE,
            requested_count: request.count,
            status: PlanStatus::NoFeasibleRoute,
            diagnostics: Diagnostics {
                solve_time: Duration::ZERO,
                candidates_considered: 0,
                strategy: SearchStrategy::Sampling,
                tours_evaluated: 0,
                feasible_tours: 0,
            },
        })
    }
}

#[rstest]
#[case(3, true)]
#[case(0, false)]
#[case(5, false)]
fn planner_validates_requests(#[case] count: usize, #[case] should_succeed: bool) {
    let planner = DummyPlanner { available: 4 };
    let request = PlanRequest::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }, count);
    assert_eq!(planner.plan(&request).is_ok(), should_succeed);
}

#[rstest]
fn validation_failures_surface_as_invalid_request() {
    let planner = DummyPlanner { available: 4 };
    let request = PlanRequest::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }, 1)
        .with_uniformity_weight(2.0);
    let err = planner.plan(&request).expect_err("weight out of range");
    assert!(matches!(err, PlanError::InvalidRequest(_)));
}

#[rstest]
fn planners_are_usable_as_trait_objects() {
    let planner: Box<dyn Planner> = Box::new(DummyPlanner { available: 1 });
    let request = PlanRequest::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }, 1);
    let response = planner.plan(&request).expect("valid request");
    assert_eq!(response.route.pub_count(), 0);
    assert!(response.status.is_degraded());
}
