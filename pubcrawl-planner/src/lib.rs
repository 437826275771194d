//! Corridor-constrained pub crawl planner.
//!
//! This crate provides [`CrawlPlanner`], the default implementation of the
//! [`Planner`](pubcrawl_core::Planner) trait. A planning call narrows the
//! registry to a corridor of candidates around the straight line from start to
//! end, fetches the start and end legs for those candidates in two batched
//! oracle calls, and then searches for a short, evenly spaced route:
//!
//! - small crawls sample many random subsets, building each tour with a
//!   progress-penalised nearest neighbour pass and polishing it with 2-opt;
//! - large crawls build a single tour greedily and polish it once.
//!
//! Every route respects the forward-progress constraint unless the greedy
//! search runs out of forward candidates, in which case the response says so.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidates;
mod config;
mod construct;
mod distance;
mod navigation;
mod objective;
mod progress;
mod refine;
mod solver;
mod strategy;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::PlannerConfig;
pub use navigation::{NavigationError, navigation_legs};
pub use objective::population_std_dev;
pub use progress::progress_regresses;
pub use solver::{CrawlPlanner, PlannerBuildError};
