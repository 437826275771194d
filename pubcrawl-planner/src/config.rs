//! Tuning knobs for [`CrawlPlanner`](crate::CrawlPlanner).

use std::time::Duration;

use pubcrawl_core::WALKING_SPEED_METERS_PER_MINUTE;

use crate::PlannerBuildError;

/// Configuration for [`CrawlPlanner`](crate::CrawlPlanner).
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use pubcrawl_planner::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_sample_count(200)
///     .with_max_solve_time(Some(Duration::from_millis(500)));
/// assert_eq!(config.sample_count, 200);
/// assert_eq!(config.sampling_threshold, 12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Random subsets drawn when sampling.
    pub sample_count: usize,
    /// Largest crawl planned by sampling; larger crawls are built greedily.
    pub sampling_threshold: usize,
    /// Corridor candidates kept per requested venue.
    pub candidate_multiplier: usize,
    /// Meters charged per unit of backtracked progress by the tour constructor.
    pub backtrack_penalty: f64,
    /// Meters charged per unit of backtracked progress by the greedy search.
    pub greedy_backtrack_penalty: f64,
    /// Largest progress drop tolerated between consecutive venues.
    pub progress_threshold: f64,
    /// Walking pace used for the time estimate.
    pub walking_speed_meters_per_minute: f64,
    /// Optional wall-clock budget for the sampling search.
    pub max_solve_time: Option<Duration>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            sampling_threshold: 12,
            candidate_multiplier: 4,
            backtrack_penalty: 5000.0,
            greedy_backtrack_penalty: 10_000.0,
            progress_threshold: 0.05,
            walking_speed_meters_per_minute: WALKING_SPEED_METERS_PER_MINUTE,
            max_solve_time: None,
        }
    }
}

impl PlannerConfig {
    /// Set the number of sampled subsets.
    #[must_use]
    pub const fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set the largest crawl planned by sampling.
    #[must_use]
    pub const fn with_sampling_threshold(mut self, threshold: usize) -> Self {
        self.sampling_threshold = threshold;
        self
    }

    /// Set how many corridor candidates are kept per requested venue.
    #[must_use]
    pub const fn with_candidate_multiplier(mut self, multiplier: usize) -> Self {
        self.candidate_multiplier = multiplier;
        self
    }

    /// Set the tolerated progress drop.
    #[must_use]
    pub const fn with_progress_threshold(mut self, threshold: f64) -> Self {
        self.progress_threshold = threshold;
        self
    }

    /// Set the walking pace used for time estimates.
    #[must_use]
    pub const fn with_walking_speed(mut self, meters_per_minute: f64) -> Self {
        self.walking_speed_meters_per_minute = meters_per_minute;
        self
    }

    /// Set or clear the sampling time budget.
    #[must_use]
    pub const fn with_max_solve_time(mut self, budget: Option<Duration>) -> Self {
        self.max_solve_time = budget;
        self
    }

    /// Check every field is usable.
    pub fn validate(&self) -> Result<(), PlannerBuildError> {
        if self.sample_count == 0 {
            return Err(PlannerBuildError::InvalidConfig {
                field: "sample_count",
                reason: "must be at least 1",
            });
        }
        if self.candidate_multiplier == 0 {
            return Err(PlannerBuildError::InvalidConfig {
                field: "candidate_multiplier",
                reason: "must be at least 1",
            });
        }
        let non_negative = [
            ("backtrack_penalty", self.backtrack_penalty),
            ("greedy_backtrack_penalty", self.greedy_backtrack_penalty),
            ("progress_threshold", self.progress_threshold),
        ];
        if let Some((field, _)) = non_negative
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(PlannerBuildError::InvalidConfig {
                field,
                reason: "must be finite and non-negative",
            });
        }
        if !self.walking_speed_meters_per_minute.is_finite()
            || self.walking_speed_meters_per_minute <= 0.0
        {
            return Err(PlannerBuildError::InvalidConfig {
                field: "walking_speed_meters_per_minute",
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}
