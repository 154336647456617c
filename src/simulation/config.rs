//! Run configuration for the intersection simulation

use thiserror::Error;

use super::intersection::SignalPattern;

/// Default number of cars allowed on the grid at once
pub const DEFAULT_CONCURRENT_CARS: usize = 15;

/// Default number of cars to run through the intersection
pub const DEFAULT_GOAL_CARS: usize = 20;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("turn ratio must be between 0.0 and 1.0, got {0}")]
    TurnRatioOutOfRange(f64),
    #[error("distribution must be between 0.0 and 1.0, got {0}")]
    DistributionOutOfRange(f64),
    #[error("concurrent car limit must be greater than zero")]
    NoConcurrentCars,
    #[error("goal car count must be greater than zero")]
    NoGoalCars,
}

/// Parameters for one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Maximum number of cars on the grid at once
    pub concurrent_cars: usize,
    /// Number of cars to spawn; the run succeeds once this many have passed
    pub goal_cars: usize,
    pub pattern: SignalPattern,
    /// Probability that a new car turns left (protected-left pattern only)
    pub left_turn_ratio: Option<f64>,
    /// Share of cars spread evenly over the four directions; `None` means 1.0
    pub distribution: Option<f64>,
    /// Keep running after a collision instead of stopping
    pub ignore_crashes: bool,
    /// Seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            concurrent_cars: DEFAULT_CONCURRENT_CARS,
            goal_cars: DEFAULT_GOAL_CARS,
            pattern: SignalPattern::Simple,
            left_turn_ratio: None,
            distribution: None,
            ignore_crashes: false,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn new(concurrent_cars: usize, goal_cars: usize, pattern: SignalPattern) -> Self {
        Self {
            concurrent_cars,
            goal_cars,
            pattern,
            ..Self::default()
        }
    }

    pub fn with_left_turn_ratio(mut self, ratio: f64) -> Self {
        self.left_turn_ratio = Some(ratio);
        self
    }

    pub fn with_distribution(mut self, distribution: f64) -> Self {
        self.distribution = Some(distribution);
        self
    }

    pub fn with_ignore_crashes(mut self, ignore_crashes: bool) -> Self {
        self.ignore_crashes = ignore_crashes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrent_cars == 0 {
            return Err(ConfigError::NoConcurrentCars);
        }
        if self.goal_cars == 0 {
            return Err(ConfigError::NoGoalCars);
        }
        if let Some(ratio) = self.left_turn_ratio {
            if !is_unit_fraction(ratio) {
                return Err(ConfigError::TurnRatioOutOfRange(ratio));
            }
        }
        if let Some(distribution) = self.distribution {
            if !is_unit_fraction(distribution) {
                return Err(ConfigError::DistributionOutOfRange(distribution));
            }
        }
        Ok(())
    }

    /// Turn probability actually applied to new cars
    pub fn effective_left_turn_ratio(&self) -> f64 {
        if self.pattern.has_protected_left() {
            self.left_turn_ratio.unwrap_or(0.0)
        } else {
            0.0
        }
    }

    pub fn effective_distribution(&self) -> f64 {
        self.distribution.unwrap_or(1.0)
    }
}

fn is_unit_fraction(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
