// src/model/traffic.rs

use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One historical day of traffic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTraffic {
    pub num_users: f64,
    pub num_requests: f64,
}

impl DailyTraffic {
    pub fn new(num_users: f64, num_requests: f64) -> Self {
        Self {
            num_users,
            num_requests,
        }
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            num_users: self.num_users * factor,
            num_requests: self.num_requests * factor,
        }
    }
}

/// An ordered, non-empty daily traffic series.
///
/// Once built the dataset is never mutated. Rescaling to a different
/// audience size goes through [`TrafficDataset::normalized`], which hands
/// back a fresh value and leaves the source untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficDataset {
    rows: Vec<DailyTraffic>,
}

impl TrafficDataset {
    /// Builds a dataset, rejecting empty input and negative or non-finite values.
    pub fn new(rows: Vec<DailyTraffic>) -> Result<Self> {
        if rows.is_empty() {
            return Err(SimulationError::InvalidInput(
                "traffic dataset is empty".to_string(),
            ));
        }

        for (index, row) in rows.iter().enumerate() {
            if !row.num_users.is_finite() || row.num_users < 0.0 {
                return Err(SimulationError::InvalidInput(format!(
                    "row {}: num_users must be a non-negative number, got {}",
                    index, row.num_users
                )));
            }
            if !row.num_requests.is_finite() || row.num_requests < 0.0 {
                return Err(SimulationError::InvalidInput(format!(
                    "row {}: num_requests must be a non-negative number, got {}",
                    index, row.num_requests
                )));
            }
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DailyTraffic] {
        &self.rows
    }

    /// Row consumed on simulation day `day` (0-based); the series repeats once exhausted.
    pub fn cyclic(&self, day: usize) -> &DailyTraffic {
        &self.rows[day % self.rows.len()]
    }

    pub fn mean_users(&self) -> f64 {
        self.rows.iter().map(|r| r.num_users).sum::<f64>() / self.rows.len() as f64
    }

    pub fn total_requests(&self) -> f64 {
        self.rows.iter().map(|r| r.num_requests).sum()
    }

    /// Rescales users and requests so the mean user count equals `target_avg_users`.
    ///
    /// Requests scale with users, so the per-row request rate per user is kept.
    ///
    /// # Errors
    /// `InvalidInput` if the target is not a positive number or the dataset
    /// has a mean of zero users.
    pub fn normalized(&self, target_avg_users: f64) -> Result<TrafficDataset> {
        if !target_avg_users.is_finite() || target_avg_users <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "target average users must be positive, got {}",
                target_avg_users
            )));
        }

        let current_avg_users = self.mean_users();
        if !current_avg_users.is_finite() || current_avg_users == 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "cannot normalize a dataset whose mean user count is {}",
                current_avg_users
            )));
        }

        let factor = target_avg_users / current_avg_users;
        if !factor.is_finite() || factor == 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "normalization factor {} is out of range (mean {}, target {})",
                factor, current_avg_users, target_avg_users
            )));
        }
        debug!(
            current_avg_users,
            target_avg_users, factor, "Normalizing traffic dataset"
        );

        // Rescaled rows go through the same checks as loaded ones
        TrafficDataset::new(self.rows.iter().map(|r| r.scaled(factor)).collect())
    }
}
