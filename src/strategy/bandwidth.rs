// src/strategy/bandwidth.rs

//! Transfer-link sizing for the AWS compute mode.
//!
//! The link is sized once against the whole dataset's throughput, not day by
//! day, so every simulated day pays the same transfer-link share.

use crate::model::traffic::TrafficDataset;
use serde::Serialize;

pub const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;
pub const KB_PER_GB: f64 = 1_048_576.0;
pub const DAYS_PER_BILLING_MONTH: f64 = 30.0;

/// Provisioned bandwidth and what it costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandwidthRequirement {
    pub required_bandwidth_gbps: f64,
    pub monthly_transfer_link_cost: f64,
}

impl BandwidthRequirement {
    pub fn daily_transfer_link_cost(&self) -> f64 {
        self.monthly_transfer_link_cost / DAYS_PER_BILLING_MONTH
    }
}

/// Average data rate of `requests_per_second` requests of `avg_request_size_kb` each.
pub fn data_rate_gbps(requests_per_second: f64, avg_request_size_kb: f64) -> f64 {
    requests_per_second * (avg_request_size_kb / KB_PER_GB / 1024.0)
}

/// Sizes the transfer link needed to carry `sla_percentage` of the dataset's
/// aggregate request volume, spread evenly over a day.
pub fn required_bandwidth(
    dataset: &TrafficDataset,
    avg_request_size_kb: f64,
    sla_percentage: f64,
    transfer_link_cost_per_gbps: f64,
) -> BandwidthRequirement {
    let requests_per_second = dataset.total_requests() / SECONDS_PER_DAY;
    let rate = data_rate_gbps(requests_per_second, avg_request_size_kb);

    let required_bandwidth_gbps = rate * (sla_percentage / 100.0);

    BandwidthRequirement {
        required_bandwidth_gbps,
        monthly_transfer_link_cost: required_bandwidth_gbps * transfer_link_cost_per_gbps,
    }
}
