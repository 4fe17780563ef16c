// src/strategy/implementations.rs

use crate::strategy::bandwidth::{BandwidthRequirement, DAYS_PER_BILLING_MONTH};
use crate::strategy::traits::{CostModel, DailyCost, DayContext};

// =========================================================================
// 1. Canvas Mode (bandwidth-driven)
// =========================================================================

/// Both paths pay per GB shipped plus their monthly hardware share.
#[derive(Debug, Clone)]
pub struct CanvasCostModel {
    on_net_bandwidth_cost_per_gb: f64,
    off_net_bandwidth_cost_per_gb: f64,
    hardware_cost_on_net_per_month: f64,
    hardware_cost_off_net_per_month: f64,
}

impl CanvasCostModel {
    pub fn new(
        on_net_bandwidth_cost_per_gb: f64,
        off_net_bandwidth_cost_per_gb: f64,
        hardware_cost_on_net_per_month: f64,
        hardware_cost_off_net_per_month: f64,
    ) -> Self {
        Self {
            on_net_bandwidth_cost_per_gb,
            off_net_bandwidth_cost_per_gb,
            hardware_cost_on_net_per_month,
            hardware_cost_off_net_per_month,
        }
    }
}

impl CostModel for CanvasCostModel {
    fn name(&self) -> &'static str {
        "Canvas"
    }

    fn daily_cost(&self, context: &DayContext) -> DailyCost {
        DailyCost {
            on_net: context.data_volume_gb * self.on_net_bandwidth_cost_per_gb
                + self.hardware_cost_on_net_per_month / DAYS_PER_BILLING_MONTH,
            off_net: context.data_volume_gb * self.off_net_bandwidth_cost_per_gb
                + self.hardware_cost_off_net_per_month / DAYS_PER_BILLING_MONTH,
        }
    }
}

// =========================================================================
// 2. AWS Mode (SLA-driven)
// =========================================================================

/// On-net pays a flat transfer-link share sized for the SLA instead of
/// per-GB bandwidth. Off-net is priced per GB as in Canvas mode.
#[derive(Debug, Clone)]
pub struct AwsCostModel {
    requirement: BandwidthRequirement,
    off_net_bandwidth_cost_per_gb: f64,
    hardware_cost_on_net_per_month: f64,
    hardware_cost_off_net_per_month: f64,
}

impl AwsCostModel {
    pub fn new(
        requirement: BandwidthRequirement,
        off_net_bandwidth_cost_per_gb: f64,
        hardware_cost_on_net_per_month: f64,
        hardware_cost_off_net_per_month: f64,
    ) -> Self {
        Self {
            requirement,
            off_net_bandwidth_cost_per_gb,
            hardware_cost_on_net_per_month,
            hardware_cost_off_net_per_month,
        }
    }
}

impl CostModel for AwsCostModel {
    fn name(&self) -> &'static str {
        "AWS"
    }

    fn daily_cost(&self, context: &DayContext) -> DailyCost {
        DailyCost {
            on_net: self.hardware_cost_on_net_per_month / DAYS_PER_BILLING_MONTH
                + self.requirement.daily_transfer_link_cost(),
            off_net: context.data_volume_gb * self.off_net_bandwidth_cost_per_gb
                + self.hardware_cost_off_net_per_month / DAYS_PER_BILLING_MONTH,
        }
    }
}
