// src/strategy/traits.rs

use std::fmt::Debug;

/// What a cost model gets to see about the day being priced.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayContext {
    pub data_volume_gb: f64,
}

/// Running cost for one day on each delivery path, before lifecycle refreshes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyCost {
    pub on_net: f64,
    pub off_net: f64,
}

/// Prices a single day of traffic on the on-net and off-net paths.
///
/// Implementations capture whatever aggregate figures they need when they
/// are built, so `daily_cost` stays a pure function of the day.
pub trait CostModel: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn daily_cost(&self, context: &DayContext) -> DailyCost;
}
