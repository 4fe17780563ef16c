// src/simulation/engine.rs

use crate::error::{Result, SimulationError};
use crate::model::traffic::TrafficDataset;
use crate::simulation::config::SimulationParameters;
use crate::strategy::bandwidth::{self, BandwidthRequirement, KB_PER_GB};
use crate::strategy::implementations::{AwsCostModel, CanvasCostModel};
use crate::strategy::traits::{CostModel, DayContext};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// How the on-net path is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeMode {
    /// On-net pays a transfer link sized for an SLA.
    Aws,
    /// On-net pays per GB shipped.
    Canvas,
}

impl fmt::Display for ComputeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeMode::Aws => write!(f, "AWS"),
            ComputeMode::Canvas => write!(f, "Canvas"),
        }
    }
}

impl FromStr for ComputeMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(ComputeMode::Aws),
            "canvas" => Ok(ComputeMode::Canvas),
            other => Err(SimulationError::InvalidInput(format!(
                "unknown compute mode '{}' (expected 'aws' or 'canvas')",
                other
            ))),
        }
    }
}

// Serialize so the timeline can go straight to CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub day: usize,
    pub on_net_cumulative_cost: f64,
    pub off_net_cumulative_cost: f64,
    pub requests: f64,
    pub data_volume_gb: f64,
    pub active_users: f64,
}

/// Outcome of a run, left unformatted for the caller to present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Verdict {
    OffNetCheaper,
    OnNetCheaper,
    BandwidthRequirement { gbps: f64, monthly_cost: f64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResults {
    pub mode: ComputeMode,
    pub timeline: Vec<TimelineRow>,
    pub verdict: Verdict,
    /// Zero outside AWS mode.
    pub required_bandwidth_gbps: f64,
    /// Zero outside AWS mode.
    pub aws_transfer_link_monthly_cost: f64,
}

impl SimulationResults {
    pub fn total_on_net_cost(&self) -> f64 {
        self.timeline
            .last()
            .map(|row| row.on_net_cumulative_cost)
            .unwrap_or(0.0)
    }

    pub fn total_off_net_cost(&self) -> f64 {
        self.timeline
            .last()
            .map(|row| row.off_net_cumulative_cost)
            .unwrap_or(0.0)
    }
}

/// Day-by-day cost accrual over a normalized traffic dataset.
pub struct CostSimulator {
    params: SimulationParameters,
    dataset: TrafficDataset,
}

impl CostSimulator {
    /// `dataset` must already be normalized to `params.avg_num_users`.
    pub fn new(params: SimulationParameters, dataset: TrafficDataset) -> Self {
        Self { params, dataset }
    }

    /// Normalizes `raw` to the parameters' target audience and builds a simulator over it.
    pub fn from_raw(params: SimulationParameters, raw: &TrafficDataset) -> Result<Self> {
        if params.avg_num_users == 0 {
            return Err(SimulationError::InvalidInput(
                "avg_num_users must be at least 1".to_string(),
            ));
        }
        let dataset = raw.normalized(params.avg_num_users as f64)?;
        Ok(Self::new(params, dataset))
    }

    pub fn dataset(&self) -> &TrafficDataset {
        &self.dataset
    }

    /// Builds the cost model for `mode`, sizing the AWS transfer link up front.
    fn cost_model(&self, mode: ComputeMode) -> (Box<dyn CostModel>, Option<BandwidthRequirement>) {
        let p = &self.params;
        match mode {
            ComputeMode::Canvas => {
                let model = CanvasCostModel::new(
                    p.on_net_bandwidth_cost_per_gb.unwrap_or_default(),
                    p.off_net_bandwidth_cost_per_gb,
                    p.hardware_cost_on_net_per_month,
                    p.hardware_cost_off_net_per_month,
                );
                (Box::new(model), None)
            }
            ComputeMode::Aws => {
                let requirement = bandwidth::required_bandwidth(
                    &self.dataset,
                    p.avg_request_size_kb,
                    p.sla_percentage.unwrap_or_default(),
                    p.transfer_link_cost_per_gbps.unwrap_or_default(),
                );
                let model = AwsCostModel::new(
                    requirement,
                    p.off_net_bandwidth_cost_per_gb,
                    p.hardware_cost_on_net_per_month,
                    p.hardware_cost_off_net_per_month,
                );
                (Box::new(model), Some(requirement))
            }
        }
    }

    /// Runs the full horizon in `mode`. Recomputes everything on each call.
    ///
    /// # Errors
    /// Fails before any day is simulated if the parameters do not suit `mode`
    /// or the dataset is empty.
    pub fn run(&self, mode: ComputeMode) -> Result<SimulationResults> {
        self.params.validate(mode)?;
        if self.dataset.is_empty() {
            return Err(SimulationError::InvalidInput(
                "traffic dataset is empty".to_string(),
            ));
        }

        let horizon = self.params.time_horizon_days as usize;
        let avg_request_size_gb = self.params.avg_request_size_kb / KB_PER_GB;
        let life_cycle_days = self.params.hardware_life_cycle_days();

        if horizon < self.dataset.len() {
            warn!(
                horizon,
                dataset_days = self.dataset.len(),
                "Horizon is shorter than the dataset; trailing days are not simulated"
            );
        }
        if life_cycle_days > horizon {
            warn!(
                life_cycle_days,
                horizon, "Hardware lifecycle exceeds the horizon; no refresh will occur"
            );
        }

        let (model, requirement) = self.cost_model(mode);
        info!(mode = %mode, model = model.name(), horizon, "Starting cost simulation");

        // Day-0 capital expenditure
        let mut on_net_cumulative = self.params.upfront_hardware_cost_on_net;
        let mut off_net_cumulative = self.params.upfront_hardware_cost_off_net;
        let mut timeline = Vec::with_capacity(horizon);

        for day in 0..horizon {
            let traffic = self.dataset.cyclic(day);
            let data_volume_gb = traffic.num_requests * avg_request_size_gb;

            let context = DayContext { data_volume_gb };
            let mut cost = model.daily_cost(&context);

            if (day + 1) % life_cycle_days == 0 {
                debug!(day = day + 1, "Hardware lifecycle refresh");
                cost.on_net += self.params.upfront_hardware_cost_on_net;
                cost.off_net += self.params.upfront_hardware_cost_off_net;
            }

            on_net_cumulative += cost.on_net;
            off_net_cumulative += cost.off_net;

            timeline.push(TimelineRow {
                day: day + 1,
                on_net_cumulative_cost: on_net_cumulative,
                off_net_cumulative_cost: off_net_cumulative,
                requests: traffic.num_requests,
                data_volume_gb,
                active_users: traffic.num_users,
            });

            if (day + 1) % 30 == 0 {
                debug!(
                    day = day + 1,
                    on_net_cumulative, off_net_cumulative, "Simulation progress"
                );
            }
        }

        let (verdict, required_bandwidth_gbps, aws_transfer_link_monthly_cost) = match requirement
        {
            Some(req) => (
                Verdict::BandwidthRequirement {
                    gbps: req.required_bandwidth_gbps,
                    monthly_cost: req.monthly_transfer_link_cost,
                },
                req.required_bandwidth_gbps,
                req.monthly_transfer_link_cost,
            ),
            None if off_net_cumulative < on_net_cumulative => (Verdict::OffNetCheaper, 0.0, 0.0),
            None => (Verdict::OnNetCheaper, 0.0, 0.0),
        };

        info!(
            on_net_total = on_net_cumulative,
            off_net_total = off_net_cumulative,
            ?verdict,
            "Simulation complete"
        );

        Ok(SimulationResults {
            mode,
            timeline,
            verdict,
            required_bandwidth_gbps,
            aws_transfer_link_monthly_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::traffic::DailyTraffic;

    fn dataset(rows: &[(f64, f64)]) -> TrafficDataset {
        TrafficDataset::new(rows.iter().map(|&(u, r)| DailyTraffic::new(u, r)).collect()).unwrap()
    }

    fn canvas_params(horizon: u32) -> SimulationParameters {
        SimulationParameters {
            time_horizon_days: horizon,
            avg_request_size_kb: 1024.0,
            avg_num_users: 150,
            on_net_bandwidth_cost_per_gb: Some(0.1),
            off_net_bandwidth_cost_per_gb: 0.05,
            ..Default::default()
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("AWS".parse::<ComputeMode>().unwrap(), ComputeMode::Aws);
        assert_eq!(" canvas ".parse::<ComputeMode>().unwrap(), ComputeMode::Canvas);
        assert!("gcp".parse::<ComputeMode>().is_err());
    }

    #[test]
    fn test_timeline_has_one_row_per_day() {
        let data = dataset(&[(100.0, 1000.0), (200.0, 2000.0), (150.0, 1500.0)]);
        let sim = CostSimulator::from_raw(canvas_params(10), &data).unwrap();
        let results = sim.run(ComputeMode::Canvas).unwrap();

        assert_eq!(results.timeline.len(), 10);
        assert_eq!(results.timeline[0].day, 1);
        assert_eq!(results.timeline[9].day, 10);
        assert_eq!(results.required_bandwidth_gbps, 0.0);
        assert_eq!(results.aws_transfer_link_monthly_cost, 0.0);
    }

    #[test]
    fn test_upfront_cost_seeds_first_day() {
        let data = dataset(&[(10.0, 0.0)]);
        let params = SimulationParameters {
            avg_num_users: 10,
            upfront_hardware_cost_on_net: 10_000.0,
            upfront_hardware_cost_off_net: 20_000.0,
            hardware_cost_on_net_per_month: 300.0,
            ..canvas_params(2)
        };
        let results = CostSimulator::from_raw(params, &data)
            .unwrap()
            .run(ComputeMode::Canvas)
            .unwrap();

        assert!((results.timeline[0].on_net_cumulative_cost - 10_010.0).abs() < 1e-9);
        assert!((results.timeline[0].off_net_cumulative_cost - 20_000.0).abs() < 1e-9);
        assert!((results.total_on_net_cost() - 10_020.0).abs() < 1e-9);
        assert_eq!(results.verdict, Verdict::OnNetCheaper);
    }

    #[test]
    fn test_tie_favors_on_net() {
        let data = dataset(&[(10.0, 500.0)]);
        let params = SimulationParameters {
            avg_num_users: 10,
            on_net_bandwidth_cost_per_gb: Some(0.07),
            off_net_bandwidth_cost_per_gb: 0.07,
            ..canvas_params(30)
        };
        let results = CostSimulator::from_raw(params, &data)
            .unwrap()
            .run(ComputeMode::Canvas)
            .unwrap();

        assert_eq!(results.total_on_net_cost(), results.total_off_net_cost());
        assert_eq!(results.verdict, Verdict::OnNetCheaper);
    }

    #[test]
    fn test_aws_run_reports_bandwidth() {
        let data = dataset(&[(100.0, 8_640_000.0), (100.0, 8_640_000.0)]);
        let params = SimulationParameters {
            time_horizon_days: 5,
            avg_num_users: 100,
            off_net_bandwidth_cost_per_gb: 0.05,
            hardware_cost_on_net_per_month: 3000.0,
            transfer_link_cost_per_gbps: Some(1000.0),
            sla_percentage: Some(50.0),
            ..Default::default()
        };
        let sim = CostSimulator::from_raw(params, &data).unwrap();
        let results = sim.run(ComputeMode::Aws).unwrap();

        let expected = bandwidth::required_bandwidth(sim.dataset(), 500.0, 50.0, 1000.0);
        assert_eq!(results.required_bandwidth_gbps, expected.required_bandwidth_gbps);
        assert_eq!(
            results.aws_transfer_link_monthly_cost,
            expected.monthly_transfer_link_cost
        );
        assert_eq!(
            results.verdict,
            Verdict::BandwidthRequirement {
                gbps: expected.required_bandwidth_gbps,
                monthly_cost: expected.monthly_transfer_link_cost,
            }
        );

        // on-net accrues the same amount every day in AWS mode
        let daily = 100.0 + expected.daily_transfer_link_cost();
        assert!((results.timeline[4].on_net_cumulative_cost - 5.0 * daily).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_parameters_produce_no_timeline() {
        let data = dataset(&[(10.0, 10.0)]);
        let params = SimulationParameters {
            on_net_bandwidth_cost_per_gb: None,
            ..canvas_params(5)
        };
        let sim = CostSimulator::from_raw(params, &data).unwrap();
        assert!(matches!(
            sim.run(ComputeMode::Canvas),
            Err(SimulationError::ConfigurationMismatch(_))
        ));
    }

    #[test]
    fn test_run_is_repeatable() {
        let data = dataset(&[(100.0, 1000.0), (200.0, 2000.0)]);
        let sim = CostSimulator::from_raw(canvas_params(7), &data).unwrap();
        let first = sim.run(ComputeMode::Canvas).unwrap();
        let second = sim.run(ComputeMode::Canvas).unwrap();
        assert_eq!(first.timeline, second.timeline);
    }
}
