// src/simulation/config.rs

use crate::error::{Result, SimulationError};
use crate::simulation::engine::ComputeMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIME_HORIZON_DAYS: u32 = 90;
pub const DEFAULT_AVG_REQUEST_SIZE_KB: f64 = 500.0;
pub const DEFAULT_HARDWARE_LIFE_CYCLE_YEARS: u32 = 5;
pub const DEFAULT_TRANSFER_LINK_COST_PER_GBPS: f64 = 1000.0;
pub const DEFAULT_SLA_PERCENTAGE: f64 = 95.0;

/// Unit costs, hardware lifecycle and traffic sizing for one simulation run.
///
/// Mode-specific inputs are optional: `on_net_bandwidth_cost_per_gb` is only
/// read in Canvas mode, `transfer_link_cost_per_gbps` and `sla_percentage`
/// only in AWS mode. [`SimulationParameters::validate`] refuses a run whose
/// mode needs a value that was left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub time_horizon_days: u32,
    pub avg_request_size_kb: f64,
    /// Target mean user count the dataset is rescaled to. Zero means unset.
    pub avg_num_users: u32,
    pub off_net_bandwidth_cost_per_gb: f64,
    pub on_net_bandwidth_cost_per_gb: Option<f64>,
    pub hardware_cost_on_net_per_month: f64,
    pub hardware_cost_off_net_per_month: f64,
    /// Charged on day 0 and again at every lifecycle boundary.
    pub upfront_hardware_cost_on_net: f64,
    pub upfront_hardware_cost_off_net: f64,
    pub hardware_life_cycle_years: u32,
    /// Monthly cost of one provisioned Gbps of transfer link.
    pub transfer_link_cost_per_gbps: Option<f64>,
    pub sla_percentage: Option<f64>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            time_horizon_days: DEFAULT_TIME_HORIZON_DAYS,
            avg_request_size_kb: DEFAULT_AVG_REQUEST_SIZE_KB,
            avg_num_users: 0,
            off_net_bandwidth_cost_per_gb: 0.0,
            on_net_bandwidth_cost_per_gb: None,
            hardware_cost_on_net_per_month: 0.0,
            hardware_cost_off_net_per_month: 0.0,
            upfront_hardware_cost_on_net: 0.0,
            upfront_hardware_cost_off_net: 0.0,
            hardware_life_cycle_years: DEFAULT_HARDWARE_LIFE_CYCLE_YEARS,
            transfer_link_cost_per_gbps: Some(DEFAULT_TRANSFER_LINK_COST_PER_GBPS),
            sla_percentage: Some(DEFAULT_SLA_PERCENTAGE),
        }
    }
}

impl SimulationParameters {
    /// Reads parameters from a TOML file. Absent keys take their defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn hardware_life_cycle_days(&self) -> usize {
        self.hardware_life_cycle_years as usize * 365
    }

    /// Checks every precondition for running in `mode`.
    pub fn validate(&self, mode: ComputeMode) -> Result<()> {
        if self.time_horizon_days == 0 {
            return Err(SimulationError::InvalidInput(
                "time_horizon_days must be at least 1".to_string(),
            ));
        }
        if !self.avg_request_size_kb.is_finite() || self.avg_request_size_kb <= 0.0 {
            return Err(SimulationError::InvalidInput(format!(
                "avg_request_size_kb must be positive, got {}",
                self.avg_request_size_kb
            )));
        }
        if self.avg_num_users == 0 {
            return Err(SimulationError::InvalidInput(
                "avg_num_users must be at least 1".to_string(),
            ));
        }
        if self.hardware_life_cycle_years == 0 {
            return Err(SimulationError::InvalidInput(
                "hardware_life_cycle_years must be at least 1".to_string(),
            ));
        }

        non_negative("off_net_bandwidth_cost_per_gb", self.off_net_bandwidth_cost_per_gb)?;
        non_negative("hardware_cost_on_net_per_month", self.hardware_cost_on_net_per_month)?;
        non_negative("hardware_cost_off_net_per_month", self.hardware_cost_off_net_per_month)?;
        non_negative("upfront_hardware_cost_on_net", self.upfront_hardware_cost_on_net)?;
        non_negative("upfront_hardware_cost_off_net", self.upfront_hardware_cost_off_net)?;

        match mode {
            ComputeMode::Canvas => {
                let cost = required(
                    "on_net_bandwidth_cost_per_gb",
                    self.on_net_bandwidth_cost_per_gb,
                    mode,
                )?;
                non_negative("on_net_bandwidth_cost_per_gb", cost)?;
            }
            ComputeMode::Aws => {
                let link = required(
                    "transfer_link_cost_per_gbps",
                    self.transfer_link_cost_per_gbps,
                    mode,
                )?;
                non_negative("transfer_link_cost_per_gbps", link)?;

                let sla = required("sla_percentage", self.sla_percentage, mode)?;
                if !(0.0..=100.0).contains(&sla) {
                    return Err(SimulationError::InvalidInput(format!(
                        "sla_percentage must lie in [0, 100], got {}",
                        sla
                    )));
                }
            }
        }

        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn required(name: &str, value: Option<f64>, mode: ComputeMode) -> Result<f64> {
    value.ok_or_else(|| {
        SimulationError::ConfigurationMismatch(format!(
            "{} mode requires {} to be set (use 0 to disable it explicitly)",
            mode, name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_params() -> SimulationParameters {
        SimulationParameters {
            avg_num_users: 150,
            on_net_bandwidth_cost_per_gb: Some(0.10),
            off_net_bandwidth_cost_per_gb: 0.05,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let params = SimulationParameters::default();
        assert_eq!(params.time_horizon_days, 90);
        assert_eq!(params.avg_request_size_kb, 500.0);
        assert_eq!(params.hardware_life_cycle_years, 5);
        assert_eq!(params.transfer_link_cost_per_gbps, Some(1000.0));
        assert_eq!(params.sla_percentage, Some(95.0));
        assert_eq!(params.hardware_life_cycle_days(), 1825);
        assert_eq!(params.avg_num_users, 0);
    }

    #[test]
    fn test_zero_horizon_is_invalid() {
        let params = SimulationParameters {
            time_horizon_days: 0,
            ..canvas_params()
        };
        let err = params.validate(ComputeMode::Canvas).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
    }

    #[test]
    fn test_negative_cost_is_invalid() {
        let params = SimulationParameters {
            hardware_cost_off_net_per_month: -5.0,
            ..canvas_params()
        };
        assert!(matches!(
            params.validate(ComputeMode::Canvas),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_canvas_requires_on_net_bandwidth_cost() {
        let params = SimulationParameters {
            on_net_bandwidth_cost_per_gb: None,
            ..canvas_params()
        };
        assert!(matches!(
            params.validate(ComputeMode::Canvas),
            Err(SimulationError::ConfigurationMismatch(_))
        ));
        // AWS mode never reads it
        assert!(params.validate(ComputeMode::Aws).is_ok());
    }

    #[test]
    fn test_aws_requires_sla_and_link_cost() {
        let params = SimulationParameters {
            sla_percentage: None,
            ..canvas_params()
        };
        assert!(matches!(
            params.validate(ComputeMode::Aws),
            Err(SimulationError::ConfigurationMismatch(_))
        ));

        let params = SimulationParameters {
            transfer_link_cost_per_gbps: None,
            ..canvas_params()
        };
        assert!(matches!(
            params.validate(ComputeMode::Aws),
            Err(SimulationError::ConfigurationMismatch(_))
        ));
    }

    #[test]
    fn test_sla_out_of_range() {
        let params = SimulationParameters {
            sla_percentage: Some(120.0),
            ..canvas_params()
        };
        assert!(matches!(
            params.validate(ComputeMode::Aws),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_toml_uses_defaults_for_missing_keys() {
        let params = SimulationParameters::from_toml_str(
            r#"
            time_horizon_days = 365
            avg_num_users = 2500
            off_net_bandwidth_cost_per_gb = 0.05
            on_net_bandwidth_cost_per_gb = 0.1
            upfront_hardware_cost_on_net = 10000.0
            "#,
        )
        .unwrap();

        assert_eq!(params.time_horizon_days, 365);
        assert_eq!(params.avg_num_users, 2500);
        assert_eq!(params.on_net_bandwidth_cost_per_gb, Some(0.1));
        assert_eq!(params.upfront_hardware_cost_on_net, 10000.0);
        assert_eq!(params.avg_request_size_kb, 500.0);
        assert_eq!(params.sla_percentage, Some(95.0));
        assert!(params.validate(ComputeMode::Canvas).is_ok());
    }

    #[test]
    fn test_toml_type_error_is_reported() {
        let err = SimulationParameters::from_toml_str("time_horizon_days = \"soon\"").unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
    }
}
