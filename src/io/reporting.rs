// src/io/reporting.rs

use crate::error::Result;
use crate::simulation::engine::{ComputeMode, SimulationResults, TimelineRow, Verdict};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::info;

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::OffNetCheaper => write!(f, "Off-net solution is more cost-effective."),
            Verdict::OnNetCheaper => write!(f, "On-net solution is more cost-effective."),
            Verdict::BandwidthRequirement { gbps, monthly_cost } => write!(
                f,
                "Required bandwidth: {:.2} Gbps. Transfer link cost: ${:.2}/month.",
                gbps, monthly_cost
            ),
        }
    }
}

/// Headline figures of a run, as written to the JSON summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub dataset: String,
    pub mode: ComputeMode,
    pub days: usize,
    pub verdict: Verdict,
    pub recommendation: String,
    pub total_on_net_cost: f64,
    pub total_off_net_cost: f64,
    pub required_bandwidth_gbps: f64,
    pub aws_transfer_link_monthly_cost: f64,
}

impl RunSummary {
    pub fn new(dataset: &str, results: &SimulationResults) -> Self {
        Self {
            dataset: dataset.to_string(),
            mode: results.mode,
            days: results.timeline.len(),
            verdict: results.verdict,
            recommendation: results.verdict.to_string(),
            total_on_net_cost: results.total_on_net_cost(),
            total_off_net_cost: results.total_off_net_cost(),
            required_bandwidth_gbps: results.required_bandwidth_gbps,
            aws_transfer_link_monthly_cost: results.aws_transfer_link_monthly_cost,
        }
    }
}

/// Writes the per-day timeline to a CSV file.
///
/// # Arguments
/// * `file_path` - Destination (e.g., "results/q1_timeline.csv").
/// * `data` - Timeline rows from the simulation engine.
pub fn write_timeline_csv<P: AsRef<Path>>(file_path: P, data: &[TimelineRow]) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    wtr.flush()?;

    info!(rows = data.len(), path = %path.display(), "Exported timeline");
    Ok(())
}

/// Writes run summaries as pretty-printed JSON.
pub fn write_summary_json<P: AsRef<Path>>(file_path: P, summaries: &[RunSummary]) -> Result<()> {
    let path = file_path.as_ref();
    let json = serde_json::to_string_pretty(summaries)?;
    std::fs::write(path, json)?;

    info!(runs = summaries.len(), path = %path.display(), "Exported summary");
    Ok(())
}

/// Human-readable summary block for the terminal.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} | {} mode | {} days\n",
        summary.dataset, summary.mode, summary.days
    ));
    out.push_str(&format!("  {}\n", summary.recommendation));
    out.push_str(&format!(
        "  Total On-Net Cost:  ${:>14.2}\n",
        summary.total_on_net_cost
    ));
    out.push_str(&format!(
        "  Total Off-Net Cost: ${:>14.2}\n",
        summary.total_off_net_cost
    ));
    if summary.mode == ComputeMode::Aws {
        out.push_str(&format!(
            "  Required Bandwidth: {:.2} Gbps\n  Transfer Link Cost: ${:.2}/month\n",
            summary.required_bandwidth_gbps, summary.aws_transfer_link_monthly_cost
        ));
    }
    out
}
