use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use offnet_feasibility::io::reporting::{self, RunSummary};
use offnet_feasibility::io::traffic;
use offnet_feasibility::{ComputeMode, CostSimulator, SimulationParameters, TrafficDataset};

#[derive(Parser, Debug)]
#[command(name = "offnet-feasibility")]
#[command(about = "Compare on-net and off-net delivery cost over a traffic history", long_about = None)]
struct Args {
    /// Daily traffic CSV (num_users, num_requests). Repeat to compare periods.
    #[arg(short, long)]
    dataset: Vec<PathBuf>,

    /// Generate a synthetic sample of this many days when no dataset is given.
    #[arg(long, default_value_t = 90)]
    synthetic_days: usize,

    /// Seed for the synthetic sample.
    #[arg(long, default_value_t = 2015)]
    seed: u64,

    /// Compute mode: aws or canvas.
    #[arg(short, long, default_value = "canvas")]
    mode: ComputeMode,

    /// TOML parameter file; flags below override its values.
    #[arg(short, long)]
    params: Option<PathBuf>,

    #[arg(long)]
    time_horizon_days: Option<u32>,
    #[arg(long)]
    avg_request_size_kb: Option<f64>,
    /// Target average users. Defaults to the dataset's own mean.
    #[arg(long)]
    avg_num_users: Option<u32>,
    #[arg(long)]
    off_net_cost_per_gb: Option<f64>,
    #[arg(long)]
    on_net_cost_per_gb: Option<f64>,
    #[arg(long)]
    hw_cost_on_net: Option<f64>,
    #[arg(long)]
    hw_cost_off_net: Option<f64>,
    #[arg(long)]
    upfront_cost_on_net: Option<f64>,
    #[arg(long)]
    upfront_cost_off_net: Option<f64>,
    #[arg(long)]
    hardware_life_cycle_years: Option<u32>,
    /// Transfer link cost ($/Gbps per month), AWS mode.
    #[arg(long)]
    transfer_link_cost_per_gbps: Option<f64>,
    /// SLA percentage for requests, AWS mode.
    #[arg(long)]
    sla_percentage: Option<f64>,

    /// Write the per-day timeline as CSV.
    #[arg(long)]
    timeline_out: Option<PathBuf>,

    /// Write run summaries as JSON.
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn parameters(&self) -> Result<SimulationParameters> {
        let mut params = match &self.params {
            Some(path) => SimulationParameters::from_toml_file(path)
                .with_context(|| format!("Failed to read parameters from {}", path.display()))?,
            None => SimulationParameters::default(),
        };

        if let Some(v) = self.time_horizon_days {
            params.time_horizon_days = v;
        }
        if let Some(v) = self.avg_request_size_kb {
            params.avg_request_size_kb = v;
        }
        if let Some(v) = self.avg_num_users {
            params.avg_num_users = v;
        }
        if let Some(v) = self.off_net_cost_per_gb {
            params.off_net_bandwidth_cost_per_gb = v;
        }
        if let Some(v) = self.on_net_cost_per_gb {
            params.on_net_bandwidth_cost_per_gb = Some(v);
        }
        if let Some(v) = self.hw_cost_on_net {
            params.hardware_cost_on_net_per_month = v;
        }
        if let Some(v) = self.hw_cost_off_net {
            params.hardware_cost_off_net_per_month = v;
        }
        if let Some(v) = self.upfront_cost_on_net {
            params.upfront_hardware_cost_on_net = v;
        }
        if let Some(v) = self.upfront_cost_off_net {
            params.upfront_hardware_cost_off_net = v;
        }
        if let Some(v) = self.hardware_life_cycle_years {
            params.hardware_life_cycle_years = v;
        }
        if let Some(v) = self.transfer_link_cost_per_gbps {
            params.transfer_link_cost_per_gbps = Some(v);
        }
        if let Some(v) = self.sla_percentage {
            params.sla_percentage = Some(v);
        }

        Ok(params)
    }

    fn datasets(&self) -> Result<Vec<(String, TrafficDataset)>> {
        if self.dataset.is_empty() {
            warn!(
                days = self.synthetic_days,
                seed = self.seed,
                "No dataset given; using a synthetic sample"
            );
            let sample = traffic::generate_synthetic_traffic(
                self.synthetic_days,
                1000.0,
                25.0,
                0.1,
                self.seed,
            )?;
            return Ok(vec![("synthetic".to_string(), sample)]);
        }

        self.dataset
            .iter()
            .map(|path| {
                let dataset = traffic::load_traffic_csv(path)
                    .with_context(|| format!("Failed to load dataset {}", path.display()))?;
                Ok::<_, anyhow::Error>((dataset_label(path), dataset))
            })
            .collect()
    }
}

fn dataset_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Adds `-label` before the extension when several datasets share one output path.
fn output_path(base: &Path, label: &str, multiple: bool) -> PathBuf {
    if !multiple {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match base.extension() {
        Some(ext) => format!("{}-{}.{}", stem, label, ext.to_string_lossy()),
        None => format!("{}-{}", stem, label),
    };
    base.with_file_name(file_name)
}

/// Filter used when `RUST_LOG` is not set.
fn default_log_directive(verbose: bool) -> &'static str {
    if verbose {
        "offnet_feasibility=debug"
    } else {
        "offnet_feasibility=info"
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_directive(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Truncated mean user count of `raw`, used when no target audience is set.
fn dataset_audience(raw: &TrafficDataset) -> Result<u32> {
    let mean = raw.mean_users();
    if !mean.is_finite() || mean >= u32::MAX as f64 + 1.0 {
        anyhow::bail!(
            "dataset mean of {} users does not fit avg_num_users; pass --avg-num-users",
            mean
        );
    }
    Ok((mean as u32).max(1))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    info!("offnet-feasibility starting…");

    let base_params = args.parameters()?;
    let datasets = args.datasets()?;
    let multiple = datasets.len() > 1;

    let mut summaries = Vec::new();
    for (label, raw) in &datasets {
        let mut params = base_params.clone();
        if params.avg_num_users == 0 {
            // Keep the dataset's own audience size
            params.avg_num_users = dataset_audience(raw)
                .with_context(|| format!("Cannot size the audience for dataset {}", label))?;
        }

        let simulator = CostSimulator::from_raw(params, raw)
            .with_context(|| format!("Failed to prepare dataset {}", label))?;
        let results = simulator
            .run(args.mode)
            .with_context(|| format!("Simulation failed for dataset {}", label))?;

        if let Some(base) = &args.timeline_out {
            reporting::write_timeline_csv(output_path(base, label, multiple), &results.timeline)?;
        }

        let summary = RunSummary::new(label, &results);
        println!("{}", reporting::render_summary(&summary));
        summaries.push(summary);
    }

    if let Some(path) = &args.summary_out {
        reporting::write_summary_json(path, &summaries)?;
    }

    Ok(())
}
