// src/io/traffic.rs

use crate::error::{Result, SimulationError};
use crate::model::traffic::{DailyTraffic, TrafficDataset};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Loads a daily traffic CSV with `num_users` and `num_requests` columns.
///
/// Other columns (dates, notes) are ignored.
pub fn load_traffic_csv<P: AsRef<Path>>(path: P) -> Result<TrafficDataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let dataset = read_traffic_csv(file)?;
    info!(
        path = %path.display(),
        days = dataset.len(),
        mean_users = dataset.mean_users(),
        "Loaded traffic dataset"
    );
    Ok(dataset)
}

pub fn read_traffic_csv<R: Read>(reader: R) -> Result<TrafficDataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        let row: DailyTraffic = record?;
        rows.push(row);
    }

    TrafficDataset::new(rows)
}

/// Every day carries the same audience and request load.
pub fn generate_constant_traffic(
    days: usize,
    users: f64,
    requests_per_user: f64,
) -> Result<TrafficDataset> {
    TrafficDataset::new(vec![DailyTraffic::new(users, users * requests_per_user); days])
}

/// Generates a reproducible sample history with a weekly shape.
///
/// Weekdays run slightly above `mean_users`, weekends below, and each day
/// is perturbed by Normal noise with standard deviation
/// `volatility * mean_users`. The same `seed` always yields the same series.
///
/// # Arguments
/// * `days` - Length of the series.
/// * `mean_users` - Typical daily active users.
/// * `requests_per_user` - Requests each active user sends per day.
/// * `volatility` - Relative day-to-day noise (e.g., 0.1 for 10%).
/// * `seed` - RNG seed.
pub fn generate_synthetic_traffic(
    days: usize,
    mean_users: f64,
    requests_per_user: f64,
    volatility: f64,
    seed: u64,
) -> Result<TrafficDataset> {
    let noise = Normal::new(0.0, volatility * mean_users).map_err(|e| {
        SimulationError::InvalidInput(format!("invalid traffic volatility {}: {}", volatility, e))
    })?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut rows = Vec::with_capacity(days);
    for day in 0..days {
        let weekly_factor = if day % 7 < 5 { 1.05 } else { 0.875 };
        let sample: f64 = mean_users * weekly_factor + noise.sample(&mut rng);

        // Audience cannot go negative
        let users = sample.max(0.0).round();
        rows.push(DailyTraffic::new(users, users * requests_per_user));
    }

    TrafficDataset::new(rows)
}
