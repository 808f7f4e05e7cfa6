// Conversion rate computation and per-day projection
use super::chart::ProcessedPoint;
use super::variation::{ChartDataset, VariationId};

/// Conversion rate in percent. Zero visits yield a rate of zero.
pub fn conversion_rate(conversions: u64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    conversions as f64 / visits as f64 * 100.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One point per raw data point, same order, populated only for `selected`.
pub fn project_daily(dataset: &ChartDataset, selected: &[VariationId]) -> Vec<ProcessedPoint> {
    dataset
        .data
        .iter()
        .map(|point| {
            let mut processed = ProcessedPoint::new(point.date);
            for id in selected {
                let rate = conversion_rate(point.conversions_for(id), point.visits_for(id));
                processed.values.insert(id.clone(), round2(rate));
            }
            processed
        })
        .collect()
}
