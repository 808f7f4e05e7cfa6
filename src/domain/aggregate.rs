// Calendar bucket aggregation of daily conversion rates
use super::chart::{Granularity, ProcessedPoint};
use super::rate::{project_daily, round2};
use super::variation::{ChartDataset, VariationId};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Sun).first_day()
}

/// Saturday closing the week that starts on [`week_start`].
pub fn week_end(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Sun).last_day()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

impl Granularity {
    /// Date identifying the bucket `date` falls into.
    pub fn bucket_key(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => week_start(date),
            Granularity::Month => month_start(date),
        }
    }
}

/// Collapse daily points into calendar buckets by averaging each variation's
/// rate. Day granularity returns the input untouched.
///
/// Input is expected to be a daily projection; feeding already bucketed
/// points back in is not supported.
pub fn aggregate(points: &[ProcessedPoint], granularity: Granularity) -> Vec<ProcessedPoint> {
    if granularity == Granularity::Day {
        return points.to_vec();
    }

    let mut buckets: BTreeMap<NaiveDate, Vec<&ProcessedPoint>> = BTreeMap::new();
    for point in points {
        buckets
            .entry(granularity.bucket_key(point.date))
            .or_default()
            .push(point);
    }

    tracing::debug!(
        "Aggregated {} daily points into {} {:?} buckets",
        points.len(),
        buckets.len(),
        granularity
    );

    // BTreeMap iteration yields buckets in ascending key order
    buckets
        .into_iter()
        .map(|(key, members)| average_bucket(key, &members))
        .collect()
}

fn average_bucket(key: NaiveDate, members: &[&ProcessedPoint]) -> ProcessedPoint {
    let mut aggregated = ProcessedPoint::new(key);
    let Some(first) = members.first() else {
        return aggregated;
    };

    for id in first.values.keys() {
        if let Some(mean) = mean_of(members, id) {
            aggregated.values.insert(id.clone(), round2(mean));
        }
    }

    aggregated
}

fn mean_of(members: &[&ProcessedPoint], id: &VariationId) -> Option<f64> {
    let values: Vec<f64> = members
        .iter()
        .filter_map(|p| p.value(id))
        .filter(|v| !v.is_nan())
        .collect();

    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Project the raw dataset for `selected` and bucket it at `granularity`.
pub fn process(
    dataset: &ChartDataset,
    selected: &[VariationId],
    granularity: Granularity,
) -> Vec<ProcessedPoint> {
    aggregate(&project_daily(dataset, selected), granularity)
}
