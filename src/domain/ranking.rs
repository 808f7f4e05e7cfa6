// Best performer ranking for a single raw data point
use super::chart::SeriesDescriptor;
use super::rate::conversion_rate;
use super::variation::{DataPoint, VariationId};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedSeries {
    pub variation_id: VariationId,
    pub visits: u64,
    pub conversions: u64,
    pub rate: f64,
    pub is_best: bool,
}

/// Rate every primary series at `point` and flag the ones at the maximum.
///
/// A maximum of zero flags nothing. Ties at a non-zero maximum are all flagged.
pub fn rank_series(point: &DataPoint, series: &[SeriesDescriptor]) -> Vec<RankedSeries> {
    let mut ranked: Vec<RankedSeries> = series
        .iter()
        .filter(|s| !s.role.is_auxiliary())
        .map(|s| {
            let visits = point.visits_for(&s.data_key);
            let conversions = point.conversions_for(&s.data_key);
            RankedSeries {
                variation_id: s.data_key.clone(),
                visits,
                conversions,
                rate: conversion_rate(conversions, visits),
                is_best: false,
            }
        })
        .collect();

    let max_rate = ranked.iter().map(|r| r.rate).fold(f64::NEG_INFINITY, f64::max);
    for entry in &mut ranked {
        entry.is_best = entry.rate == max_rate && entry.rate > 0.0;
    }

    ranked
}
