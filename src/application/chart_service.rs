// Chart service - Use case for building chart views and tooltips
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::aggregate::process;
use crate::domain::chart::{Granularity, LineStyle, SeriesDescriptor};
use crate::domain::format::{
    format_date, format_date_full, format_percentage, Locale, DEFAULT_DECIMALS,
};
use crate::domain::palette::Theme;
use crate::domain::ranking::rank_series;
use crate::domain::selection::Selection;
use crate::domain::variation::{ChartDataset, DataPoint, VariationId};
use crate::domain::view::{
    ChartPoint, ChartView, RawCounts, Tooltip, TooltipEntry, ValueDomain, ZoomLevel,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("unknown variation `{0}`")]
    UnknownVariation(VariationId),
}

/// Everything the front end controls, passed explicitly on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub selection: Selection,
    pub granularity: Granularity,
    pub line_style: LineStyle,
    pub theme: Theme,
    pub zoom: ZoomLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationSummary {
    pub id: VariationId,
    pub name: String,
    pub color: String,
    pub selected: bool,
    /// The last selected variation cannot be deselected.
    pub locked: bool,
}

#[derive(Clone)]
pub struct ChartService {
    dataset: Arc<ChartDataset>,
    by_date: Arc<HashMap<NaiveDate, usize>>,
    locale: Locale,
}

impl ChartService {
    pub fn new(dataset: ChartDataset, locale: Locale) -> Self {
        let mut by_date = HashMap::with_capacity(dataset.data.len());
        for (idx, point) in dataset.data.iter().enumerate() {
            // first occurrence wins, matching a linear search
            by_date.entry(point.date).or_insert(idx);
        }

        Self {
            dataset: Arc::new(dataset),
            by_date: Arc::new(by_date),
            locale,
        }
    }

    pub async fn load(
        repository: Arc<dyn DatasetRepository>,
        locale: Locale,
    ) -> anyhow::Result<Self> {
        let dataset = repository.load_dataset().await?;
        tracing::info!(
            "Loaded dataset with {} variations and {} data points",
            dataset.variations.len(),
            dataset.data.len()
        );
        Ok(Self::new(dataset, locale))
    }

    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    pub fn variations(&self, theme: Theme, selection: &Selection) -> Vec<VariationSummary> {
        self.dataset
            .variations
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                let id = v.variation_id();
                let selected = selection.contains(&id);
                VariationSummary {
                    name: v.name.clone(),
                    color: theme.color_at(idx).to_string(),
                    selected,
                    locked: selected && selection.len() == 1,
                    id,
                }
            })
            .collect()
    }

    /// Validate requested ids against the dataset. No ids selects the first
    /// variation.
    pub fn resolve_selection(&self, ids: &[VariationId]) -> Result<Selection, ChartError> {
        if ids.is_empty() {
            return Ok(Selection::default_for(&self.dataset));
        }

        if let Some(unknown) = ids.iter().find(|id| self.dataset.find_variation(id).is_none()) {
            return Err(ChartError::UnknownVariation(unknown.clone()));
        }

        Ok(Selection::new(ids.iter().cloned()))
    }

    /// Flip one variation in or out of `selection`.
    pub fn toggle_selection(
        &self,
        mut selection: Selection,
        id: VariationId,
    ) -> Result<Selection, ChartError> {
        if self.dataset.find_variation(&id).is_none() {
            return Err(ChartError::UnknownVariation(id));
        }
        selection.toggle(id);
        Ok(selection)
    }

    /// Color keyed by dataset position, falling back to selection position.
    fn color_for(&self, id: &VariationId, selection_idx: usize, theme: Theme) -> &'static str {
        let idx = self
            .dataset
            .find_variation(id)
            .map(|(idx, _)| idx)
            .unwrap_or(selection_idx);
        theme.color_at(idx)
    }

    pub fn series(&self, request: &ChartRequest) -> Vec<SeriesDescriptor> {
        request
            .selection
            .ids()
            .iter()
            .enumerate()
            .flat_map(|(idx, id)| {
                let name = self.dataset.display_name(id);
                let color = self.color_for(id, idx, request.theme);
                request.line_style.series_for(id, &name, color)
            })
            .collect()
    }

    fn point_on(&self, date: NaiveDate) -> Option<&DataPoint> {
        self.by_date.get(&date).map(|&idx| &self.dataset.data[idx])
    }

    pub fn build_view(&self, request: &ChartRequest) -> ChartView {
        let selected = request.selection.ids();
        let processed = process(&self.dataset, selected, request.granularity);
        let domain = ValueDomain::from_points(&processed, selected);

        tracing::debug!(
            "Building {:?} view for {} variations: {} points",
            request.granularity,
            selected.len(),
            processed.len()
        );

        let points = processed
            .into_iter()
            .map(|point| {
                let raw = self
                    .point_on(point.date)
                    .map(|day| raw_counts(day, selected))
                    .unwrap_or_default();
                ChartPoint {
                    label: format_date(point.date, request.granularity, self.locale),
                    point,
                    raw,
                }
            })
            .collect();

        ChartView {
            granularity: request.granularity,
            line_style: request.line_style,
            kind: request.line_style.chart_kind(),
            theme: request.theme,
            zoom: request.zoom,
            can_zoom_in: request.zoom.can_zoom_in(),
            can_zoom_out: request.zoom.can_zoom_out(),
            domain,
            series: self.series(request),
            points,
        }
    }

    /// Point details for the raw data point at `date`, if there is one.
    pub fn tooltip(&self, request: &ChartRequest, date: NaiveDate) -> Option<Tooltip> {
        let Some(day) = self.point_on(date) else {
            tracing::debug!("No raw data point on {}", date);
            return None;
        };

        let series = self.series(request);
        let primaries = series.iter().filter(|s| !s.role.is_auxiliary());
        let entries = primaries
            .zip(rank_series(day, &series))
            .map(|(descriptor, ranked)| TooltipEntry {
                name: descriptor.name.clone(),
                color: descriptor.color.clone(),
                formatted_rate: format_percentage(ranked.rate, DEFAULT_DECIMALS),
                variation_id: ranked.variation_id,
                visits: ranked.visits,
                conversions: ranked.conversions,
                rate: ranked.rate,
                is_best: ranked.is_best,
            })
            .collect();

        Some(Tooltip {
            title: format_date_full(date),
            entries,
        })
    }
}

fn raw_counts(day: &DataPoint, selected: &[VariationId]) -> BTreeMap<VariationId, RawCounts> {
    selected
        .iter()
        .map(|id| {
            let counts = RawCounts {
                visits: day.visits_for(id),
                conversions: day.conversions_for(id),
            };
            (id.clone(), counts)
        })
        .collect()
}
