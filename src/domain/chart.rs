// Chart domain models: plotted points, granularity, rendering options
use super::variation::VariationId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseOptionError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// One x-axis record: a bucket key plus a rate per selected variation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub values: BTreeMap<VariationId, f64>,
}

impl ProcessedPoint {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: BTreeMap::new(),
        }
    }

    pub fn value(&self, id: &VariationId) -> Option<f64> {
        self.values.get(id).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl FromStr for Granularity {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(ParseOptionError::new("time range", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Line,
    Smooth,
    Area,
    Bands,
}

impl FromStr for LineStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Self::Line),
            "smooth" => Ok(Self::Smooth),
            "area" => Ok(Self::Area),
            "bands" => Ok(Self::Bands),
            other => Err(ParseOptionError::new("line style", other)),
        }
    }
}

/// Container the rendering library draws the series into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Area,
    Composed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    Linear,
    Monotone,
}

/// What a plotted series stands for. Only `Primary` series carry a variation's
/// own line; the rest are rendering helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    Primary,
    Band,
    UpperBound,
    LowerBound,
}

impl SeriesRole {
    pub fn is_auxiliary(self) -> bool {
        !matches!(self, SeriesRole::Primary)
    }

    /// Classify a series from its display name and data key using the
    /// `_band` / `_upper` / `_lower` suffix convention.
    pub fn classify(name: &str, data_key: &str) -> Self {
        if name.contains("_band") || data_key.contains("_band") {
            SeriesRole::Band
        } else if data_key.contains("_upper") {
            SeriesRole::UpperBound
        } else if data_key.contains("_lower") {
            SeriesRole::LowerBound
        } else {
            SeriesRole::Primary
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDescriptor {
    pub data_key: VariationId,
    pub name: String,
    pub color: String,
    pub role: SeriesRole,
    pub curve: Curve,
    pub stroke_width: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f32>,
    pub in_legend: bool,
}

impl LineStyle {
    pub fn chart_kind(self) -> ChartKind {
        match self {
            LineStyle::Bands => ChartKind::Composed,
            LineStyle::Area => ChartKind::Area,
            LineStyle::Line | LineStyle::Smooth => ChartKind::Line,
        }
    }

    fn curve(self) -> Curve {
        match self {
            LineStyle::Line => Curve::Linear,
            _ => Curve::Monotone,
        }
    }

    /// Series the rendering library should draw for one variation, back to front.
    pub fn series_for(
        self,
        data_key: &VariationId,
        name: &str,
        color: &str,
    ) -> Vec<SeriesDescriptor> {
        let primary = SeriesDescriptor {
            data_key: data_key.clone(),
            name: name.to_string(),
            color: color.to_string(),
            role: SeriesRole::Primary,
            curve: self.curve(),
            stroke_width: 2,
            stroke_opacity: None,
            fill_opacity: matches!(self, LineStyle::Area).then_some(0.2),
            in_legend: true,
        };

        match self {
            LineStyle::Bands => {
                let band = SeriesDescriptor {
                    name: format!("{}_band", name),
                    role: SeriesRole::Band,
                    stroke_width: 12,
                    stroke_opacity: Some(0.2),
                    in_legend: false,
                    ..primary.clone()
                };
                vec![band, primary]
            }
            _ => vec![primary],
        }
    }
}
