// Chart view models handed to the rendering front end
use super::chart::{
    ChartKind, Granularity, LineStyle, ParseOptionError, ProcessedPoint, SeriesDescriptor,
};
use super::palette::Theme;
use super::variation::VariationId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Zoom button pressed on the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
    Reset,
}

impl FromStr for ZoomStep {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "reset" => Ok(Self::Reset),
            other => Err(ParseOptionError::new("zoom step", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ZoomLevel(f64);

impl ZoomLevel {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 3.0;
    pub const STEP: f64 = 0.1;

    /// Clamp to the supported range, snapped to one decimal.
    pub fn new(level: f64) -> Self {
        if !level.is_finite() {
            return Self::default();
        }
        let snapped = (level * 10.0).round() / 10.0;
        Self(snapped.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn apply(self, step: ZoomStep) -> Self {
        match step {
            ZoomStep::In => self.zoom_in(),
            ZoomStep::Out => self.zoom_out(),
            ZoomStep::Reset => self.reset(),
        }
    }

    pub fn can_zoom_in(self) -> bool {
        self.0 < Self::MAX
    }

    pub fn can_zoom_out(self) -> bool {
        self.0 > Self::MIN
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Value-axis range with 10% padding around the plotted values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    pub fn from_points(points: &[ProcessedPoint], selected: &[VariationId]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for point in points {
            for id in selected {
                if let Some(value) = point.value(id).filter(|v| !v.is_nan()) {
                    min = min.min(value);
                    max = max.max(value);
                }
            }
        }

        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 100.0 };
        }

        let padding = (max - min) * 0.1;
        Self {
            min: (min - padding).max(0.0),
            max: max + padding,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawCounts {
    pub visits: u64,
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(flatten)]
    pub point: ProcessedPoint,
    pub label: String,
    /// Counts of the single raw day whose date equals the bucket key, not bucket totals.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub raw: BTreeMap<VariationId, RawCounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub granularity: Granularity,
    pub line_style: LineStyle,
    pub kind: ChartKind,
    pub theme: Theme,
    pub zoom: ZoomLevel,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub domain: ValueDomain,
    pub series: Vec<SeriesDescriptor>,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipEntry {
    pub variation_id: VariationId,
    pub name: String,
    pub color: String,
    pub visits: u64,
    pub conversions: u64,
    pub rate: f64,
    pub formatted_rate: String,
    pub is_best: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub entries: Vec<TooltipEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_zoom_clamps_and_steps() {
        let mut zoom = ZoomLevel::default();
        for _ in 0..30 {
            zoom = zoom.zoom_in();
        }
        assert_eq!(zoom.value(), ZoomLevel::MAX);
        assert!(!zoom.can_zoom_in());

        for _ in 0..30 {
            zoom = zoom.zoom_out();
        }
        assert_eq!(zoom.value(), ZoomLevel::MIN);
        assert!(!zoom.can_zoom_out());

        assert_eq!(zoom.apply(ZoomStep::Reset).value(), 1.0);
        assert_eq!(zoom.apply(ZoomStep::In).value(), 0.6);
        assert_eq!(ZoomLevel::default().zoom_in().zoom_in().value(), 1.2);
        assert_eq!(ZoomLevel::new(f64::NAN).value(), 1.0);
    }

    #[test]
    fn test_parse_zoom_step() {
        assert_eq!("out".parse::<ZoomStep>(), Ok(ZoomStep::Out));
        assert!("sideways".parse::<ZoomStep>().is_err());
        assert_eq!(ZoomLevel::new(1.0).apply(ZoomStep::Out).value(), 0.9);
    }

    #[test]
    fn test_domain_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let id = VariationId::from("0");
        let points: Vec<ProcessedPoint> = [10.0, 20.0]
            .into_iter()
            .map(|v| {
                let mut p = ProcessedPoint::new(date);
                p.values.insert(id.clone(), v);
                p
            })
            .collect();

        let domain = ValueDomain::from_points(&points, &[id]);
        assert!((domain.min - 9.0).abs() < 1e-9);
        assert!((domain.max - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_domain_floor_and_empty() {
        let empty = ValueDomain::from_points(&[], &[VariationId::from("0")]);
        assert_eq!(empty, ValueDomain { min: 0.0, max: 100.0 });

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let id = VariationId::from("0");
        let mut low = ProcessedPoint::new(date);
        low.values.insert(id.clone(), 0.5);
        let mut high = ProcessedPoint::new(date);
        high.values.insert(id.clone(), 50.0);

        let domain = ValueDomain::from_points(&[low, high], &[id]);
        assert_eq!(domain.min, 0.0);
    }
}
