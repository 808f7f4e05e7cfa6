// HTTP request handlers
use crate::application::chart_service::{ChartRequest, VariationSummary};
use crate::domain::chart::ParseOptionError;
use crate::domain::selection::Selection;
use crate::domain::variation::VariationId;
use crate::domain::view::{ChartView, Tooltip, ZoomLevel, ZoomStep};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::extract::{Query, State};
use axum::response::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

/// Chart options as query parameters; anything left out falls back to the
/// configured display defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// Comma separated variation ids
    pub variations: Option<String>,
    pub range: Option<String>,
    pub style: Option<String>,
    pub theme: Option<String>,
    pub zoom: Option<String>,
    /// `in`, `out` or `reset`, applied on top of `zoom`
    pub zoom_step: Option<String>,
    /// Variation id to flip in or out of the selection
    pub toggle: Option<String>,
    pub date: Option<String>,
}

fn parse_or<T>(value: Option<&str>, default: T) -> Result<T, ParseOptionError>
where
    T: FromStr<Err = ParseOptionError>,
{
    match value {
        Some(raw) if !raw.is_empty() => raw.parse(),
        _ => Ok(default),
    }
}

fn parse_ids(raw: Option<&str>) -> Vec<VariationId> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(VariationId::from)
        .collect()
}

fn parse_zoom(query: &ChartQuery) -> Result<ZoomLevel, ApiError> {
    let zoom = match query.zoom.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<f64>()
            .map(ZoomLevel::new)
            .map_err(|_| ApiError::bad_request(format!("invalid zoom `{}`", raw)))?,
        _ => ZoomLevel::default(),
    };

    match query.zoom_step.as_deref() {
        Some(raw) if !raw.is_empty() => Ok(zoom.apply(raw.parse::<ZoomStep>()?)),
        _ => Ok(zoom),
    }
}

fn selection(state: &AppState, query: &ChartQuery) -> Result<Selection, ApiError> {
    let selection = state
        .chart_service
        .resolve_selection(&parse_ids(query.variations.as_deref()))?;

    match query.toggle.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Ok(state
            .chart_service
            .toggle_selection(selection, VariationId::from(id))?),
        _ => Ok(selection),
    }
}

fn chart_request(state: &AppState, query: &ChartQuery) -> Result<ChartRequest, ApiError> {
    let defaults = state.display;

    Ok(ChartRequest {
        selection: selection(state, query)?,
        granularity: parse_or(query.range.as_deref(), defaults.granularity)?,
        line_style: parse_or(query.style.as_deref(), defaults.line_style)?,
        theme: parse_or(query.theme.as_deref(), defaults.theme)?,
        zoom: parse_zoom(query)?,
    })
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// GET /variations?theme=dark&variations=0,10001&toggle=10002
pub async fn list_variations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Vec<VariationSummary>>, ApiError> {
    let theme = parse_or(query.theme.as_deref(), state.display.theme)?;
    let selection = selection(&state, &query)?;
    Ok(Json(state.chart_service.variations(theme, &selection)))
}

/// GET /chart?variations=0,10001&range=week&style=bands&theme=dark&zoom=1.2&zoom_step=in
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartView>, ApiError> {
    let request = chart_request(&state, &query)?;
    Ok(Json(state.chart_service.build_view(&request)))
}

/// GET /chart/tooltip?date=2024-01-01&variations=0,10001
pub async fn get_tooltip(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Tooltip>, ApiError> {
    let raw_date = query
        .date
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("missing `date` parameter"))?;
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|e| ApiError::bad_request(format!("invalid date `{}`: {}", raw_date, e)))?;

    let request = chart_request(&state, &query)?;
    state
        .chart_service
        .tooltip(&request, date)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no data for {}", raw_date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::ChartService;
    use crate::domain::chart::{Granularity, LineStyle};
    use crate::domain::format::Locale;
    use crate::domain::palette::Theme;
    use crate::domain::variation::{ChartDataset, DataPoint, Variation};
    use crate::infrastructure::config::DisplaySettings;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn state() -> Arc<AppState> {
        let date = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let dataset = ChartDataset::new(
            vec![Variation::new(None, "Original"), Variation::new(Some(10001), "A")],
            vec![
                DataPoint::new(date(1))
                    .with_counts("0", 100, 25)
                    .with_counts("10001", 100, 30),
                DataPoint::new(date(2))
                    .with_counts("0", 100, 0)
                    .with_counts("10001", 0, 0),
            ],
        );

        Arc::new(AppState {
            chart_service: ChartService::new(dataset, Locale::Ru),
            display: DisplaySettings::default(),
        })
    }

    #[tokio::test]
    async fn test_chart_defaults() {
        let Json(view) = get_chart(State(state()), Query(ChartQuery::default()))
            .await
            .unwrap();

        assert_eq!(view.granularity, Granularity::Day);
        assert_eq!(view.line_style, LineStyle::Line);
        assert_eq!(view.theme, Theme::Light);
        assert_eq!(view.series.len(), 1);
        assert_eq!(view.points[0].point.value(&VariationId::from("0")), Some(25.0));
        assert_eq!(view.zoom.value(), 1.0);
    }

    #[tokio::test]
    async fn test_chart_with_options() {
        let query = ChartQuery {
            variations: Some("10001, 0".to_string()),
            range: Some("week".to_string()),
            style: Some("bands".to_string()),
            theme: Some("dark".to_string()),
            zoom: Some("7".to_string()),
            ..Default::default()
        };

        let Json(view) = get_chart(State(state()), Query(query)).await.unwrap();
        assert_eq!(view.series.len(), 4);
        assert_eq!(view.series[1].data_key, VariationId::from("10001"));
        assert_eq!(view.series[1].color, "#4a90e2");
        assert_eq!(view.zoom.value(), ZoomLevel::MAX);
        // 2024-01-01 is a Monday, bucketed under Sunday 2023-12-31
        assert_eq!(view.points.len(), 1);
        assert_eq!(view.points[0].point.value(&VariationId::from("10001")), Some(15.0));
    }

    #[tokio::test]
    async fn test_bad_options_are_rejected() {
        let query = ChartQuery {
            range: Some("year".to_string()),
            ..Default::default()
        };
        let err = get_chart(State(state()), Query(query)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let query = ChartQuery {
            variations: Some("42".to_string()),
            ..Default::default()
        };
        let err = get_chart(State(state()), Query(query)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "unknown variation `42`");
    }

    #[tokio::test]
    async fn test_tooltip() {
        let query = ChartQuery {
            variations: Some("0,10001".to_string()),
            date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let Json(tooltip) = get_tooltip(State(state()), Query(query)).await.unwrap();
        assert_eq!(tooltip.title, "01/01/2024");
        assert!(tooltip.entries[1].is_best);
        assert!(!tooltip.entries[0].is_best);

        let query = ChartQuery {
            variations: Some("0,10001".to_string()),
            date: Some("2024-01-02".to_string()),
            ..Default::default()
        };
        let Json(tooltip) = get_tooltip(State(state()), Query(query)).await.unwrap();
        assert!(tooltip.entries.iter().all(|e| !e.is_best));
    }

    #[tokio::test]
    async fn test_tooltip_errors() {
        let missing = ChartQuery {
            date: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        let err = get_tooltip(State(state()), Query(missing)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let malformed = ChartQuery {
            date: Some("01/03/2024".to_string()),
            ..Default::default()
        };
        let err = get_tooltip(State(state()), Query(malformed)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_variations() {
        let query = ChartQuery {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        let Json(variations) = list_variations(State(state()), Query(query)).await.unwrap();
        assert_eq!(variations.len(), 2);
        assert_eq!(variations[0].color, "#c7c5d0");
        assert_eq!(variations[1].name, "A");
        assert!(variations[0].selected && variations[0].locked);
        assert!(!variations[1].selected);

        let query = ChartQuery {
            toggle: Some("10001".to_string()),
            ..Default::default()
        };
        let Json(variations) = list_variations(State(state()), Query(query)).await.unwrap();
        assert!(variations.iter().all(|v| v.selected && !v.locked));
    }

    #[tokio::test]
    async fn test_non_numeric_zoom_is_a_json_error() {
        let query = ChartQuery {
            zoom: Some("abc".to_string()),
            ..Default::default()
        };
        let err = get_chart(State(state()), Query(query)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "invalid zoom `abc`");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "invalid zoom `abc`");
    }

    #[tokio::test]
    async fn test_zoom_step_applies_to_zoom() {
        let query = ChartQuery {
            zoom: Some("1.2".to_string()),
            zoom_step: Some("in".to_string()),
            ..Default::default()
        };
        let Json(view) = get_chart(State(state()), Query(query)).await.unwrap();
        assert_eq!(view.zoom.value(), 1.3);
        assert!(view.can_zoom_in && view.can_zoom_out);

        let query = ChartQuery {
            zoom: Some("3".to_string()),
            zoom_step: Some("reset".to_string()),
            ..Default::default()
        };
        let Json(view) = get_chart(State(state()), Query(query)).await.unwrap();
        assert_eq!(view.zoom.value(), 1.0);

        let query = ChartQuery {
            zoom: Some("0.5".to_string()),
            ..Default::default()
        };
        let Json(view) = get_chart(State(state()), Query(query)).await.unwrap();
        assert!(!view.can_zoom_out);

        let query = ChartQuery {
            zoom_step: Some("sideways".to_string()),
            ..Default::default()
        };
        let err = get_chart(State(state()), Query(query)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_toggle_adds_and_keeps_last_variation() {
        let query = ChartQuery {
            toggle: Some("10001".to_string()),
            ..Default::default()
        };
        let Json(view) = get_chart(State(state()), Query(query)).await.unwrap();
        assert_eq!(view.series.len(), 2);

        let query = ChartQuery {
            variations: Some("0".to_string()),
            toggle: Some("0".to_string()),
            ..Default::default()
        };
        let Json(view) = get_chart(State(state()), Query(query)).await.unwrap();
        assert_eq!(view.series.len(), 1);
        assert_eq!(view.series[0].data_key, VariationId::from("0"));

        let query = ChartQuery {
            toggle: Some("42".to_string()),
            ..Default::default()
        };
        let err = get_chart(State(state()), Query(query)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
