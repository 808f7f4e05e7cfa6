// Application state for HTTP handlers
use crate::application::chart_service::ChartService;
use crate::infrastructure::config::DisplaySettings;

#[derive(Clone)]
pub struct AppState {
    pub chart_service: ChartService,
    pub display: DisplaySettings,
}
