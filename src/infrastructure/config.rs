use crate::domain::chart::{Granularity, LineStyle};
use crate::domain::format::Locale;
use crate::domain::palette::Theme;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

/// Defaults applied when a request leaves an option out.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct DisplaySettings {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub line_style: LineStyle,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/data.json")
}

/// Load `config/app.toml` (optional) with `CHART_*` environment overrides,
/// e.g. `CHART_SERVER__BIND_ADDR`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix("CHART")
                .prefix_separator("_")
                .separator("__"),
        );

    build_app_config(builder)
}

fn build_app_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}
