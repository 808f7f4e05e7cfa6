// Domain layer - Conversion rate engine and chart models
pub mod aggregate;
pub mod chart;
pub mod format;
pub mod palette;
pub mod ranking;
pub mod rate;
pub mod selection;
pub mod variation;
pub mod view;
