//! Conversion-rate comparison charts for A/B tests.
//!
//! The `domain` layer holds the pure transformation engine (rates, calendar
//! buckets, best-performer ranking, formatting). The remaining layers load a
//! static dataset and serve chart views to a rendering front end.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
