//! # chartust-options
//!
//! The configuration mapper: pure functions translating chart requests into
//! ECharts option objects consumed by the external render service.
//!
//! The schema in [`schema`] mirrors the subset of the ECharts option surface
//! these charts use; the builders in [`builder`] fill it in from a request.

pub mod builder;
pub mod schema;

pub use builder::{line_chart_option, stacked_area_chart_option};
pub use schema::ChartOption;
