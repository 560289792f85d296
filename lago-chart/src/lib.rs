//! SVG chart rendering for lake observation data.
//!
//! Two render paths over the core's aggregate outputs: a past/future
//! trend line chart from a [`lago_core::partition::SeriesPartition`] and
//! a boundary-density heatmap from a [`lago_core::density::DensityMap`].
//! Both draw with `plotters` into an SVG string so callers can write the
//! document wherever they need it.

pub mod heatmap;
pub mod trend;

pub use heatmap::render_heatmap_svg;
pub use trend::render_trend_svg;
