//! Boundary-density heatmap: the weighted vertex cloud drawn as a heat
//! scatter with the latest footprint filled underneath for orientation.

use itertools::{Itertools, MinMaxResult};
use lago_core::density::DensityMap;
use plotters::prelude::*;

const CHART_SIZE: (u32, u32) = (800, 600);

/// Maps a weight ratio in [0, 1] onto the dark-red-to-yellow heat ramp.
pub(crate) fn heat_color(ratio: f64) -> RGBColor {
    let ratio = ratio.clamp(0.0, 1.0);
    RGBColor(
        (120.0 + 135.0 * ratio) as u8,
        (255.0 * ratio) as u8,
        0,
    )
}

/// Renders the density map as an SVG into `svg_inner_string`.
///
/// Coordinates arrive already y-flipped from aggregation; the overlay ring
/// is flipped here with the same `max_y` constant so both layers share one
/// coordinate frame. No axes are drawn; the cloud is the whole picture.
pub fn render_heatmap_svg<'a>(
    map: &DensityMap,
    svg_inner_string: &'a mut String,
) -> DrawResult<(), SVGBackend<'a>> {
    let backend = SVGBackend::with_string(svg_inner_string, CHART_SIZE);
    let backend_drawing_area = backend.into_drawing_area();
    backend_drawing_area.fill(&WHITE)?;

    let overlay_flipped: Vec<(f64, f64)> = map
        .overlay
        .iter()
        .map(|coord| (coord.x, map.max_y - coord.y))
        .collect();

    let xs = map
        .points
        .iter()
        .map(|p| p.x)
        .chain(overlay_flipped.iter().map(|(x, _)| *x));
    let (x_min, x_max) = match xs.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => {
            backend_drawing_area.present()?;
            return Ok(());
        }
        MinMaxResult::OneElement(x) => (x - 1.0, x + 1.0),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let y_max = map
        .points
        .iter()
        .map(|p| p.y)
        .chain(overlay_flipped.iter().map(|(_, y)| *y))
        .fold(f64::NEG_INFINITY, f64::max);

    let x_span = x_max - x_min;
    let x_pad = if x_span > 0.0 { x_span * 0.05 } else { 1.0 };
    let y_pad = if y_max > 0.0 { y_max * 0.05 } else { 1.0 };
    let mut chart = ChartBuilder::on(&backend_drawing_area).build_cartesian_2d(
        (x_min - x_pad)..(x_max + x_pad),
        (0.0 - y_pad)..(y_max + y_pad),
    )?;

    // Latest outline first so the heat cloud draws on top of it.
    if overlay_flipped.len() > 2 {
        chart.draw_series(std::iter::once(Polygon::new(
            overlay_flipped,
            BLUE.mix(0.5),
        )))?;
    }

    let max_weight = map.points.iter().map(|p| p.weight).max().unwrap_or(1).max(1);
    chart.draw_series(map.points.iter().map(|point| {
        let ratio = f64::from(point.weight) / f64::from(max_weight);
        Circle::new((point.x, point.y), 3, heat_color(ratio).filled())
    }))?;

    backend_drawing_area.present()?;
    Ok(())
}
