//! Water-level trend chart: past observations in blue, future (forecast)
//! observations in red, split by the caller's reference date.

use chrono::{Duration, NaiveDate};
use itertools::{Itertools, MinMaxResult};
use lago_core::partition::SeriesPartition;
use plotters::prelude::*;

const CHART_SIZE: (u32, u32) = (800, 600);

/// Renders the partitioned series as an SVG line chart into
/// `svg_inner_string`. An entirely empty partition produces a blank
/// canvas rather than an error.
pub fn render_trend_svg<'a>(
    lake: &str,
    split: &SeriesPartition,
    svg_inner_string: &'a mut String,
) -> DrawResult<(), SVGBackend<'a>> {
    let backend = SVGBackend::with_string(svg_inner_string, CHART_SIZE);
    let backend_drawing_area = backend.into_drawing_area();
    backend_drawing_area.fill(&WHITE)?;

    let all_dates = split
        .past
        .iter()
        .chain(split.future.iter())
        .map(|(date, _)| *date);
    let (min_date, max_date) = match all_dates.minmax() {
        MinMaxResult::NoElements => {
            backend_drawing_area.present()?;
            return Ok(());
        }
        MinMaxResult::OneElement(date) => (date - Duration::days(1), date + Duration::days(1)),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let ranged_date: RangedDate<NaiveDate> = (min_date..max_date).into();

    let y_max = split
        .past
        .iter()
        .chain(split.future.iter())
        .map(|(_, value)| *value)
        .fold(f64::NEG_INFINITY, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(&backend_drawing_area)
        .caption(format!("{lake} water level"), ("sans-serif", 24))
        .margin(20i32)
        .x_label_area_size(30u32)
        .y_label_area_size(60u32)
        .build_cartesian_2d(ranged_date, 0f64..y_max)?;
    chart.configure_mesh().x_labels(10_usize).draw()?;

    if !split.past.is_empty() {
        chart
            .draw_series(LineSeries::new(split.past.iter().cloned(), BLUE))?
            .label("before reference")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    }
    if !split.future.is_empty() {
        chart
            .draw_series(LineSeries::new(split.future.iter().cloned(), RED))?
            .label("after reference")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    backend_drawing_area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lago_core::observation::DATE_FORMAT;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn renders_both_halves_into_svg() {
        let split = SeriesPartition {
            past: vec![(date("2024-03-01"), 10.0), (date("2024-03-05"), 15.0)],
            future: vec![(date("2024-03-09"), 18.0)],
        };
        let mut svg = String::new();
        render_trend_svg("van", &split, &mut svg).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.len() > 500, "chart should draw more than an empty frame");
    }

    #[test]
    fn single_observation_still_renders() {
        let split = SeriesPartition {
            past: vec![(date("2024-03-01"), 10.0)],
            future: Vec::new(),
        };
        let mut svg = String::new();
        render_trend_svg("van", &split, &mut svg).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn empty_partition_produces_a_blank_canvas() {
        let split = SeriesPartition {
            past: Vec::new(),
            future: Vec::new(),
        };
        let mut svg = String::new();
        render_trend_svg("van", &split, &mut svg).unwrap();
        assert!(svg.contains("<svg"));
    }
}
