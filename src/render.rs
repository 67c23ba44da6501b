//! Filter-and-render: one [`Selection`] in, table rows and two chart
//! payloads out. Pure and recomputed from scratch on every call.

use serde::Serialize;

use crate::data::filter::{filtered_indices, group_by_region, RegionGroup, Selection};
use crate::data::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Chart payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Horizontal error bar half-width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_error: Option<f64>,
    /// Vertical error bar half-height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_error: Option<f64>,
    /// Input to the chart's continuous color scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_value: Option<f64>,
    /// Country name shown on hover.
    pub label: String,
}

/// One trace, named after its region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

/// Bounds of the shared continuous color legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorScaleBounds {
    pub title: &'static str,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<ColorScaleBounds>,
}

/// Everything the UI needs after a control change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOutput {
    pub selection: Selection,
    /// Indices into `Dataset::records`, in source order.
    pub table_rows: Vec<usize>,
    pub growth_chart: ScatterChart,
    pub extremes_chart: ScatterChart,
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

pub fn render(dataset: &Dataset, selection: &Selection) -> RenderOutput {
    let rows = filtered_indices(dataset, selection);
    let groups = group_by_region(dataset, &rows);

    let year = selection.year;
    let growth_chart = ScatterChart {
        title: format!("{year} mean temperature vs GDP growth"),
        x_label: "GDP growth (%)",
        y_label: "Mean temperature (°C)",
        series: region_series(dataset, &groups, |r: &Record| ScatterPoint {
            x: r.growth_in(year),
            y: r.mean,
            x_error: None,
            y_error: Some(r.mean_sd),
            color_value: None,
            label: r.country.clone(),
        }),
        color_scale: None,
    };

    let extremes_series = region_series(dataset, &groups, |r: &Record| ScatterPoint {
        x: r.min,
        y: r.max,
        x_error: Some(r.min_sd),
        y_error: Some(r.max_sd),
        color_value: Some(r.average_growth),
        label: r.country.clone(),
    });
    let color_scale = color_bounds(&extremes_series);
    let extremes_chart = ScatterChart {
        title: "Max vs min temperature".to_string(),
        x_label: "Min temperature (°C)",
        y_label: "Max temperature (°C)",
        series: extremes_series,
        color_scale,
    };

    log::debug!(
        "render {year} temp={:?} gdp={:?}: {} rows, {} series",
        selection.temp_range,
        selection.gdp_range,
        rows.len(),
        groups.len()
    );

    RenderOutput {
        selection: *selection,
        table_rows: rows,
        growth_chart,
        extremes_chart,
    }
}

/// One series per group, points in row order.
fn region_series(
    dataset: &Dataset,
    groups: &[RegionGroup],
    point: impl Fn(&Record) -> ScatterPoint,
) -> Vec<Series> {
    groups
        .iter()
        .map(|group| Series {
            name: group.region.clone(),
            points: group
                .indices
                .iter()
                .map(|&i| point(&dataset.records[i]))
                .collect(),
        })
        .collect()
}

/// Shared scale over every finite color value in the chart.
fn color_bounds(series: &[Series]) -> Option<ColorScaleBounds> {
    let (min, max) = series
        .iter()
        .flat_map(|s| s.points.iter())
        .filter_map(|p| p.color_value)
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    (min <= max).then_some(ColorScaleBounds {
        title: "Avg growth 2024-2028 (%)",
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::ValueRange;
    use crate::data::test_support::{dataset, record};

    fn selection(year: &str, temp: (f64, f64), gdp: (f64, f64)) -> Selection {
        Selection {
            year: year.parse().unwrap(),
            temp_range: ValueRange::new(temp.0, temp.1),
            gdp_range: ValueRange::new(gdp.0, gdp.1),
        }
    }

    fn names(chart: &ScatterChart) -> Vec<&str> {
        chart.series.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn asia_europe_scenario() {
        let ds = dataset(vec![
            record("Japan", "Asia", 10.0, 2.0),
            record("France", "Europe", 20.0, 3.0),
        ]);
        let out = render(&ds, &selection("2023", (5.0, 15.0), (1.0, 4.0)));

        assert_eq!(out.table_rows, vec![0]);
        assert_eq!(names(&out.growth_chart), vec!["Asia"]);
        assert_eq!(out.growth_chart.series[0].points.len(), 1);
        assert_eq!(names(&out.extremes_chart), vec!["Asia"]);
    }

    #[test]
    fn chart_points_carry_the_right_columns() {
        let mut rec = record("Japan", "Asia", 10.0, 2.0);
        rec.growth[5] = 7.5;
        rec.average_growth = 1.8;
        let ds = dataset(vec![rec]);
        let out = render(&ds, &selection("2024", (0.0, 50.0), (0.0, 10.0)));

        let p = &out.growth_chart.series[0].points[0];
        assert_eq!((p.x, p.y), (7.5, 10.0));
        assert_eq!(p.y_error, Some(0.5));
        assert_eq!(p.x_error, None);
        assert_eq!(p.label, "Japan");
        assert_eq!(out.growth_chart.title, "2024 mean temperature vs GDP growth");

        let q = &out.extremes_chart.series[0].points[0];
        assert_eq!((q.x, q.y), (0.0, 20.0));
        assert_eq!((q.x_error, q.y_error), (Some(0.25), Some(0.75)));
        assert_eq!(q.color_value, Some(1.8));
        let scale = out.extremes_chart.color_scale.unwrap();
        assert_eq!((scale.min, scale.max), (1.8, 1.8));
    }

    #[test]
    fn no_match_gives_empty_table_and_charts() {
        let ds = dataset(vec![
            record("Japan", "Asia", 10.0, 2.0),
            record("France", "Europe", 20.0, 3.0),
        ]);
        let out = render(&ds, &selection("2023", (100.0, 200.0), (1.0, 4.0)));
        assert!(out.table_rows.is_empty());
        assert!(out.growth_chart.series.is_empty());
        assert!(out.extremes_chart.series.is_empty());
        assert!(out.extremes_chart.color_scale.is_none());
    }

    #[test]
    fn full_ranges_keep_every_region_in_first_seen_order() {
        let ds = dataset(vec![
            record("Peru", "Americas", 19.0, 2.0),
            record("Japan", "Asia", 10.0, 1.0),
            record("Chile", "Americas", 9.0, 2.5),
            record("Kenya", "Africa", 25.0, 5.0),
        ]);
        let out = render(&ds, &selection("2023", (-100.0, 100.0), (-100.0, 100.0)));
        assert_eq!(out.table_rows, vec![0, 1, 2, 3]);
        assert_eq!(names(&out.growth_chart), vec!["Americas", "Asia", "Africa"]);
        assert_eq!(names(&out.extremes_chart), ds.regions.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(out.growth_chart.series[0].points.len(), 2);

        let scale = out.extremes_chart.color_scale.unwrap();
        assert_eq!((scale.min, scale.max), (1.0, 5.0));
    }

    #[test]
    fn same_inputs_give_same_output() {
        let ds = dataset(vec![
            record("Japan", "Asia", 10.0, 2.0),
            record("France", "Europe", 20.0, 3.0),
        ]);
        let sel = selection("2021", (0.0, 25.0), (0.0, 2.5));
        assert_eq!(render(&ds, &sel), render(&ds, &sel));
    }
}
