use eframe::egui::{self, Color32, RichText, Sense, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, PlotUi, Points};

use crate::color::{viridis, ContinuousScale};
use crate::render::{ScatterChart, ScatterPoint};
use crate::state::AppState;

const ERROR_BAR_COLOR: Color32 = Color32::from_gray(150);
const COLOR_BAR_WIDTH: f32 = 16.0;

// ---------------------------------------------------------------------------
// Mean temperature vs GDP growth (left chart)
// ---------------------------------------------------------------------------

/// Points coloured by region, vertical error bars from `mean_sd`.
pub fn growth_chart(ui: &mut Ui, state: &AppState) {
    let chart = &state.output.growth_chart;
    ui.label(RichText::new(&chart.title).strong());

    Plot::new("growth_chart")
        .legend(Legend::default())
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .height(plot_height(ui))
        .label_formatter(hover_label(chart))
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = state.region_colors.color_for(&series.name);
                draw_error_bars(plot_ui, &series.points);

                let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.points(marker(points).name(&series.name).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Max vs min temperature (right chart)
// ---------------------------------------------------------------------------

/// Points coloured on the continuous growth scale, error bars on both axes,
/// with one colour bar for the whole chart.
pub fn extremes_chart(ui: &mut Ui, state: &AppState) {
    let chart = &state.output.extremes_chart;
    ui.label(RichText::new(&chart.title).strong());

    let scale = state.growth_scale();
    let bar_space = if scale.is_some() { COLOR_BAR_WIDTH + 56.0 } else { 0.0 };
    let plot_width = (ui.available_width() - bar_space).max(50.0);

    ui.horizontal(|ui: &mut Ui| {
        Plot::new("extremes_chart")
            .legend(Legend::default())
            .x_axis_label(chart.x_label)
            .y_axis_label(chart.y_label)
            .width(plot_width)
            .height(plot_height(ui))
            .label_formatter(hover_label(chart))
            .show(ui, |plot_ui| {
                for series in &chart.series {
                    draw_error_bars(plot_ui, &series.points);
                    for p in &series.points {
                        let color = match (&scale, p.color_value) {
                            (Some(s), Some(v)) => s.color_for(v),
                            _ => Color32::GRAY,
                        };
                        // Same name on every point: one legend entry per region.
                        let point = PlotPoints::from(vec![[p.x, p.y]]);
                        plot_ui.points(marker(point).name(&series.name).color(color));
                    }
                }
            });

        if let Some(scale) = &scale {
            color_bar(ui, scale);
        }
    });
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Hover label: every country of the series sitting on the hovered point.
fn hover_label(chart: &ScatterChart) -> impl Fn(&str, &PlotPoint) -> String {
    let labels: Vec<(String, f64, f64, String)> = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(move |p| (s.name.clone(), p.x, p.y, p.label.clone())))
        .collect();

    move |name: &str, value: &PlotPoint| {
        let countries: Vec<&str> = labels
            .iter()
            .filter(|(series, x, y, _)| series == name && *x == value.x && *y == value.y)
            .map(|(_, _, _, country)| country.as_str())
            .collect();
        if countries.is_empty() {
            format!("x = {:.3}\ny = {:.3}", value.x, value.y)
        } else {
            format!(
                "{} ({name})\nx = {:.3}\ny = {:.3}",
                countries.join(", "),
                value.x,
                value.y
            )
        }
    }
}

fn plot_height(ui: &Ui) -> f32 {
    (ui.available_height() - 8.0).max(120.0)
}

fn marker(points: PlotPoints) -> Points {
    Points::new(points)
        .shape(MarkerShape::Circle)
        .filled(true)
        .radius(5.0)
}

/// One unnamed segment per error bar so they stay out of the legend.
fn draw_error_bars(plot_ui: &mut PlotUi, points: &[ScatterPoint]) {
    for p in points {
        if let Some(e) = p.y_error.filter(|e| e.is_finite() && *e > 0.0) {
            let segment = PlotPoints::from(vec![[p.x, p.y - e], [p.x, p.y + e]]);
            plot_ui.line(Line::new(segment).color(ERROR_BAR_COLOR).width(1.5));
        }
        if let Some(e) = p.x_error.filter(|e| e.is_finite() && *e > 0.0) {
            let segment = PlotPoints::from(vec![[p.x - e, p.y], [p.x + e, p.y]]);
            plot_ui.line(Line::new(segment).color(ERROR_BAR_COLOR).width(1.5));
        }
    }
}

/// Vertical Viridis gradient, max at the top.
fn color_bar(ui: &mut Ui, scale: &ContinuousScale) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(scale.bounds.title).small());
        ui.label(RichText::new(format!("{:.2}", scale.bounds.max)).small());

        let height = (ui.available_height() - 40.0).max(60.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(COLOR_BAR_WIDTH, height), Sense::hover());
        const STEPS: usize = 48;
        let step_h = rect.height() / STEPS as f32;
        for i in 0..STEPS {
            let t = 1.0 - (i as f64 + 0.5) / STEPS as f64;
            let top = rect.top() + i as f32 * step_h;
            let slice = egui::Rect::from_min_max(
                egui::pos2(rect.left(), top),
                egui::pos2(rect.right(), top + step_h + 0.5),
            );
            ui.painter().rect_filled(slice, 0.0, viridis(t));
        }

        ui.label(RichText::new(format!("{:.2}", scale.bounds.min)).small());
    });
}

// ---------------------------------------------------------------------------
// Chart row
// ---------------------------------------------------------------------------

/// Both charts side by side.
pub fn charts(ui: &mut Ui, state: &AppState) {
    if state.output.table_rows.is_empty() {
        ui.label(RichText::new("No countries match the current selection.").weak());
    }
    ui.columns(2, |cols: &mut [Ui]| {
        growth_chart(&mut cols[0], state);
        extremes_chart(&mut cols[1], state);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Series;

    fn point(x: f64, y: f64, label: &str) -> ScatterPoint {
        ScatterPoint {
            x,
            y,
            x_error: None,
            y_error: None,
            color_value: None,
            label: label.to_string(),
        }
    }

    #[test]
    fn hover_lists_every_country_on_the_point() {
        let chart = ScatterChart {
            title: "t".to_string(),
            x_label: "x",
            y_label: "y",
            series: vec![
                Series {
                    name: "Asia".to_string(),
                    points: vec![point(1.0, 2.0, "Japan"), point(1.0, 2.0, "Korea"), point(3.0, 4.0, "India")],
                },
                Series {
                    name: "Europe".to_string(),
                    points: vec![point(1.0, 2.0, "Spain")],
                },
            ],
            color_scale: None,
        };
        let label = hover_label(&chart);

        assert_eq!(label("Asia", &PlotPoint::new(1.0, 2.0)), "Japan, Korea (Asia)\nx = 1.000\ny = 2.000");
        assert_eq!(label("Europe", &PlotPoint::new(1.0, 2.0)), "Spain (Europe)\nx = 1.000\ny = 2.000");
        assert_eq!(label("Asia", &PlotPoint::new(9.0, 9.0)), "x = 9.000\ny = 9.000");
    }
}
