use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::error::Result;
use crate::data::export::{write_charts_json, write_table_csv};
use crate::data::filter::ValueRange;
use crate::data::layout::SliderSpec;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Controls row – year dropdown and two range sliders
// ---------------------------------------------------------------------------

/// Render the three controls side by side.
pub fn controls(ui: &mut Ui, state: &mut AppState) {
    ui.columns(3, |cols: &mut [Ui]| {
        // ---- Year ----
        cols[0].strong("Year");
        let mut year = state.selection.year;
        egui::ComboBox::from_id_salt("year_dropdown")
            .selected_text(year.to_string())
            .show_ui(&mut cols[0], |ui: &mut Ui| {
                for &option in &state.layout.years {
                    ui.selectable_value(&mut year, option, option.to_string());
                }
            });
        state.set_year(year);

        // ---- Mean temperature ----
        cols[1].strong("Mean temperature range");
        let temp_spec = state.layout.temp.clone();
        if let Some(range) = range_slider(&mut cols[1], "temp", &temp_spec, state.selection.temp_range, "°") {
            state.set_temp_range(range);
        }

        // ---- GDP growth ----
        cols[2].strong("GDP growth range");
        let gdp_spec = state.layout.gdp.clone();
        if let Some(range) = range_slider(&mut cols[2], "gdp", &gdp_spec, state.selection.gdp_range, "%") {
            state.set_gdp_range(range);
        }
    });
}

/// Two handles over the same bounds. The low handle is never allowed past
/// the high one. Returns the new range when either handle moved.
fn range_slider(
    ui: &mut Ui,
    id: &str,
    spec: &SliderSpec,
    range: ValueRange,
    unit: &str,
) -> Option<ValueRange> {
    let mut low = range.low;
    let mut high = range.high;

    let low_changed = ui
        .push_id((id, "low"), |ui: &mut Ui| {
            ui.add(
                Slider::new(&mut low, spec.min..=spec.max)
                    .step_by(spec.step)
                    .suffix(unit)
                    .text("from"),
            )
            .changed()
        })
        .inner;
    let high_changed = ui
        .push_id((id, "high"), |ui: &mut Ui| {
            ui.add(
                Slider::new(&mut high, spec.min..=spec.max)
                    .step_by(spec.step)
                    .suffix(unit)
                    .text("to"),
            )
            .changed()
        })
        .inner;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (_, label) in &spec.marks {
            ui.label(RichText::new(label).small().weak());
        }
    });

    if !(low_changed || high_changed) {
        return None;
    }
    if low > high {
        if low_changed {
            high = low;
        } else {
            low = high;
        }
    }
    Some(ValueRange::new(low, high))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export table rows…").clicked() {
                export_table_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts…").clicked() {
                export_charts_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();
        ui.heading("Country temperature and GDP growth");
        ui.separator();

        ui.label(format!(
            "{} countries loaded, {} match, {} in table",
            state.dataset.len(),
            state.output.table_rows.len(),
            state.table_rows().len()
        ));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialogs
// ---------------------------------------------------------------------------

pub fn export_table_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export table rows")
        .add_filter("CSV", &["csv"])
        .set_file_name("countries.csv")
        .save_file();

    if let Some(path) = file {
        let rows = state.table_rows();
        let result = create(&path)
            .and_then(|w| write_table_csv(w, &state.dataset, &rows));
        report(state, result, &path, &format!("{} table rows", rows.len()));
    }
}

pub fn export_charts_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        let result = create(&path).and_then(|w| write_charts_json(w, &state.output));
        report(state, result, &path, "chart data");
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

fn report(state: &mut AppState, result: Result<()>, path: &Path, what: &str) {
    match result {
        Ok(()) => {
            log::info!("Exported {what} to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export {what}: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
