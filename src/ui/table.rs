use eframe::egui::{Align, Layout, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::table::SortDirection;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;
const HEADER_HEIGHT: f32 = 48.0;

// ---------------------------------------------------------------------------
// Data table (bottom panel)
// ---------------------------------------------------------------------------

/// Sortable, filterable table of the rows that pass the current selection.
/// Header buttons cycle the sort; the text box under each one filters it.
pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    let rows = state.table_rows();
    let AppState { dataset, table, .. } = state;

    let mut clicked_column = None;

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(72.0).clip(true), dataset.columns.len())
            .min_scrolled_height(0.0)
            .header(HEADER_HEIGHT, |mut header| {
                for (col, name) in dataset.columns.iter().enumerate() {
                    header.col(|ui: &mut Ui| {
                        ui.vertical(|ui: &mut Ui| {
                            let arrow = match table.sort.direction_of(col) {
                                Some(SortDirection::Ascending) => " ⬆",
                                Some(SortDirection::Descending) => " ⬇",
                                None => "",
                            };
                            if ui
                                .button(RichText::new(format!("{name}{arrow}")).strong())
                                .clicked()
                            {
                                clicked_column = Some(col);
                            }
                            if let Some(query) = table.queries.get_mut(col) {
                                ui.add(
                                    TextEdit::singleline(query)
                                        .hint_text("filter")
                                        .desired_width(68.0),
                                );
                            }
                        });
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = &dataset.records[rows[row.index()]];
                    for cell in &record.cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });

    if let Some(col) = clicked_column {
        table.sort.cycle(col);
        ui.ctx().request_repaint();
    }

    if rows.is_empty() {
        ui.add_space(4.0);
        ui.label(RichText::new("No rows.").weak());
    }
}
