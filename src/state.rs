use crate::color::{ContinuousScale, RegionColors};
use crate::data::filter::{Selection, ValueRange};
use crate::data::layout::ControlLayout;
use crate::data::model::{Dataset, Year};
use crate::data::table::TableState;
use crate::render::{render, RenderOutput};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Table loaded at startup, never mutated.
    pub dataset: Dataset,

    /// Control options and slider bounds derived from the table.
    pub layout: ControlLayout,

    /// Current dropdown and slider values.
    pub selection: Selection,

    /// Result of the last render for `selection`.
    pub output: RenderOutput,

    /// Sort and per-column queries of the data table.
    pub table: TableState,

    /// Stable colour per region.
    pub region_colors: RegionColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state: default selection, rendered once.
    pub fn new(dataset: Dataset) -> Self {
        let layout = ControlLayout::from_dataset(&dataset);
        let selection = layout.default_selection();
        let output = render(&dataset, &selection);
        let table = TableState::for_columns(dataset.columns.len());
        let region_colors = RegionColors::new(&dataset.regions);

        Self {
            dataset,
            layout,
            selection,
            output,
            table,
            region_colors,
            status_message: None,
        }
    }

    /// Re-render after a control change.
    pub fn refresh(&mut self) {
        self.output = render(&self.dataset, &self.selection);
    }

    pub fn set_year(&mut self, year: Year) {
        if self.selection.year != year {
            self.selection.year = year;
            self.refresh();
        }
    }

    pub fn set_temp_range(&mut self, range: ValueRange) {
        if self.selection.temp_range != range {
            self.selection.temp_range = range;
            self.refresh();
        }
    }

    pub fn set_gdp_range(&mut self, range: ValueRange) {
        if self.selection.gdp_range != range {
            self.selection.gdp_range = range;
            self.refresh();
        }
    }

    /// Rows shown in the table: filtered rows after table sort and queries.
    pub fn table_rows(&self) -> Vec<usize> {
        self.table.view(&self.dataset, &self.output.table_rows)
    }

    /// Shared continuous scale for the max/min chart, if it has points.
    pub fn growth_scale(&self) -> Option<ContinuousScale> {
        self.output.extremes_chart.color_scale.map(ContinuousScale::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{dataset, record};

    fn state() -> AppState {
        AppState::new(dataset(vec![
            record("Japan", "Asia", 10.0, 2.0),
            record("France", "Europe", 20.0, 3.0),
            record("Kenya", "Africa", 25.0, 5.0),
        ]))
    }

    #[test]
    fn starts_with_everything_visible() {
        let st = state();
        assert_eq!(st.output.table_rows, vec![0, 1, 2]);
        assert_eq!(st.output.growth_chart.series.len(), 3);
        assert_eq!(st.table_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn control_changes_rerender() {
        let mut st = state();
        st.set_temp_range(ValueRange::new(5.0, 15.0));
        assert_eq!(st.output.table_rows, vec![0]);

        st.set_gdp_range(ValueRange::new(2.5, 6.0));
        assert!(st.output.table_rows.is_empty());
        assert!(st.growth_scale().is_none());

        st.set_temp_range(ValueRange::new(0.0, 30.0));
        st.set_year(Year::new(2019).unwrap());
        assert_eq!(st.output.table_rows, vec![1, 2]);
        assert_eq!(st.output.selection.year.value(), 2019);
    }

    #[test]
    fn table_queries_do_not_change_charts() {
        let mut st = state();
        let region = st.dataset.columns.iter().position(|c| c == "Region").unwrap();
        st.table.queries[region] = "Asia".into();
        assert_eq!(st.table_rows(), vec![0]);
        assert_eq!(st.output.growth_chart.series.len(), 3);
    }
}
