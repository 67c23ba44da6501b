use std::io::Write;

use super::error::Result;
use super::model::Dataset;
use crate::render::RenderOutput;

/// Write `rows` as CSV: header row with every column, then one line per
/// row in the given order, formatted as the table shows them.
pub fn write_table_csv<W: Write>(writer: W, dataset: &Dataset, rows: &[usize]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&dataset.columns)?;
    for &idx in rows {
        let record = &dataset.records[idx];
        csv_writer.write_record(record.cells.iter().map(|c| c.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write both chart payloads plus the selection that produced them.
pub fn write_charts_json<W: Write>(writer: W, output: &RenderOutput) -> Result<()> {
    #[derive(serde::Serialize)]
    struct Charts<'a> {
        selection: &'a crate::data::filter::Selection,
        growth_chart: &'a crate::render::ScatterChart,
        extremes_chart: &'a crate::render::ScatterChart,
    }

    serde_json::to_writer_pretty(
        writer,
        &Charts {
            selection: &output.selection,
            growth_chart: &output.growth_chart,
            extremes_chart: &output.extremes_chart,
        },
    )?;
    Ok(())
}
