use std::io::Read;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::error::{DataError, Result};
use super::model::{
    round3, CellValue, Dataset, Record, Year, AVERAGE_GROWTH_COLUMN, AVERAGE_YEARS, YEAR_COUNT,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the country table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row, one country per line
/// * `.json` – `[{ "Country": "...", "Region": "...", "mean": 12.3, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(std::fs::File::open(path)?),
        "json" => load_json(std::fs::File::open(path)?),
        other => Err(DataError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, at least the required columns.
/// All other columns are kept as extra table cells.
pub fn load_csv<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    build_dataset(headers, rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the same shape the table emits per row.
/// Column order follows the order keys are first seen.
pub fn load_json<R: Read>(source: R) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_reader(source)?;
    let records = root
        .as_array()
        .ok_or_else(|| DataError::InvalidFormat("expected top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for rec in records {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::InvalidFormat("array element is not an object".into()))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| match obj.get(h) {
                    Some(JsonValue::String(s)) => s.clone(),
                    Some(JsonValue::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                })
                .collect()
        })
        .collect();

    build_dataset(headers, rows)
}

// ---------------------------------------------------------------------------
// Shared row → Record conversion
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header.
struct ColumnIndex {
    country: usize,
    region: usize,
    growth: [usize; YEAR_COUNT],
    mean: usize,
    mean_sd: usize,
    min: usize,
    min_sd: usize,
    max: usize,
    max_sd: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        let mut growth = [0usize; YEAR_COUNT];
        for year in Year::all() {
            growth[year.index()] = find(&year.to_string())?;
        }

        Ok(ColumnIndex {
            country: find("Country")?,
            region: find("Region")?,
            growth,
            mean: find("mean")?,
            mean_sd: find("mean_sd")?,
            min: find("min")?,
            min_sd: find("min_sd")?,
            max: find("max")?,
            max_sd: find("max_sd")?,
        })
    }
}

fn build_dataset(mut headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Dataset> {
    let index = ColumnIndex::locate(&headers)?;
    if rows.is_empty() {
        return Err(DataError::NoRows);
    }

    // An existing average column is overwritten in place.
    let average_at = headers.iter().position(|h| h.trim() == AVERAGE_GROWTH_COLUMN);

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        records.push(parse_row(&headers, &index, average_at, row_no, row)?);
    }

    if average_at.is_none() {
        headers.push(AVERAGE_GROWTH_COLUMN.to_string());
    }
    Ok(Dataset::new(headers, records))
}

fn parse_row(
    headers: &[String],
    index: &ColumnIndex,
    average_at: Option<usize>,
    row_no: usize,
    row: &[String],
) -> Result<Record> {
    let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");
    let number = |idx: usize| -> Result<f64> {
        let raw = cell(idx).trim();
        if raw.is_empty() {
            return Ok(f64::NAN);
        }
        raw.parse::<f64>()
            .map(round3)
            .map_err(|_| DataError::InvalidNumber {
                row: row_no,
                column: headers[idx].clone(),
                value: raw.to_string(),
            })
    };

    let mut growth = [f64::NAN; YEAR_COUNT];
    for (slot, &col) in growth.iter_mut().zip(index.growth.iter()) {
        *slot = number(col)?;
    }

    let average_growth = round3(mean_skipping_nan(
        Year::all()
            .filter(|y| AVERAGE_YEARS.contains(&y.value()))
            .map(|y| growth[y.index()]),
    ));

    let mut cells: Vec<CellValue> = (0..headers.len())
        .map(|idx| guess_cell_type(cell(idx)))
        .collect();
    match average_at {
        Some(idx) => cells[idx] = CellValue::Float(average_growth),
        None => cells.push(CellValue::Float(average_growth)),
    }

    Ok(Record {
        country: cell(index.country).to_string(),
        region: cell(index.region).to_string(),
        growth,
        mean: number(index.mean)?,
        mean_sd: number(index.mean_sd)?,
        min: number(index.min)?,
        min_sd: number(index.min_sd)?,
        max: number(index.max)?,
        max_sd: number(index.max_sd)?,
        average_growth,
        cells,
    })
}

/// Arithmetic mean of the non-NaN values; NaN when there are none.
fn mean_skipping_nan(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

fn guess_cell_type(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(round3(f));
    }
    CellValue::Text(s.to_string())
}
