use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Year – one of the fixed GDP growth columns
// ---------------------------------------------------------------------------

pub const FIRST_YEAR: u16 = 2019;
pub const LAST_YEAR: u16 = 2028;
pub const YEAR_COUNT: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

/// Years averaged into [`AVERAGE_GROWTH_COLUMN`].
pub const AVERAGE_YEARS: std::ops::RangeInclusive<u16> = 2024..=2028;

pub const AVERAGE_GROWTH_COLUMN: &str = "average_growth_2024_2028";

/// A GDP growth year column. Always within `FIRST_YEAR..=LAST_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct Year(u16);

impl Year {
    pub fn new(year: u16) -> Option<Self> {
        (FIRST_YEAR..=LAST_YEAR).contains(&year).then_some(Year(year))
    }

    /// Every year column, oldest first.
    pub fn all() -> impl Iterator<Item = Year> {
        (FIRST_YEAR..=LAST_YEAR).map(Year)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Offset into [`Record::growth`].
    pub fn index(self) -> usize {
        (self.0 - FIRST_YEAR) as usize
    }
}

impl Default for Year {
    fn default() -> Self {
        Year(2023)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Year> for String {
    fn from(year: Year) -> Self {
        year.to_string()
    }
}

impl FromStr for Year {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(Year::new)
            .ok_or_else(|| format!("'{s}' is not a year between {FIRST_YEAR} and {LAST_YEAR}"))
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell as shown in the table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell.
/// Sorting uses a total order so `CellValue` must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so table columns can be sorted --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) | Float(_) => 1,
                Text(_) => 2,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (a, b) => {
                // Mixed integer/float: compare numerically.
                let fa = a.as_f64().unwrap_or(f64::NAN);
                let fb = b.as_f64().unwrap_or(f64::NAN);
                fa.total_cmp(&fb)
            }
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_nan() => Ok(()),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

/// Round to 3 decimal places, half to even.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

// ---------------------------------------------------------------------------
// Record – one country row
// ---------------------------------------------------------------------------

/// One row of the source table. Numeric fields are already rounded.
#[derive(Debug, Clone)]
pub struct Record {
    pub country: String,
    pub region: String,
    /// GDP growth per year, indexed by [`Year::index`].
    pub growth: [f64; YEAR_COUNT],
    pub mean: f64,
    pub mean_sd: f64,
    pub min: f64,
    pub min_sd: f64,
    pub max: f64,
    pub max_sd: f64,
    pub average_growth: f64,
    /// Every cell in [`Dataset::columns`] order, for the table.
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn growth_in(&self, year: Year) -> f64 {
        self.growth[year.index()]
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table plus column order and region index.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Source header order with the derived average column appended.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    /// Distinct regions in first-appearance order.
    pub regions: Vec<String>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let regions = distinct_regions(records.iter());
        Dataset {
            columns,
            records,
            regions,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Distinct region names in the order they first appear.
pub fn distinct_regions<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<String> {
    let mut regions: Vec<String> = Vec::new();
    for rec in records {
        if !regions.iter().any(|r| *r == rec.region) {
            regions.push(rec.region.clone());
        }
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round3_rounds_half_to_even() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-2.0004), -2.0);
        assert_eq!(round3(0.0625), 0.062);
        assert!(round3(f64::NAN).is_nan());
    }

    #[test]
    fn year_parsing_is_bounded() {
        assert_eq!("2023".parse::<Year>().unwrap().value(), 2023);
        assert!("2018".parse::<Year>().is_err());
        assert!("abc".parse::<Year>().is_err());
        assert_eq!(Year::all().count(), YEAR_COUNT);
        assert_eq!(Year::new(2019).unwrap().index(), 0);
    }

    #[test]
    fn cell_order_puts_null_first_and_text_last() {
        let mut cells = vec![
            CellValue::Text("b".into()),
            CellValue::Float(2.5),
            CellValue::Null,
            CellValue::Integer(3),
            CellValue::Integer(1),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                CellValue::Null,
                CellValue::Integer(1),
                CellValue::Float(2.5),
                CellValue::Integer(3),
                CellValue::Text("b".into()),
            ]
        );
    }

    #[test]
    fn equality_agrees_with_ordering() {
        assert_eq!(CellValue::Integer(1), CellValue::Float(1.0));
        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        assert_ne!(CellValue::Float(1.5), CellValue::Integer(1));
        assert_ne!(CellValue::Null, CellValue::Text(String::new()));

        let pairs = [
            (CellValue::Integer(2), CellValue::Float(2.0)),
            (CellValue::Float(0.25), CellValue::Float(0.25)),
            (CellValue::Text("a".into()), CellValue::Text("b".into())),
        ];
        for (a, b) in &pairs {
            assert_eq!(a == b, a.cmp(b) == std::cmp::Ordering::Equal);
        }
    }

    #[test]
    fn float_cells_display_without_trailing_zeros() {
        assert_eq!(CellValue::Float(12.0).to_string(), "12");
        assert_eq!(CellValue::Float(1.25).to_string(), "1.25");
        assert_eq!(CellValue::Float(f64::NAN).to_string(), "");
    }
}
