use serde::Serialize;

use super::model::{Dataset, Record, Year};

// ---------------------------------------------------------------------------
// Selection: the three control values that drive a render
// ---------------------------------------------------------------------------

/// Closed interval `[low, high]`. NaN is never contained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub fn new(low: f64, high: f64) -> Self {
        ValueRange { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Year dropdown plus the two range sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Selection {
    pub year: Year,
    /// Bounds on `mean`.
    pub temp_range: ValueRange,
    /// Bounds on the selected year's growth column.
    pub gdp_range: ValueRange,
}

impl Selection {
    /// A record passes when both its `mean` and its growth in the selected
    /// year fall inside the ranges. No other column participates.
    pub fn matches(&self, record: &Record) -> bool {
        self.temp_range.contains(record.mean) && self.gdp_range.contains(record.growth_in(self.year))
    }
}

/// Return indices of records that pass the selection, in source order.
pub fn filtered_indices(dataset: &Dataset, selection: &Selection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Region grouping
// ---------------------------------------------------------------------------

/// Rows of one region within a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup {
    pub region: String,
    pub indices: Vec<usize>,
}

/// Group `indices` by region. Groups come out in the order each region is
/// first seen while scanning `indices`; rows keep their relative order.
pub fn group_by_region(dataset: &Dataset, indices: &[usize]) -> Vec<RegionGroup> {
    let mut groups: Vec<RegionGroup> = Vec::new();
    for &idx in indices {
        let region = &dataset.records[idx].region;
        match groups.iter_mut().find(|g| g.region == *region) {
            Some(group) => group.indices.push(idx),
            None => groups.push(RegionGroup {
                region: region.clone(),
                indices: vec![idx],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{dataset, record};

    fn selection(year: &str, temp: (f64, f64), gdp: (f64, f64)) -> Selection {
        Selection {
            year: year.parse().unwrap(),
            temp_range: ValueRange::new(temp.0, temp.1),
            gdp_range: ValueRange::new(gdp.0, gdp.1),
        }
    }

    #[test]
    fn range_endpoints_are_inclusive() {
        let ds = dataset(vec![
            record("A", "Asia", 5.0, 1.0),
            record("B", "Asia", 15.0, 4.0),
            record("C", "Asia", 15.001, 2.0),
        ]);
        let sel = selection("2023", (5.0, 15.0), (1.0, 4.0));
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1]);
    }

    #[test]
    fn only_selected_year_is_compared() {
        let mut rec = record("A", "Asia", 10.0, 2.0);
        rec.growth[Year::new(2020).unwrap().index()] = -50.0;
        let ds = dataset(vec![rec]);
        assert_eq!(filtered_indices(&ds, &selection("2023", (0.0, 20.0), (0.0, 3.0))), vec![0]);
        assert!(filtered_indices(&ds, &selection("2020", (0.0, 20.0), (0.0, 3.0))).is_empty());
    }

    #[test]
    fn nan_values_never_match() {
        let ds = dataset(vec![record("A", "Asia", f64::NAN, 2.0)]);
        let sel = selection("2023", (f64::MIN, f64::MAX), (f64::MIN, f64::MAX));
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn filtering_twice_gives_the_same_rows() {
        let ds = dataset(vec![
            record("A", "Asia", 10.0, 2.0),
            record("B", "Europe", 20.0, 3.0),
            record("C", "Africa", 25.0, 5.0),
        ]);
        let sel = selection("2023", (8.0, 22.0), (1.0, 4.0));
        let once = filtered_indices(&ds, &sel);

        let subset = dataset(once.iter().map(|&i| ds.records[i].clone()).collect());
        let twice: Vec<String> = filtered_indices(&subset, &sel)
            .into_iter()
            .map(|i| subset.records[i].country.clone())
            .collect();
        let once: Vec<String> = once.into_iter().map(|i| ds.records[i].country.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn groups_follow_first_appearance() {
        let ds = dataset(vec![
            record("A", "Europe", 10.0, 2.0),
            record("B", "Asia", 10.0, 2.0),
            record("C", "Europe", 10.0, 2.0),
            record("D", "Africa", 10.0, 2.0),
        ]);
        let groups = group_by_region(&ds, &[0, 1, 2, 3]);
        let names: Vec<&str> = groups.iter().map(|g| g.region.as_str()).collect();
        assert_eq!(names, vec!["Europe", "Asia", "Africa"]);
        assert_eq!(groups[0].indices, vec![0, 2]);

        let groups = group_by_region(&ds, &[3, 2]);
        let names: Vec<&str> = groups.iter().map(|g| g.region.as_str()).collect();
        assert_eq!(names, vec!["Africa", "Europe"]);
    }
}
