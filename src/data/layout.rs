use super::filter::{Selection, ValueRange};
use super::model::{Dataset, Year};

// ---------------------------------------------------------------------------
// Static control description derived from the loaded table
// ---------------------------------------------------------------------------

/// Bounds, step and tick marks for one range slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// `(position, label)` every 5 units from `trunc(min)` to `trunc(max)`.
    pub marks: Vec<(f64, String)>,
}

impl SliderSpec {
    fn new(min: f64, max: f64, step: f64, unit: &str) -> Self {
        SliderSpec {
            min,
            max,
            step,
            marks: marks(min, max, unit),
        }
    }

    pub fn full_range(&self) -> ValueRange {
        ValueRange::new(self.min, self.max)
    }
}

/// Year dropdown options plus both slider specs.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlLayout {
    pub years: Vec<Year>,
    pub default_year: Year,
    /// Slider over `mean`.
    pub temp: SliderSpec,
    /// Slider over growth. Bounds span every year column, not only the
    /// selected one.
    pub gdp: SliderSpec,
}

impl ControlLayout {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let (temp_min, temp_max) = min_max(dataset.records.iter().map(|r| r.mean));
        let (gdp_min, gdp_max) =
            min_max(dataset.records.iter().flat_map(|r| r.growth.iter().copied()));

        ControlLayout {
            years: Year::all().collect(),
            default_year: Year::default(),
            temp: SliderSpec::new(temp_min, temp_max, 0.5, "°"),
            gdp: SliderSpec::new(gdp_min, gdp_max, 0.1, "%"),
        }
    }

    /// Default year with both sliders at their full extent.
    pub fn default_selection(&self) -> Selection {
        Selection {
            year: self.default_year,
            temp_range: self.temp.full_range(),
            gdp_range: self.gdp.full_range(),
        }
    }
}

/// Min and max ignoring NaN. `(0, 0)` if nothing is finite.
fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

fn marks(min: f64, max: f64, unit: &str) -> Vec<(f64, String)> {
    let start = min.trunc() as i64;
    let end = max.trunc() as i64;
    (start..=end)
        .step_by(5)
        .map(|i| (i as f64, format!("{i}{unit}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{dataset, record};

    #[test]
    fn slider_bounds_come_from_the_data() {
        let mut hot = record("B", "Africa", 28.4, 3.0);
        hot.growth[Year::new(2020).unwrap().index()] = -12.3;
        hot.growth[Year::new(2027).unwrap().index()] = 9.9;
        let ds = dataset(vec![record("A", "Europe", -3.2, 1.0), hot]);

        let layout = ControlLayout::from_dataset(&ds);
        assert_eq!((layout.temp.min, layout.temp.max), (-3.2, 28.4));
        assert_eq!((layout.gdp.min, layout.gdp.max), (-12.3, 9.9));
        assert_eq!(layout.temp.step, 0.5);
        assert_eq!(layout.gdp.step, 0.1);
    }

    #[test]
    fn marks_step_by_five_from_truncated_min() {
        let labels: Vec<String> = marks(-3.2, 28.4, "°").into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["-3°", "2°", "7°", "12°", "17°", "22°", "27°"]);
        assert_eq!(marks(0.4, 0.9, "%"), vec![(0.0, "0%".to_string())]);
    }

    #[test]
    fn default_selection_covers_everything() {
        let ds = dataset(vec![
            record("A", "Europe", 5.0, 1.0),
            record("B", "Asia", 25.0, 6.0),
        ]);
        let layout = ControlLayout::from_dataset(&ds);
        let sel = layout.default_selection();
        assert_eq!(sel.year.to_string(), "2023");
        assert!(ds.records.iter().all(|r| sel.matches(r)));
        assert_eq!(layout.years.len(), 10);
    }
}
