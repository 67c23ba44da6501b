//! Writes a synthetic `data/viz.csv` with the columns the dashboard expects.

use std::path::Path;

use anyhow::{Context, Result};

/// SplitMix64 stream with Gaussian draws. Seeded, so every run writes the
/// same table.
struct Noise {
    state: u64,
    spare: Option<f64>,
}

impl Noise {
    fn seeded(seed: u64) -> Self {
        Noise { state: seed, spare: None }
    }

    fn next_bits(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in (0, 1].
    fn unit(&mut self) -> f64 {
        ((self.next_bits() >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    /// Normal draw; Box-Muller yields two per pair of uniforms.
    fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        let z = match self.spare.take() {
            Some(z) => z,
            None => {
                let radius = (-2.0 * self.unit().ln()).sqrt();
                let angle = std::f64::consts::TAU * self.unit();
                self.spare = Some(radius * angle.sin());
                radius * angle.cos()
            }
        };
        mean + sd * z
    }
}

/// (region, typical mean temperature, typical growth, countries)
const REGIONS: [(&str, f64, f64, &[&str]); 5] = [
    ("Asia", 22.0, 4.5, &["Japan", "India", "Vietnam", "Mongolia", "Indonesia", "Kazakhstan"]),
    ("Europe", 9.5, 1.8, &["France", "Norway", "Spain", "Poland", "Italy", "Finland"]),
    ("Africa", 24.5, 3.8, &["Kenya", "Egypt", "Ghana", "Morocco", "Nigeria", "Ethiopia"]),
    ("Americas", 17.0, 2.4, &["Brazil", "Canada", "Chile", "Mexico", "Peru", "Argentina"]),
    ("Oceania", 20.0, 2.6, &["Australia", "New Zealand", "Fiji", "Papua New Guinea"]),
];

/// 2020 gets a shared contraction so the year dropdown matters.
const YEAR_SHOCK: [(u16, f64); 10] = [
    (2019, 0.0),
    (2020, -6.0),
    (2021, 3.0),
    (2022, 0.5),
    (2023, 0.0),
    (2024, 0.0),
    (2025, 0.2),
    (2026, 0.2),
    (2027, 0.1),
    (2028, 0.0),
];

fn main() -> Result<()> {
    let mut rng = Noise::seeded(2019);
    let output_path = Path::new("data/viz.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).context("creating data directory")?;
    }

    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    let mut header: Vec<String> = vec!["Country".into(), "Region".into()];
    header.extend(YEAR_SHOCK.iter().map(|(y, _)| y.to_string()));
    for col in ["mean", "mean_sd", "min", "min_sd", "max", "max_sd"] {
        header.push(col.into());
    }
    writer.write_record(&header)?;

    // Interleave regions so first-appearance order differs from alphabetical.
    let longest = REGIONS.iter().map(|(_, _, _, c)| c.len()).max().unwrap_or(0);
    let mut rows = 0usize;
    for i in 0..longest {
        for &(region, base_temp, base_growth, countries) in &REGIONS {
            let Some(country) = countries.get(i) else {
                continue;
            };

            let trend = rng.normal(base_growth, 1.2);
            let mut row = vec![country.to_string(), region.to_string()];
            for &(_, shock) in &YEAR_SHOCK {
                row.push(format!("{:.4}", trend + shock + rng.normal(0.0, 0.8)));
            }

            let mean = rng.normal(base_temp, 4.0);
            let spread = rng.normal(12.0, 3.0).abs();
            row.push(format!("{mean:.4}"));
            row.push(format!("{:.4}", rng.normal(0.6, 0.15).abs()));
            row.push(format!("{:.4}", mean - spread));
            row.push(format!("{:.4}", rng.normal(0.9, 0.2).abs()));
            row.push(format!("{:.4}", mean + spread));
            row.push(format!("{:.4}", rng.normal(0.9, 0.2).abs()));

            writer.write_record(&row)?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} countries to {}", output_path.display());
    Ok(())
}
