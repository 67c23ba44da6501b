use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

pub const DEFAULT_DATA_PATH: &str = "data/viz.csv";
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1400.0, 900.0];

pub const DATA_ENV: &str = "DASHBOARD_DATA";
pub const WINDOW_ENV: &str = "DASHBOARD_WINDOW";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
}

impl Config {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(std::env::args().nth(1), |key| std::env::var(key).ok())
    }

    /// Data path: `arg`, then `DASHBOARD_DATA`, then the default.
    /// Window size: `DASHBOARD_WINDOW` as `WIDTHxHEIGHT`, else the default.
    pub fn resolve(arg: Option<String>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = arg
            .or_else(|| lookup(DATA_ENV))
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let window_size = match lookup(WINDOW_ENV) {
            None => DEFAULT_WINDOW_SIZE,
            Some(raw) => parse_window_size(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring {WINDOW_ENV}={raw:?}, expected WIDTHxHEIGHT");
                DEFAULT_WINDOW_SIZE
            }),
        };

        Config {
            data_path,
            window_size,
        }
    }
}

fn parse_window_size(raw: &str) -> Option<[f32; 2]> {
    let (w, h) = raw.trim().split_once(['x', 'X'])?;
    let w: f32 = w.trim().parse().ok()?;
    let h: f32 = h.trim().parse().ok()?;
    (w > 0.0 && h > 0.0).then_some([w, h])
}
