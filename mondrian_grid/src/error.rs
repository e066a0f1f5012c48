// Errors for the fallible edges of the crate: reading, parsing, checking and
// exporting configuration or frames. Generation itself never fails; see
// `config.rs` for the checks that keep it out of degenerate territory.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{axis} count must be at least 1")]
    EmptyAxis { axis: &'static str },
    #[error("canvas must have positive size, got {width}×{height}")]
    Canvas { width: f64, height: f64 },
    #[error("`{field}` range is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("`{field}` must lie in [0, 1], got {value}")]
    OutOfUnit { field: &'static str, value: f64 },
    #[error("`{field}` must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("`{field}` palette is empty")]
    EmptyPalette { field: &'static str },
    #[error("{axis} gaps can go negative: gap_base {base} < gap_delta {delta}")]
    NegativeGap {
        axis: &'static str,
        base: f64,
        delta: f64,
    },
    #[error("agent lanes would not advance: minimum step {step} is not positive")]
    StalledLane { step: f64 },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
