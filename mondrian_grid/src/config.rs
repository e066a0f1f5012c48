// Data-driven generation parameters.
//
// Every tunable of the composition lives in `GridConfig`: canvas size, the
// per-axis partition parameters (`AxisParams`), block placement
// (`BlockParams`), lane agent seeding (`AgentParams`) and connector count
// (`ConnectorParams`). Generators read from the config and never from magic
// numbers, so a JSON file can reshape the composition without recompiling.
//
// Columns and rows share one parameter struct with two named presets,
// `AxisParams::columns()` and `AxisParams::rows()`, which differ in size
// bounds and bias: columns swing wider (20–280) with a sharper centre bias,
// rows stay tighter (40–140).
//
// Generation assumes a sane config and does not call `validate()`. Loading
// from disk goes through `GridConfig::load`, which does.
//
// See also: `layout.rs` (gaps and partition), `blocks.rs`, `agents.rs`,
// `connector.rs` which consume the respective sections.

use crate::error::{ConfigError, Result};
use crate::types::Swatch;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Per-axis partition parameters
// ---------------------------------------------------------------------------

/// Partition parameters for one axis (columns or rows).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisParams {
    /// Number of segments along the axis. There are `count - 1` gaps.
    pub count: usize,
    /// Nominal gap thickness between adjacent segments.
    pub gap_base: f64,
    /// Each gap is jittered uniformly by up to ± this amount.
    pub gap_delta: f64,
    /// Lower bound on a segment before the final rescale.
    pub min_size: f64,
    /// Upper bound on a segment before the final rescale. Ignored when not
    /// greater than `min_size`.
    pub max_size: f64,
    /// Exponent of the positional weight curve. Higher values concentrate
    /// size in the middle segments.
    pub center_power: f64,
    /// Exponent applied to each uniform draw. Higher values spread segment
    /// sizes further apart.
    pub spread: f64,
}

impl AxisParams {
    /// Column preset: wide size range, strong centre bias.
    pub fn columns() -> Self {
        Self {
            count: 10,
            gap_base: 15.0,
            gap_delta: 3.0,
            min_size: 20.0,
            max_size: 280.0,
            center_power: 2.2,
            spread: 2.0,
        }
    }

    /// Row preset: narrower size range, softer bias and spread.
    pub fn rows() -> Self {
        Self {
            count: 10,
            gap_base: 15.0,
            gap_delta: 3.0,
            min_size: 40.0,
            max_size: 140.0,
            center_power: 2.0,
            spread: 1.5,
        }
    }

    fn validate(&self, axis: &'static str) -> Result<()> {
        if self.count == 0 {
            return Err(ConfigError::EmptyAxis { axis });
        }
        non_negative("gap_base", self.gap_base)?;
        non_negative("gap_delta", self.gap_delta)?;
        // A jittered gap must never go below zero or cells would overlap.
        if self.gap_base < self.gap_delta {
            return Err(ConfigError::NegativeGap {
                axis,
                base: self.gap_base,
                delta: self.gap_delta,
            });
        }
        non_negative("min_size", self.min_size)?;
        ordered("min_size/max_size", self.min_size, self.max_size)?;
        non_negative("center_power", self.center_power)?;
        non_negative("spread", self.spread)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Decoration parameters
// ---------------------------------------------------------------------------

/// Big block and overlay placement inside cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockParams {
    /// Probability that a cell receives a big block.
    pub prob: f64,
    /// Smallest strip extent as a fraction of the parent's free dimension.
    pub min_frac: f64,
    /// Largest strip extent as a fraction of the parent's free dimension.
    pub max_frac: f64,
    /// Aspect ratio at which a cell counts as clearly wide (or tall). Below
    /// it in both directions the strip orientation is a coin flip.
    pub aspect_thresh: f64,
    /// Probability that a big block receives an overlay.
    pub overlay_prob: f64,
    pub palette: Vec<Swatch>,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            prob: 0.55,
            min_frac: 0.35,
            max_frac: 0.85,
            aspect_thresh: 1.15,
            overlay_prob: 0.20,
            palette: vec![Swatch::Red, Swatch::Blue, Swatch::Yellow],
        }
    }
}

/// Lane agent seeding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentParams {
    /// Probability that each lane slot is occupied.
    pub fill_prob: f64,
    /// `(min, max)` of the empty stretch added after every slot.
    pub spacing: (f64, f64),
    /// `(min, max)` of the unsigned base speed; the sign is a coin flip.
    pub speed: (f64, f64),
    pub palette: Vec<Swatch>,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            fill_prob: 0.65,
            spacing: (8.0, 28.0),
            speed: (0.6, 2.0),
            palette: vec![Swatch::Red, Swatch::Blue, Swatch::Grey],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorParams {
    /// Number of connector draws per regeneration (duplicates allowed).
    pub count: usize,
}

impl Default for ConnectorParams {
    fn default() -> Self {
        Self { count: 12 }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Complete generation config.
///
/// Missing sections take their defaults, and so do missing fields inside
/// `blocks`, `agents` and `connectors`. A `columns` or `rows` section, when
/// present, must be complete: its defaults depend on the axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Logical canvas `(width, height)`.
    pub canvas: (f64, f64),
    pub columns: AxisParams,
    pub rows: AxisParams,
    pub blocks: BlockParams,
    pub agents: AgentParams,
    pub connectors: ConnectorParams,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            canvas: (900.0, 900.0),
            columns: AxisParams::columns(),
            rows: AxisParams::rows(),
            blocks: BlockParams::default(),
            agents: AgentParams::default(),
            connectors: ConnectorParams::default(),
        }
    }
}

impl GridConfig {
    pub fn width(&self) -> f64 {
        self.canvas.0
    }

    pub fn height(&self) -> f64 {
        self.canvas.1
    }

    /// Parse from a JSON string. Does not validate.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that would make generation degenerate.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.canvas;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::Canvas { width, height });
        }
        self.columns.validate("column")?;
        self.rows.validate("row")?;

        let b = &self.blocks;
        unit("blocks.prob", b.prob)?;
        unit("blocks.min_frac", b.min_frac)?;
        unit("blocks.max_frac", b.max_frac)?;
        ordered("blocks.min_frac/max_frac", b.min_frac, b.max_frac)?;
        non_negative("blocks.aspect_thresh", b.aspect_thresh)?;
        unit("blocks.overlay_prob", b.overlay_prob)?;
        if b.palette.is_empty() {
            return Err(ConfigError::EmptyPalette { field: "blocks" });
        }

        let a = &self.agents;
        unit("agents.fill_prob", a.fill_prob)?;
        ordered("agents.spacing", a.spacing.0, a.spacing.1)?;
        ordered("agents.speed", a.speed.0, a.speed.1)?;
        if a.palette.is_empty() {
            return Err(ConfigError::EmptyPalette { field: "agents" });
        }
        let thinnest_gap = (self.columns.gap_base - self.columns.gap_delta)
            .min(self.rows.gap_base - self.rows.gap_delta);
        let step = thinnest_gap + a.spacing.0;
        if step <= 0.0 {
            return Err(ConfigError::StalledLane { step });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn unit(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnit { field, value })
    }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}
