// Grid layout: gaps, column widths, row heights and cell coordinates.
//
// `build_layout` runs the whole geometric pass in a fixed draw order:
//
//   1. column gaps, then row gaps (`base ± delta` each);
//   2. column widths over `W - sum(column gaps)`, then row heights over
//      `H - sum(row gaps)`, both through `partition::allocate` with the
//      centre-biased weights from `weights.rs`;
//   3. start coordinates, packed cell + gap + cell + ... so the last cell
//      ends at the canvas edge.
//
// The result is an immutable `Layout` value. Everything downstream
// (connectors, blocks, lane agents, the chase overlay, renderers) takes it
// by reference; nothing mutates it after construction. Regeneration builds a
// new one.
//
// See also: `scene.rs` which owns the current layout, `agents.rs` for the
// lane geometry consumers.

use crate::config::{AxisParams, GridConfig};
use crate::partition::{PartitionSpec, allocate};
use crate::types::Rect;
use crate::weights::position_weights;
use mondrian_prng::RandomSource;
use serde::{Deserialize, Serialize};

/// One generated grid partition of the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub col_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    /// `col_gaps[c]` separates column `c` from column `c + 1`.
    pub col_gaps: Vec<f64>,
    /// `row_gaps[r]` separates row `r` from row `r + 1`.
    pub row_gaps: Vec<f64>,
    pub col_starts: Vec<f64>,
    pub row_starts: Vec<f64>,
}

/// A cell with its grid address.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
}

impl Layout {
    pub fn cols(&self) -> usize {
        self.col_widths.len()
    }

    pub fn rows(&self) -> usize {
        self.row_heights.len()
    }

    /// Right edge of column `c`, i.e. where gap `c` begins.
    pub fn col_end(&self, c: usize) -> f64 {
        self.col_starts[c] + self.col_widths[c]
    }

    /// Bottom edge of row `r`, i.e. where gap `r` begins.
    pub fn row_end(&self, r: usize) -> f64 {
        self.row_starts[r] + self.row_heights[r]
    }

    pub fn cell(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.col_starts[col],
            self.row_starts[row],
            self.col_widths[col],
            self.row_heights[row],
        )
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.cols()).map(move |col| Cell {
                row,
                col,
                rect: self.cell(row, col),
            })
        })
    }

    /// Full-height strip of the gap between column `c` and `c + 1`.
    pub fn vertical_lane(&self, c: usize) -> Rect {
        Rect::new(self.col_end(c), 0.0, self.col_gaps[c], self.height)
    }

    /// Full-width strip of the gap between row `r` and `r + 1`.
    pub fn horizontal_lane(&self, r: usize) -> Rect {
        Rect::new(0.0, self.row_end(r), self.width, self.row_gaps[r])
    }
}

/// Generate a fresh layout for `config`.
pub fn build_layout(config: &GridConfig, rng: &mut impl RandomSource) -> Layout {
    let col_gaps = jitter_gaps(&config.columns, rng);
    let row_gaps = jitter_gaps(&config.rows, rng);

    let avail_w = config.width() - col_gaps.iter().sum::<f64>();
    let avail_h = config.height() - row_gaps.iter().sum::<f64>();

    let col_widths = partition_axis(&config.columns, avail_w, rng);
    let row_heights = partition_axis(&config.rows, avail_h, rng);

    let col_starts = packed_starts(&col_widths, &col_gaps);
    let row_starts = packed_starts(&row_heights, &row_gaps);

    Layout {
        width: config.width(),
        height: config.height(),
        col_widths,
        row_heights,
        col_gaps,
        row_gaps,
        col_starts,
        row_starts,
    }
}

fn jitter_gaps(axis: &AxisParams, rng: &mut impl RandomSource) -> Vec<f64> {
    (0..axis.count.saturating_sub(1))
        .map(|_| axis.gap_base + rng.range_f64(-axis.gap_delta, axis.gap_delta))
        .collect()
}

fn partition_axis(axis: &AxisParams, avail: f64, rng: &mut impl RandomSource) -> Vec<f64> {
    let weights = position_weights(axis.count, axis.center_power);
    let spec = PartitionSpec {
        total: avail,
        min: axis.min_size,
        max: axis.max_size,
        spread: axis.spread,
    };
    allocate(&spec, &weights, rng)
}

/// `starts[0] = 0`, `starts[i] = starts[i-1] + sizes[i-1] + gaps[i-1]`.
fn packed_starts(sizes: &[f64], gaps: &[f64]) -> Vec<f64> {
    let mut starts = Vec::with_capacity(sizes.len());
    let mut at = 0.0;
    for (i, size) in sizes.iter().enumerate() {
        starts.push(at);
        at = at + size + gaps.get(i).copied().unwrap_or(0.0);
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use mondrian_prng::{GridRng, SequenceRng};

    fn build(seed: u64) -> Layout {
        build_layout(&GridConfig::default(), &mut GridRng::new(seed))
    }

    #[test]
    fn default_grid_dimensions() {
        let layout = build(1);
        assert_eq!(layout.cols(), 10);
        assert_eq!(layout.rows(), 10);
        assert_eq!(layout.col_gaps.len(), 9);
        assert_eq!(layout.row_gaps.len(), 9);
        assert_eq!(layout.cells().count(), 100);
    }

    #[test]
    fn gaps_stay_within_jitter() {
        for seed in 0..20 {
            let layout = build(seed);
            for g in layout.col_gaps.iter().chain(&layout.row_gaps) {
                assert!((12.0..=18.0).contains(g), "gap {g} outside 15±3");
            }
        }
    }

    #[test]
    fn cells_pack_to_canvas_edge() {
        for seed in 0..20 {
            let layout = build(seed);
            for c in 0..layout.cols() - 1 {
                assert_eq!(
                    layout.col_starts[c] + layout.col_widths[c] + layout.col_gaps[c],
                    layout.col_starts[c + 1]
                );
            }
            for r in 0..layout.rows() - 1 {
                assert_eq!(
                    layout.row_starts[r] + layout.row_heights[r] + layout.row_gaps[r],
                    layout.row_starts[r + 1]
                );
            }
            assert!((layout.col_end(layout.cols() - 1) - 900.0).abs() < 1e-9);
            assert!((layout.row_end(layout.rows() - 1) - 900.0).abs() < 1e-9);

            let total_w: f64 =
                layout.col_widths.iter().sum::<f64>() + layout.col_gaps.iter().sum::<f64>();
            assert!((total_w - 900.0).abs() < 1e-9);
        }
    }

    #[test]
    fn lanes_sit_between_cells() {
        let layout = build(5);
        for c in 0..layout.cols() - 1 {
            let lane = layout.vertical_lane(c);
            assert_eq!(lane.x, layout.col_end(c));
            assert!((lane.right() - layout.col_starts[c + 1]).abs() < 1e-9);
            assert_eq!(lane.h, 900.0);
        }
        for r in 0..layout.rows() - 1 {
            let lane = layout.horizontal_lane(r);
            assert_eq!(lane.y, layout.row_end(r));
            assert!((lane.bottom() - layout.row_starts[r + 1]).abs() < 1e-9);
        }
    }

    #[test]
    fn cells_never_overlap() {
        let layout = build(11);
        let cells: Vec<Cell> = layout.cells().collect();
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                let disjoint = a.rect.right() <= b.rect.x + 1e-9
                    || b.rect.right() <= a.rect.x + 1e-9
                    || a.rect.bottom() <= b.rect.y + 1e-9
                    || b.rect.bottom() <= a.rect.y + 1e-9;
                assert!(disjoint, "cells {a:?} and {b:?} overlap");
            }
        }
    }

    #[test]
    fn single_cell_grid_fills_canvas() {
        let mut config = GridConfig::default();
        config.columns.count = 1;
        config.rows.count = 1;
        let layout = build_layout(&config, &mut GridRng::new(3));
        assert!(layout.col_gaps.is_empty());
        assert!((layout.col_widths[0] - 900.0).abs() < 1e-9);
        assert_eq!(layout.cell(0, 0).x, 0.0);
    }

    #[test]
    fn scripted_gaps_use_base_plus_jitter() {
        let mut config = GridConfig::default();
        config.columns.count = 2;
        config.rows.count = 2;
        // Column gap draws 1.0 → +delta, row gap draws 0.0 → -delta; the
        // remaining draws feed the partitions.
        let mut rng = SequenceRng::new(vec![1.0, 0.0, 0.5]);
        let layout = build_layout(&config, &mut rng);
        assert_eq!(layout.col_gaps, vec![18.0]);
        assert_eq!(layout.row_gaps, vec![12.0]);
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(build(42), build(42));
        assert_ne!(build(42), build(43));
    }
}
