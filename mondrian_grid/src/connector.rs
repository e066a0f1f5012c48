// Connectors: white patches that bridge one gap so two neighbouring cells
// read as a single merged cell.
//
// Each draw flips a coin. Heads bridges a vertical gap within one row,
// tails bridges a horizontal gap within one column. Draws are independent:
// the same gap can be bridged twice and connectors can overlap. They are
// purely additive and never touch the layout.

use crate::layout::Layout;
use crate::types::Rect;
use mondrian_prng::RandomSource;
use serde::{Deserialize, Serialize};

/// Which gap family a connector bridges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bridge {
    /// Fills column gap `gap` across row `row` (merges left/right cells).
    Across { row: usize, gap: usize },
    /// Fills row gap `gap` across column `col` (merges upper/lower cells).
    Down { col: usize, gap: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub bridge: Bridge,
    pub rect: Rect,
}

/// Draw `count` connectors over `layout`.
///
/// A draw whose direction has no gaps (a single column or row) produces
/// nothing, so the result can be shorter than `count`.
pub fn generate_connectors(
    count: usize,
    layout: &Layout,
    rng: &mut impl RandomSource,
) -> Vec<Connector> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        if rng.chance(0.5) {
            if layout.col_gaps.is_empty() {
                continue;
            }
            let row = rng.index(layout.rows());
            let gap = rng.index(layout.col_gaps.len());
            out.push(Connector {
                bridge: Bridge::Across { row, gap },
                rect: Rect::new(
                    layout.col_end(gap),
                    layout.row_starts[row],
                    layout.col_gaps[gap],
                    layout.row_heights[row],
                ),
            });
        } else {
            if layout.row_gaps.is_empty() {
                continue;
            }
            let col = rng.index(layout.cols());
            let gap = rng.index(layout.row_gaps.len());
            out.push(Connector {
                bridge: Bridge::Down { col, gap },
                rect: Rect::new(
                    layout.col_starts[col],
                    layout.row_end(gap),
                    layout.col_widths[col],
                    layout.row_gaps[gap],
                ),
            });
        }
    }
    out
}
