// Coloured strips inside cells.
//
// First pass, per cell (row-major): with probability `prob` the cell gets a
// big block whose orientation follows the cell's shape. Clearly wide cells
// (`w/h >= aspect_thresh`) get an `EqualHeight` strip: full cell height,
// width drawn from `[min_frac, max_frac]` of the cell width, slid to a random
// horizontal offset. Clearly tall cells get the transposed `EqualWidth`
// strip. Near-square cells flip a coin.
//
// Second pass, per big block: with probability `overlay_prob` a smaller
// block is nested inside it using the opposite orientation and a colour
// different from the parent's.
//
// Every strip is placed with `offset ∈ [0, free - extent]`, so blocks stay
// inside their cell and overlays inside their parent.

use crate::config::BlockParams;
use crate::layout::Layout;
use crate::types::{Rect, StripMode, Swatch};
use log::debug;
use mondrian_prng::RandomSource;
use serde::{Deserialize, Serialize};

/// First-pass block, tied to the cell it sits in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BigBlock {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub color: Swatch,
    pub mode: StripMode,
}

/// Second-pass block nested in `primary[parent]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayBlock {
    pub parent: usize,
    pub rect: Rect,
    pub color: Swatch,
    pub mode: StripMode,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockSet {
    pub primary: Vec<BigBlock>,
    pub overlay: Vec<OverlayBlock>,
}

impl BlockSet {
    /// Rectangles in paint order: all big blocks, then all overlays.
    pub fn paint_order(&self) -> impl Iterator<Item = (Rect, Swatch)> + '_ {
        self.primary
            .iter()
            .map(|b| (b.rect, b.color))
            .chain(self.overlay.iter().map(|o| (o.rect, o.color)))
    }

    pub fn len(&self) -> usize {
        self.primary.len() + self.overlay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.overlay.is_empty()
    }
}

/// Populate the cells of `layout` with big blocks and overlays.
pub fn generate_blocks(
    layout: &Layout,
    params: &BlockParams,
    rng: &mut impl RandomSource,
) -> BlockSet {
    let mut primary = Vec::new();
    for cell in layout.cells() {
        if !rng.chance(params.prob) {
            continue;
        }
        let Some(&color) = rng.pick(&params.palette) else {
            continue;
        };
        let mode = choose_mode(&cell.rect, params.aspect_thresh, rng);
        let rect = strip(&cell.rect, mode, params, rng);
        primary.push(BigBlock {
            row: cell.row,
            col: cell.col,
            rect,
            color,
            mode,
        });
    }

    let mut overlay = Vec::new();
    for (parent, block) in primary.iter().enumerate() {
        if !rng.chance(params.overlay_prob) {
            continue;
        }
        let alternatives: Vec<Swatch> = params
            .palette
            .iter()
            .copied()
            .filter(|c| *c != block.color)
            .collect();
        let Some(&color) = rng.pick(&alternatives) else {
            debug!("blocks: no colour differs from {:?}, skipping overlay", block.color);
            continue;
        };
        let mode = block.mode.opposite();
        overlay.push(OverlayBlock {
            parent,
            rect: strip(&block.rect, mode, params, rng),
            color,
            mode,
        });
    }

    BlockSet { primary, overlay }
}

fn choose_mode(cell: &Rect, thresh: f64, rng: &mut impl RandomSource) -> StripMode {
    if cell.w / cell.h >= thresh {
        StripMode::EqualHeight
    } else if cell.h / cell.w >= thresh {
        StripMode::EqualWidth
    } else if rng.chance(0.5) {
        StripMode::EqualHeight
    } else {
        StripMode::EqualWidth
    }
}

/// A strip spanning `parent` fully in one dimension and partially in the
/// other.
fn strip(parent: &Rect, mode: StripMode, params: &BlockParams, rng: &mut impl RandomSource) -> Rect {
    match mode {
        StripMode::EqualHeight => {
            let w = rng.range_f64(params.min_frac * parent.w, params.max_frac * parent.w);
            let x = parent.x + rng.range_f64(0.0, parent.w - w);
            Rect::new(x, parent.y, w, parent.h)
        }
        StripMode::EqualWidth => {
            let h = rng.range_f64(params.min_frac * parent.h, params.max_frac * parent.h);
            let y = parent.y + rng.range_f64(0.0, parent.h - h);
            Rect::new(parent.x, y, parent.w, h)
        }
    }
}
