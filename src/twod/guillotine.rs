//! 2D Sheet Manager — Guillotine (§4.7).
//!
//! Generalized from the teacher's `GuillotineBin`: `Rect`/`CutDirection`/
//! `RotationConstraint` collapse into this crate's `FreeRect`/`Placement`
//! and the shared orientation/grain machinery in [`crate::twod::geometry`].

use crate::twod::geometry::get_orientations;
use crate::types::{ExpandedPiece2D, FreeRect, Placement};

/// An active sheet for the Guillotine algorithm: a disjoint partition of
/// free rectangles plus the placements made so far.
#[derive(Clone, Debug)]
pub struct GuillotineSheet {
    pub stock_id: String,
    pub width: u32,
    pub height: u32,
    pub free_rects: Vec<FreeRect>,
    pub placements: Vec<Placement>,
    kerf: u32,
}

/// A placement candidate scored by Best Short Side Fit.
#[derive(Copy, Clone, Debug)]
struct ScoredPlacement {
    free_idx: usize,
    width: u32,
    height: u32,
    rotated: bool,
    score: u32,
}

impl GuillotineSheet {
    pub fn new(stock_id: String, width: u32, height: u32, kerf: u32) -> Self {
        Self {
            stock_id,
            width,
            height,
            free_rects: vec![FreeRect {
                x: 0,
                y: 0,
                width,
                height,
            }],
            placements: Vec::new(),
            kerf,
        }
    }

    /// Best Short Side Fit over every `(free rect, orientation)` pair that
    /// fits: minimize `min(rect.w - p.w, rect.h - p.h)`, ties broken by
    /// iteration order.
    fn find_best(&self, piece: &ExpandedPiece2D, allow_rotation: bool, respect_grain: bool) -> Option<ScoredPlacement> {
        let orientations = get_orientations(
            piece.width,
            piece.height,
            piece.can_rotate,
            allow_rotation,
            piece.grain_direction,
            respect_grain,
        );
        let mut best: Option<ScoredPlacement> = None;
        for (idx, free) in self.free_rects.iter().enumerate() {
            for orientation in &orientations {
                if orientation.width > free.width || orientation.height > free.height {
                    continue;
                }
                let score = (free.width - orientation.width).min(free.height - orientation.height);
                let candidate = ScoredPlacement {
                    free_idx: idx,
                    width: orientation.width,
                    height: orientation.height,
                    rotated: orientation.rotated,
                    score,
                };
                if best.map(|b| score < b.score).unwrap_or(true) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// Try to place `piece` using Best Short Side Fit; on success, split
    /// the consumed free rect and return `true`.
    pub fn try_place(&mut self, piece: &ExpandedPiece2D, allow_rotation: bool, respect_grain: bool) -> bool {
        let Some(scored) = self.find_best(piece, allow_rotation, respect_grain) else {
            return false;
        };
        let free = self.free_rects.swap_remove(scored.free_idx);
        self.placements.push(Placement {
            piece_id: piece.id.clone(),
            order_item_id: piece.order_item_id.clone(),
            x: free.x,
            y: free.y,
            width: scored.width,
            height: scored.height,
            rotated: scored.rotated,
        });
        self.split(free, scored.width, scored.height);
        true
    }

    /// Replace the consumed free rect with a right strip and a top strip
    /// (§4.7); zero-area or negative strips are discarded.
    fn split(&mut self, free: FreeRect, placed_w: u32, placed_h: u32) {
        let right_w = free.width.saturating_sub(placed_w + self.kerf);
        let top_h = free.height.saturating_sub(placed_h + self.kerf);

        if right_w > 0 {
            self.free_rects.push(FreeRect {
                x: free.x + placed_w + self.kerf,
                y: free.y,
                width: right_w,
                height: free.height,
            });
        }
        if top_h > 0 {
            self.free_rects.push(FreeRect {
                x: free.x,
                y: free.y + placed_h + self.kerf,
                width: placed_w,
                height: top_h,
            });
        }
    }
}
