//! MAXRECTS Engine (§4.8): maximal free-rectangle tracking, the five
//! placement heuristics plus `BEST`, and grain-aware splitting.
//!
//! Grounded on `jasonrhansen-cut-optimizer-2d`'s `maxrects.rs`
//! (`FreeRectChoiceHeuristic`, `split_free_rect`, `prune_free_rects`),
//! generalized to this crate's `FreeRect`/`Placement` types and the
//! Rust-integer-coordinate / kerf model used throughout this engine.

use crate::twod::geometry::get_orientations;
use crate::types::{ExpandedPiece2D, FreeRect, Heuristic, Placement};

/// An active sheet for the MAXRECTS family: a set of maximal free
/// rectangles plus the placements made so far.
#[derive(Clone, Debug)]
pub struct MaxRectsSheet {
    pub stock_id: String,
    pub width: u32,
    pub height: u32,
    pub free_rects: Vec<FreeRect>,
    pub placements: Vec<Placement>,
    kerf: u32,
    sliver_threshold: u32,
}

/// A placement candidate under one heuristic.
#[derive(Copy, Clone, Debug)]
struct ScoredPlacement {
    free_idx: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    rotated: bool,
    /// Lexicographic score; lower is better across all heuristics.
    score: (i64, i64),
}

impl MaxRectsSheet {
    pub fn new(stock_id: String, width: u32, height: u32, kerf: u32, sliver_threshold: u32) -> Self {
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
            sliver_threshold,
        }
    }

    /// Best candidate placement on this sheet under `heuristic`, or `None`
    /// if the piece fits nowhere. `BEST` runs every heuristic and keeps the
    /// globally lowest-scoring placement.
    pub fn best_candidate(
        &self,
        piece: &ExpandedPiece2D,
        allow_rotation: bool,
        respect_grain: bool,
        heuristic: Heuristic,
    ) -> Option<ScoredCandidate> {
        let orientations = get_orientations(
            piece.width,
            piece.height,
            piece.can_rotate,
            allow_rotation,
            piece.grain_direction,
            respect_grain,
        );

        let heuristics: Vec<Heuristic> = if heuristic == Heuristic::Best {
            vec![Heuristic::Bssf, Heuristic::Blsf, Heuristic::Baf, Heuristic::Bl, Heuristic::Cp]
        } else {
            vec![heuristic]
        };

        let mut best: Option<ScoredPlacement> = None;
        for h in &heuristics {
            for (idx, free) in self.free_rects.iter().enumerate() {
                for orientation in &orientations {
                    if orientation.width > free.width || orientation.height > free.height {
                        continue;
                    }
                    let score = self.score(free, orientation.width, orientation.height, *h);
                    let candidate = ScoredPlacement {
                        free_idx: idx,
                        x: free.x,
                        y: free.y,
                        width: orientation.width,
                        height: orientation.height,
                        rotated: orientation.rotated,
                        score,
                    };
                    if best.map(|b| candidate.score < b.score).unwrap_or(true) {
                        best = Some(candidate);
                    }
                }
            }
        }
        best.map(|b| ScoredCandidate {
            score: score_to_f64(b.score),
            placement: b,
        })
    }

    fn score(&self, free: &FreeRect, w: u32, h: u32, heuristic: Heuristic) -> (i64, i64) {
        let leftover_w = (free.width - w) as i64;
        let leftover_h = (free.height - h) as i64;
        match heuristic {
            Heuristic::Bssf => (leftover_w.min(leftover_h), leftover_w.max(leftover_h)),
            Heuristic::Blsf => (leftover_w.max(leftover_h), leftover_w.min(leftover_h)),
            Heuristic::Baf => (free.area() as i64 - (w as u64 * h as u64) as i64, 0),
            Heuristic::Bl => ((free.y + h) as i64, free.x as i64),
            Heuristic::Cp => (-(self.contact_length(free.x, free.y, w, h) as i64), 0),
            Heuristic::Best => unreachable!("BEST is expanded into its constituent heuristics"),
        }
    }

    /// Perimeter length touching the sheet edges or existing placements;
    /// used (negated) as the Contact Point score.
    fn contact_length(&self, x: u32, y: u32, w: u32, h: u32) -> u64 {
        let mut contact: u64 = 0;
        if x == 0 {
            contact += h as u64;
        }
        if y == 0 {
            contact += w as u64;
        }
        if x + w == self.width {
            contact += h as u64;
        }
        if y + h == self.height {
            contact += w as u64;
        }
        for p in &self.placements {
            if p.x + p.width == x || x + w == p.x {
                contact += common_interval_length(y, y + h, p.y, p.y + p.height) as u64;
            }
            if p.y + p.height == y || y + h == p.y {
                contact += common_interval_length(x, x + w, p.x, p.x + p.width) as u64;
            }
        }
        contact
    }

    /// Place a previously scored candidate: append it, split every free
    /// rect the kerf-expanded placement intersects into up to four maximal
    /// strips, then prune contained rects (§4.8 steps 1–3).
    pub fn place(&mut self, piece: &ExpandedPiece2D, candidate: ScoredCandidate) {
        let b = candidate.placement;
        self.placements.push(Placement {
            piece_id: piece.id.clone(),
            order_item_id: piece.order_item_id.clone(),
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            rotated: b.rotated,
        });

        let placed = FreeRect {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
        };
        let expanded = expand_rect(&placed, self.kerf);

        let mut next = Vec::with_capacity(self.free_rects.len() + 4);
        for free in &self.free_rects {
            if !rects_intersect(free, &expanded) {
                next.push(*free);
                continue;
            }
            next.extend(self.split_free_rect(free, &expanded));
        }
        self.free_rects = next;
        self.prune_contained();
    }

    /// Up to four maximal strips of `free` minus `cut` (left, right, below,
    /// above), discarding slivers at or below `sliver_threshold`.
    fn split_free_rect(&self, free: &FreeRect, cut: &FreeRect) -> Vec<FreeRect> {
        let mut out = Vec::with_capacity(4);
        let free_right = free.x + free.width;
        let free_top = free.y + free.height;
        let cut_right = cut.x + cut.width;
        let cut_top = cut.y + cut.height;

        if cut.x > free.x {
            out.push(FreeRect {
                x: free.x,
                y: free.y,
                width: cut.x - free.x,
                height: free.height,
            });
        }
        if cut_right < free_right {
            out.push(FreeRect {
                x: cut_right,
                y: free.y,
                width: free_right - cut_right,
                height: free.height,
            });
        }
        if cut.y > free.y {
            out.push(FreeRect {
                x: free.x,
                y: free.y,
                width: free.width,
                height: cut.y - free.y,
            });
        }
        if cut_top < free_top {
            out.push(FreeRect {
                x: free.x,
                y: cut_top,
                width: free.width,
                height: free_top - cut_top,
            });
        }
        out.retain(|r| r.width > self.sliver_threshold && r.height > self.sliver_threshold);
        out
    }

    /// Remove every free rect fully contained in another (§4.8 step 3,
    /// invariant #10: no rect is a proper subset of another afterwards).
    fn prune_contained(&mut self) {
        let mut keep = vec![true; self.free_rects.len()];
        for i in 0..self.free_rects.len() {
            if !keep[i] {
                continue;
            }
            for j in 0..self.free_rects.len() {
                if i == j || !keep[j] {
                    continue;
                }
                if self.free_rects[j].contains(&self.free_rects[i]) && self.free_rects[i] != self.free_rects[j] {
                    keep[i] = false;
                    break;
                }
            }
        }
        let mut idx = 0;
        self.free_rects.retain(|_| {
            let k = keep[idx];
            idx += 1;
            k
        });
    }
}

/// A scored candidate placement on a particular sheet, used by the
/// multi-sheet `selectBestSheet` comparison in the orchestrator.
#[derive(Copy, Clone, Debug)]
pub struct ScoredCandidate {
    pub score: f64,
    placement: ScoredPlacement,
}

fn score_to_f64(score: (i64, i64)) -> f64 {
    score.0 as f64 + (score.1 as f64) / 1e12
}

fn expand_rect(r: &FreeRect, kerf: u32) -> FreeRect {
    FreeRect {
        x: r.x.saturating_sub(kerf),
        y: r.y.saturating_sub(kerf),
        width: r.width + 2 * kerf,
        height: r.height + 2 * kerf,
    }
}

fn rects_intersect(a: &FreeRect, b: &FreeRect) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

fn common_interval_length(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> u32 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    end.saturating_sub(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GrainDirection;

    fn piece(id: &str, w: u32, h: u32) -> ExpandedPiece2D {
        ExpandedPiece2D {
            id: id.to_string(),
            original_id: id.to_string(),
            order_item_id: format!("oi-{id}"),
            width: w,
            height: h,
            can_rotate: false,
            grain_direction: GrainDirection::None,
        }
    }

    #[test]
    fn maximality_holds_after_place() {
        let mut sheet = MaxRectsSheet::new("s1".into(), 1000, 1000, 0, 1);
        let p = piece("p1", 300, 200);
        let candidate = sheet.best_candidate(&p, true, false, Heuristic::Bssf).unwrap();
        sheet.place(&p, candidate);
        for i in 0..sheet.free_rects.len() {
            for j in 0..sheet.free_rects.len() {
                if i != j {
                    assert!(!sheet.free_rects[j].contains(&sheet.free_rects[i]));
                }
            }
        }
    }

    #[test]
    fn best_heuristic_finds_a_placement_when_one_exists() {
        let mut sheet = MaxRectsSheet::new("s1".into(), 500, 500, 0, 1);
        let p = piece("p1", 100, 100);
        let candidate = sheet.best_candidate(&p, true, false, Heuristic::Best).unwrap();
        sheet.place(&p, candidate);
        assert_eq!(sheet.placements.len(), 1);
    }

    #[test]
    fn sliver_threshold_discards_thin_strips() {
        let sheet = MaxRectsSheet::new("s1".into(), 101, 100, 0, 5);
        let free = FreeRect {
            x: 0,
            y: 0,
            width: 101,
            height: 100,
        };
        let cut = FreeRect {
            x: 0,
            y: 0,
            width: 100,
            height: 100,
        };
        let strips = sheet.split_free_rect(&free, &cut);
        assert!(strips.is_empty());
    }
}
