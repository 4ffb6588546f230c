//! 2D Sheet Manager — Bottom-Left (§4.6).

use crate::twod::geometry::{can_place_at, candidate_positions, get_orientations};
use crate::types::{ExpandedPiece2D, Placement};

/// An active sheet for the Bottom-Left algorithm. Tracks only its
/// placements; Bottom-Left keeps no free-rect set.
#[derive(Clone, Debug)]
pub struct BottomLeftSheet {
    pub stock_id: String,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
}

impl BottomLeftSheet {
    pub fn new(stock_id: String, width: u32, height: u32) -> Self {
        Self {
            stock_id,
            width,
            height,
            placements: Vec::new(),
        }
    }

    /// `tryPlaceBottomLeft` (§4.6): for each allowed orientation, try every
    /// candidate position in sorted order; place at the first success.
    pub fn try_place(
        &mut self,
        piece: &ExpandedPiece2D,
        kerf: u32,
        allow_rotation: bool,
        respect_grain: bool,
    ) -> bool {
        let orientations = get_orientations(
            piece.width,
            piece.height,
            piece.can_rotate,
            allow_rotation,
            piece.grain_direction,
            respect_grain,
        );
        for orientation in orientations {
            let candidates = candidate_positions(&self.placements, kerf);
            for (x, y) in candidates {
                if can_place_at(
                    x,
                    y,
                    orientation.width,
                    orientation.height,
                    self.width,
                    self.height,
                    kerf,
                    &self.placements,
                ) {
                    self.placements.push(Placement {
                        piece_id: piece.id.clone(),
                        order_item_id: piece.order_item_id.clone(),
                        x,
                        y,
                        width: orientation.width,
                        height: orientation.height,
                        rotated: orientation.rotated,
                    });
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GrainDirection;

    fn piece(id: &str, w: u32, h: u32, can_rotate: bool) -> ExpandedPiece2D {
        ExpandedPiece2D {
            id: id.to_string(),
            original_id: id.to_string(),
            order_item_id: format!("oi-{id}"),
            width: w,
            height: h,
            can_rotate,
            grain_direction: GrainDirection::None,
        }
    }

    /// S5 — 2D Bottom-Left tiling.
    #[test]
    fn s5_bottom_left_tiling() {
        let mut sheet = BottomLeftSheet::new("s1".into(), 1000, 1000);
        assert!(sheet.try_place(&piece("p1", 500, 500, false), 0, true, false));
        assert!(sheet.try_place(&piece("p2", 500, 500, false), 0, true, false));
        assert_eq!(sheet.placements[0].x, 0);
        assert_eq!(sheet.placements[0].y, 0);
        assert_eq!(sheet.placements[1].x, 500);
        assert_eq!(sheet.placements[1].y, 0);
    }

    /// S6 — 2D rotation required.
    #[test]
    fn s6_rotation_required() {
        let mut sheet = BottomLeftSheet::new("s1".into(), 100, 50);
        assert!(sheet.try_place(&piece("p1", 50, 100, true), 0, true, false));
        assert!(sheet.placements[0].rotated);
        assert_eq!(sheet.placements[0].width, 100);
        assert_eq!(sheet.placements[0].height, 50);
    }

    #[test]
    fn rejects_piece_that_overflows_sheet() {
        let mut sheet = BottomLeftSheet::new("s1".into(), 100, 100);
        assert!(!sheet.try_place(&piece("p1", 200, 50, false), 0, true, false));
    }
}
