//! 2D Geometry Primitives (§4.5): overlap/bounds tests, kerf expansion,
//! orientation enumeration and Bottom-Left candidate positions.

use crate::types::{ExpandedRect, GrainDirection, Placement};

/// Strict overlap on both axes; touching edges do not overlap.
pub fn rectangles_overlap(a: &ExpandedRect, b: &ExpandedRect) -> bool {
    a.overlaps(b)
}

/// Whether a `width x height` rect placed at `(x, y)` lies fully within
/// `[0, bound_w] x [0, bound_h]`.
pub fn is_within_bounds(x: u32, y: u32, width: u32, height: u32, bound_w: u32, bound_h: u32) -> bool {
    x + width <= bound_w && y + height <= bound_h
}

/// One candidate orientation of a piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Orientation {
    pub width: u32,
    pub height: u32,
    pub rotated: bool,
}

/// Orientations a piece may be placed in: always the unrotated one, plus the
/// rotated one when the piece and the call both allow rotation and the piece
/// isn't square. Grain direction, when respected, vetoes the rotated
/// orientation for `HORIZONTAL`/`VERTICAL` pieces (§4.8).
pub fn get_orientations(
    width: u32,
    height: u32,
    piece_can_rotate: bool,
    global_allow_rotation: bool,
    grain: GrainDirection,
    respect_grain: bool,
) -> Vec<Orientation> {
    let mut out = vec![Orientation {
        width,
        height,
        rotated: false,
    }];
    let grain_vetoes_rotation = respect_grain && !matches!(grain, GrainDirection::None);
    if piece_can_rotate && global_allow_rotation && width != height && !grain_vetoes_rotation {
        out.push(Orientation {
            width: height,
            height: width,
            rotated: true,
        });
    }
    out
}

/// Candidate placement origins derived from the current placements:
/// `{(0,0)}` plus each placement's right-of and above-of corner (kerf
/// separated), sorted `y` ascending then `x` ascending ("lowest row, then
/// leftmost").
pub fn candidate_positions(placements: &[Placement], kerf: u32) -> Vec<(u32, u32)> {
    let mut positions = vec![(0u32, 0u32)];
    for p in placements {
        positions.push((p.x + p.width + kerf, p.y));
        positions.push((p.x, p.y + p.height + kerf));
    }
    positions.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    positions.dedup();
    positions
}

/// Whether placing `width x height` at `(x, y)` (kerf-expanded) is free of
/// overlap with every existing kerf-expanded placement and within bounds.
pub fn can_place_at(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    bound_w: u32,
    bound_h: u32,
    kerf: u32,
    placements: &[Placement],
) -> bool {
    if !is_within_bounds(x, y, width, height, bound_w, bound_h) {
        return false;
    }
    let candidate = Placement {
        piece_id: String::new(),
        order_item_id: String::new(),
        x,
        y,
        width,
        height,
        rotated: false,
    }
    .expanded(kerf);
    !placements.iter().any(|p| p.expanded(kerf).overlaps(&candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_piece_has_one_orientation() {
        let orientations = get_orientations(50, 50, true, true, GrainDirection::None, false);
        assert_eq!(orientations.len(), 1);
    }

    #[test]
    fn non_square_rotatable_piece_has_two_orientations() {
        let orientations = get_orientations(50, 100, true, true, GrainDirection::None, false);
        assert_eq!(orientations.len(), 2);
    }

    #[test]
    fn grain_direction_vetoes_rotation_when_respected() {
        let orientations = get_orientations(50, 100, true, true, GrainDirection::Horizontal, true);
        assert_eq!(orientations.len(), 1);
        assert!(!orientations[0].rotated);
    }

    #[test]
    fn candidate_positions_sorted_y_then_x() {
        let placements = vec![Placement {
            piece_id: "p".into(),
            order_item_id: "oi".into(),
            x: 0,
            y: 0,
            width: 500,
            height: 500,
            rotated: false,
        }];
        let candidates = candidate_positions(&placements, 0);
        assert_eq!(candidates[0], (0, 0));
        assert!(candidates.contains(&(500, 0)));
        assert!(candidates.contains(&(0, 500)));
    }
}
