//! Piece Expander: unroll `(id, quantity)` groups into unique units and
//! provide the sort strategies consumed by the dispatchers.

use crate::types::{ExpandedPiece1D, ExpandedPiece2D, PieceInput1D, PieceInput2D, SortStrategy};

/// Unroll each [`PieceInput1D`] of quantity `n` into `n` [`ExpandedPiece1D`]
/// units, preserving input group order and ascending index within a group.
pub fn expand_1d(pieces: &[PieceInput1D]) -> Vec<ExpandedPiece1D> {
    let mut out = Vec::new();
    for piece in pieces {
        for i in 0..piece.quantity {
            out.push(ExpandedPiece1D {
                id: format!("{}_{}", piece.id, i),
                original_id: piece.id.clone(),
                order_item_id: piece.order_item_id.clone(),
                length: piece.length,
            });
        }
    }
    out
}

/// Unroll each [`PieceInput2D`] of quantity `n` into `n` [`ExpandedPiece2D`]
/// units, preserving input group order and ascending index within a group.
pub fn expand_2d(pieces: &[PieceInput2D]) -> Vec<ExpandedPiece2D> {
    let mut out = Vec::new();
    for piece in pieces {
        for i in 0..piece.quantity {
            out.push(ExpandedPiece2D {
                id: format!("{}_{}", piece.id, i),
                original_id: piece.id.clone(),
                order_item_id: piece.order_item_id.clone(),
                width: piece.width,
                height: piece.height,
                can_rotate: piece.can_rotate,
                grain_direction: piece.grain_direction,
            });
        }
    }
    out
}

/// Stable sort descending by `length`. Ties preserve expansion order.
pub fn sort_by_length_desc(pieces: &mut [ExpandedPiece1D]) {
    pieces.sort_by(|a, b| b.length.cmp(&a.length));
}

/// Stable sort descending by `width * height`. Ties preserve expansion order.
pub fn sort_by_area_desc(pieces: &mut [ExpandedPiece2D]) {
    pieces.sort_by(|a, b| b.area().cmp(&a.area()));
}

/// Apply one of the alternative 2D sort strategies (§4.1), used by the
/// MAXRECTS orchestrator. All are stable and descending on their key.
pub fn sort_by_strategy(pieces: &mut [ExpandedPiece2D], strategy: SortStrategy) {
    match strategy {
        SortStrategy::AreaDesc => sort_by_area_desc(pieces),
        SortStrategy::ShortSide => pieces.sort_by(|a, b| b.short_side().cmp(&a.short_side())),
        SortStrategy::LongSide => pieces.sort_by(|a, b| b.long_side().cmp(&a.long_side())),
        SortStrategy::Perimeter => pieces.sort_by(|a, b| b.perimeter().cmp(&a.perimeter())),
        SortStrategy::Difference => pieces.sort_by(|a, b| b.side_difference().cmp(&a.side_difference())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceInput1D;

    fn piece1d(id: &str, length: u32, qty: u32) -> PieceInput1D {
        PieceInput1D {
            id: id.to_string(),
            length,
            quantity: qty,
            order_item_id: format!("oi-{id}"),
        }
    }

    #[test]
    fn expand_preserves_group_order_and_index() {
        let pieces = vec![piece1d("p1", 500, 2), piece1d("p2", 300, 1)];
        let expanded = expand_1d(&pieces);
        assert_eq!(expanded.len(), 3);
        assert_eq!(expanded[0].id, "p1_0");
        assert_eq!(expanded[1].id, "p1_1");
        assert_eq!(expanded[2].id, "p2_0");
    }

    #[test]
    fn sort_length_desc_is_stable() {
        let pieces = vec![piece1d("a", 100, 1), piece1d("b", 100, 1), piece1d("c", 200, 1)];
        let mut expanded = expand_1d(&pieces);
        sort_by_length_desc(&mut expanded);
        assert_eq!(expanded[0].original_id, "c");
        assert_eq!(expanded[1].original_id, "a");
        assert_eq!(expanded[2].original_id, "b");
    }
}
