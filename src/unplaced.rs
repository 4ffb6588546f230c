//! Unplaced Collector: re-aggregates unplaced expanded pieces back into
//! `(id, quantity)` groups for reporting.

use std::collections::BTreeMap;

use crate::types::{ExpandedPiece1D, ExpandedPiece2D, GrainDirection, PieceInput1D, PieceInput2D};

/// Group unplaced 1D units by `original_id`, preserving first-seen order.
pub fn collect_1d(unplaced: &[ExpandedPiece1D]) -> Vec<PieceInput1D> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, (u32, u32, String)> = BTreeMap::new();
    for piece in unplaced {
        let entry = groups
            .entry(piece.original_id.clone())
            .or_insert_with(|| {
                order.push(piece.original_id.clone());
                (piece.length, 0, piece.order_item_id.clone())
            });
        entry.1 += 1;
    }
    order
        .into_iter()
        .map(|id| {
            let (length, quantity, order_item_id) = groups.remove(&id).unwrap();
            PieceInput1D {
                id,
                length,
                quantity,
                order_item_id,
            }
        })
        .collect()
}

/// Group unplaced 2D units by `original_id`, preserving first-seen order.
pub fn collect_2d(unplaced: &[ExpandedPiece2D]) -> Vec<PieceInput2D> {
    let mut order: Vec<String> = Vec::new();
    #[allow(clippy::type_complexity)]
    let mut groups: BTreeMap<String, (u32, u32, u32, String, bool, GrainDirection)> = BTreeMap::new();
    for piece in unplaced {
        let entry = groups.entry(piece.original_id.clone()).or_insert_with(|| {
            order.push(piece.original_id.clone());
            (
                piece.width,
                piece.height,
                0,
                piece.order_item_id.clone(),
                piece.can_rotate,
                piece.grain_direction,
            )
        });
        entry.2 += 1;
    }
    order
        .into_iter()
        .map(|id| {
            let (width, height, quantity, order_item_id, can_rotate, grain_direction) =
                groups.remove(&id).unwrap();
            PieceInput2D {
                id,
                width,
                height,
                quantity,
                order_item_id,
                can_rotate,
                grain_direction,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_preserve_first_seen_order_and_accumulate_quantity() {
        let unplaced = vec![
            ExpandedPiece1D {
                id: "p1_0".into(),
                original_id: "p1".into(),
                order_item_id: "oi1".into(),
                length: 500,
            },
            ExpandedPiece1D {
                id: "p1_1".into(),
                original_id: "p1".into(),
                order_item_id: "oi1".into(),
                length: 500,
            },
        ];
        let grouped = collect_1d(&unplaced);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].quantity, 2);
        assert_eq!(grouped[0].id, "p1");
    }
}
