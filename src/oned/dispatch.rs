//! 1D Dispatcher: shared FFD/BFD skeleton (§4.4).

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::expand::{expand_1d, sort_by_length_desc};
use crate::oned::bin::{find_best_fit_bar, find_first_fit_bar, ActiveBar};
use crate::stats::build_result_1d;
use crate::stock::{Ordering, StockManager1D};
use crate::types::{Algorithm1D, Options1D, PieceInput1D, Result1D, StockInput1D};
use crate::unplaced::collect_1d;

/// Validate pieces/stock/options and reject malformed input before any
/// placement begins (spec §7: InvalidInput is fail-fast).
///
/// `kerf` and `min_usable_waste` are `u32` on [`Options1D`], so a negative
/// value can never reach this function; there is nothing left for it to
/// validate on `options`.
pub fn validate(pieces: &[PieceInput1D], stock: &[StockInput1D], _options: &Options1D) -> EngineResult<()> {
    for p in pieces {
        if p.length == 0 {
            return Err(EngineError::InvalidDimension {
                field: "piece.length",
                value: p.length as i64,
            });
        }
    }
    for s in stock {
        if s.length == 0 {
            return Err(EngineError::InvalidDimension {
                field: "stock.length",
                value: s.length as i64,
            });
        }
    }
    Ok(())
}

/// `optimize1D(pieces, stock, options) -> Result1D` (§6).
///
/// `BRANCH_BOUND` aliases to `BFD` (§4.4, §9) — preserved as a documented
/// placeholder until a true branch-and-bound ships.
pub fn optimize_1d(pieces: &[PieceInput1D], stock: &[StockInput1D], options: &Options1D) -> EngineResult<Result1D> {
    validate(pieces, stock, options)?;

    let mut expanded = expand_1d(pieces);
    debug!(count = expanded.len(), "expanded 1D pieces");
    sort_by_length_desc(&mut expanded);

    let stock_ordering = match options.algorithm {
        Algorithm1D::Ffd => Ordering::Desc,
        Algorithm1D::Bfd | Algorithm1D::BranchBound => Ordering::Asc,
    };
    let mut stock_manager = StockManager1D::new(stock, stock_ordering);

    let mut bars: Vec<ActiveBar> = Vec::new();
    let mut unplaced = Vec::new();
    let kerf = options.kerf;

    for piece in expanded {
        let bar_idx = match options.algorithm {
            Algorithm1D::Ffd => find_first_fit_bar(&bars, piece.length, kerf),
            Algorithm1D::Bfd | Algorithm1D::BranchBound => find_best_fit_bar(&bars, piece.length, kerf),
        };

        if let Some(idx) = bar_idx {
            bars[idx].place_piece(&piece.id, &piece.order_item_id, piece.length, kerf);
            continue;
        }

        match stock_manager.find_available_stock(piece.length) {
            Some((stock_id, stock_length)) => {
                stock_manager.consume(&stock_id);
                let mut bar = ActiveBar::new(stock_id, stock_length);
                bar.place_piece(&piece.id, &piece.order_item_id, piece.length, kerf);
                bars.push(bar);
            }
            None => unplaced.push(piece),
        }
    }

    let placed_count: usize = bars.iter().map(|b| b.cuts.len()).sum();
    let unplaced_pieces = collect_1d(&unplaced);

    Ok(build_result_1d(bars, unplaced_pieces, placed_count, kerf, options.min_usable_waste))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Algorithm1D;

    fn piece(id: &str, length: u32, qty: u32) -> PieceInput1D {
        PieceInput1D {
            id: id.to_string(),
            length,
            quantity: qty,
            order_item_id: format!("oi-{id}"),
        }
    }

    fn stock(id: &str, length: u32, available: u32) -> StockInput1D {
        StockInput1D {
            id: id.to_string(),
            length,
            available,
            unit_price: None,
        }
    }

    /// S1 — 1D perfect fit (FFD).
    #[test]
    fn s1_perfect_fit() {
        let pieces = vec![piece("p1", 500, 1), piece("p2", 500, 1)];
        let stock = vec![stock("s1", 1000, 1)];
        let opts = Options1D {
            algorithm: Algorithm1D::Ffd,
            kerf: 0,
            min_usable_waste: 0,
        };
        let result = optimize_1d(&pieces, &stock, &opts).unwrap();
        assert!(result.success);
        assert_eq!(result.stock_used_count, 1);
        assert_eq!(result.bars[0].cuts.len(), 2);
        assert_eq!(result.total_waste, 0);
    }

    /// S2 — 1D kerf positioning (FFD).
    #[test]
    fn s2_kerf_positioning() {
        let pieces = vec![piece("p1", 495, 2)];
        let stock = vec![stock("s1", 1000, 1)];
        let opts = Options1D {
            algorithm: Algorithm1D::Ffd,
            kerf: 10,
            min_usable_waste: 0,
        };
        let result = optimize_1d(&pieces, &stock, &opts).unwrap();
        assert_eq!(result.bars.len(), 1);
        assert_eq!(result.bars[0].cuts[0].position, 0);
        assert_eq!(result.bars[0].cuts[1].position, 505);
        assert_eq!(result.bars[0].waste, 0);
    }

    /// S3 — 1D BFD tight-fit selection.
    #[test]
    fn s3_bfd_tight_fit() {
        let pieces = vec![piece("p1", 800, 1)];
        let stock = vec![stock("big", 1000, 1), stock("small", 900, 1)];
        let opts = Options1D {
            algorithm: Algorithm1D::Bfd,
            kerf: 0,
            min_usable_waste: 0,
        };
        let result = optimize_1d(&pieces, &stock, &opts).unwrap();
        assert_eq!(result.bars[0].stock_id, "small");
    }

    /// S4 — 1D unplaced reporting.
    #[test]
    fn s4_unplaced_reporting() {
        let pieces = vec![piece("p1", 1500, 1)];
        let stock = vec![stock("s1", 1000, 1)];
        let opts = Options1D::default();
        let result = optimize_1d(&pieces, &stock, &opts).unwrap();
        assert!(!result.success);
        assert_eq!(result.unplaced_pieces.len(), 1);
        assert_eq!(result.unplaced_pieces[0].id, "p1");
        assert_eq!(result.unplaced_pieces[0].quantity, 1);
    }

    #[test]
    fn branch_bound_aliases_to_bfd() {
        let pieces = vec![piece("p1", 800, 1)];
        let stock = vec![stock("big", 1000, 1), stock("small", 900, 1)];
        let bfd_opts = Options1D {
            algorithm: Algorithm1D::Bfd,
            kerf: 0,
            min_usable_waste: 0,
        };
        let bb_opts = Options1D {
            algorithm: Algorithm1D::BranchBound,
            ..bfd_opts.clone()
        };
        let bfd = optimize_1d(&pieces, &stock, &bfd_opts).unwrap();
        let bb = optimize_1d(&pieces, &stock, &bb_opts).unwrap();
        assert_eq!(bfd.bars[0].stock_id, bb.bars[0].stock_id);
    }

    #[test]
    fn rejects_zero_length_piece() {
        let pieces = vec![piece("p1", 0, 1)];
        let stock = vec![stock("s1", 1000, 1)];
        assert!(optimize_1d(&pieces, &stock, &Options1D::default()).is_err());
    }

    #[test]
    fn empty_pieces_succeeds_with_zero_stats() {
        let result = optimize_1d(&[], &[stock("s1", 1000, 1)], &Options1D::default()).unwrap();
        assert!(result.success);
        assert_eq!(result.bars.len(), 0);
        assert_eq!(result.statistics.efficiency, 0.0);
    }
}
