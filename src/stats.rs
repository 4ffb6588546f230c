//! Statistics & Result Builder: per-bar/per-sheet waste, aggregate totals
//! and efficiency. Kept separate from the bin/sheet managers so usable
//! off-cut and waste figures always reflect a bar or sheet's *final* state.

use crate::oned::bin::ActiveBar;
use crate::types::{
    BarResult, FreeRect, PieceInput1D, PieceInput2D, Placement, Result1D, Result2D, SheetResult,
    Statistics1D, Statistics2D,
};

/// Build the final 1D result from finished bars and unplaced pieces.
pub fn build_result_1d(
    bars: Vec<ActiveBar>,
    unplaced_pieces: Vec<PieceInput1D>,
    total_pieces_placed: usize,
    kerf: u32,
    min_usable_waste: u32,
) -> Result1D {
    let mut bar_results = Vec::with_capacity(bars.len());
    let mut total_stock_length: u64 = 0;
    let mut total_used_length: u64 = 0;
    let mut total_waste: u64 = 0;

    for bar in &bars {
        let waste = bar.remaining_length as u64;
        let waste_percentage = percentage(waste, bar.stock_length as u64);
        let used: u64 = bar.cuts.iter().map(|c| c.length as u64).sum();
        total_stock_length += bar.stock_length as u64;
        total_used_length += used;
        total_waste += waste;
        bar_results.push(BarResult {
            stock_id: bar.stock_id.clone(),
            stock_length: bar.stock_length,
            cuts: bar.cuts.clone(),
            waste,
            waste_percentage,
            usable_offcut: bar.usable_offcut(kerf, min_usable_waste),
        });
    }

    let total_pieces = total_pieces_placed + unplaced_pieces.iter().map(|p| p.quantity as usize).sum::<usize>();
    let efficiency = percentage(total_used_length, total_stock_length);
    let total_waste_percentage = percentage(total_waste, total_stock_length);

    Result1D {
        success: unplaced_pieces.is_empty(),
        stock_used_count: bar_results.len(),
        bars: bar_results,
        total_waste,
        total_waste_percentage,
        unplaced_pieces,
        statistics: Statistics1D {
            total_pieces,
            total_stock_length,
            total_used_length,
            efficiency,
        },
    }
}

/// One finished 2D sheet: its placements, stock dimensions and remaining
/// free-rectangle set (empty for algorithms that don't track free rects).
pub struct FinishedSheet {
    pub stock_id: String,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
    pub free_rects: Vec<FreeRect>,
}

/// Build the final 2D result from finished sheets and unplaced pieces.
pub fn build_result_2d(
    sheets: Vec<FinishedSheet>,
    unplaced_pieces: Vec<PieceInput2D>,
    total_pieces_placed: usize,
) -> Result2D {
    let mut sheet_results = Vec::with_capacity(sheets.len());
    let mut total_stock_area: u64 = 0;
    let mut total_used_area: u64 = 0;
    let mut total_waste_area: u64 = 0;

    for sheet in sheets {
        let stock_area = sheet.width as u64 * sheet.height as u64;
        let used_area: u64 = sheet.placements.iter().map(|p| p.width as u64 * p.height as u64).sum();
        let waste_area = stock_area.saturating_sub(used_area);
        let waste_percentage = percentage(waste_area, stock_area);
        total_stock_area += stock_area;
        total_used_area += used_area;
        total_waste_area += waste_area;
        sheet_results.push(SheetResult {
            stock_id: sheet.stock_id,
            width: sheet.width,
            height: sheet.height,
            placements: sheet.placements,
            waste_area,
            waste_percentage,
            waste_rects: sheet.free_rects,
        });
    }

    let total_pieces = total_pieces_placed + unplaced_pieces.iter().map(|p| p.quantity as usize).sum::<usize>();
    let efficiency = percentage(total_used_area, total_stock_area);
    let total_waste_percentage = percentage(total_waste_area, total_stock_area);

    Result2D {
        success: unplaced_pieces.is_empty(),
        stock_used_count: sheet_results.len(),
        sheets: sheet_results,
        total_waste_area,
        total_waste_percentage,
        unplaced_pieces,
        statistics: Statistics2D {
            total_pieces,
            total_stock_area,
            total_used_area,
            efficiency,
        },
    }
}

/// `numerator / denominator * 100`, defined as `0` when `denominator == 0`.
fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stock_gives_zero_efficiency_not_nan() {
        let result = build_result_1d(Vec::new(), Vec::new(), 0, 0, 0);
        assert_eq!(result.statistics.efficiency, 0.0);
        assert_eq!(result.total_waste_percentage, 0.0);
        assert!(result.success);
    }

    #[test]
    fn efficiency_and_waste_percentage_sum_to_100() {
        let mut bar = ActiveBar::new("s1".into(), 1000);
        bar.place_piece("p1", "oi1", 600, 0);
        let result = build_result_1d(vec![bar], Vec::new(), 1, 0, 0);
        assert!((result.statistics.efficiency + result.total_waste_percentage - 100.0).abs() < 1e-9);
    }
}
