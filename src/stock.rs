//! Stock Manager: tracks per-stock-id remaining counts and selects the next
//! stock unit under an ordering policy.

use crate::types::{StockInput1D, StockInput2D};

/// One entry of 1D stock with a live remaining-count.
#[derive(Clone, Debug)]
struct Entry1D {
    id: String,
    length: u32,
    remaining: u32,
}

/// Ordering policy the manager sorts its entries under at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ordering {
    /// Prefer larger stock first (FFD).
    Desc,
    /// Prefer the smallest stock that still fits (BFD).
    Asc,
}

/// Tracks remaining 1D stock units and hands them out under an ordering
/// policy. Lives only for the duration of one [`crate::optimize_1d`] call.
#[derive(Clone, Debug)]
pub struct StockManager1D {
    entries: Vec<Entry1D>,
}

impl StockManager1D {
    /// Build a manager from the caller's stock list, filtering
    /// `available = 0` entries and sorting once under `ordering`.
    pub fn new(stock: &[StockInput1D], ordering: Ordering) -> Self {
        let mut entries: Vec<Entry1D> = stock
            .iter()
            .filter(|s| s.available > 0)
            .map(|s| Entry1D {
                id: s.id.clone(),
                length: s.length,
                remaining: s.available,
            })
            .collect();
        match ordering {
            Ordering::Desc => entries.sort_by(|a, b| b.length.cmp(&a.length)),
            Ordering::Asc => entries.sort_by(|a, b| a.length.cmp(&b.length)),
        }
        Self { entries }
    }

    /// First entry (in sorted order) with `remaining > 0` whose length can
    /// contain `required`.
    pub fn find_available_stock(&self, required: u32) -> Option<(String, u32)> {
        self.entries
            .iter()
            .find(|e| e.remaining > 0 && e.length >= required)
            .map(|e| (e.id.clone(), e.length))
    }

    /// Decrement the `remaining` counter for `stock_id`. Panics if the
    /// counter is already zero: callers must obtain the id from
    /// [`Self::find_available_stock`] first.
    pub fn consume(&mut self, stock_id: &str) {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == stock_id)
            .expect("consume called with an id not tracked by this manager");
        assert!(entry.remaining > 0, "stock {stock_id} already exhausted");
        entry.remaining -= 1;
    }
}

/// One entry of 2D stock with a live remaining-count.
#[derive(Clone, Debug)]
struct Entry2D {
    id: String,
    width: u32,
    height: u32,
    remaining: u32,
}

/// Tracks remaining 2D stock units. Stocks are orientable: a candidate
/// required size may match either `(width, height)` or `(height, width)`.
#[derive(Clone, Debug)]
pub struct StockManager2D {
    entries: Vec<Entry2D>,
}

impl StockManager2D {
    /// Build a manager from the caller's stock list, filtering
    /// `available = 0` entries and sorting once by area descending.
    pub fn new(stock: &[StockInput2D]) -> Self {
        let mut entries: Vec<Entry2D> = stock
            .iter()
            .filter(|s| s.available > 0)
            .map(|s| Entry2D {
                id: s.id.clone(),
                width: s.width,
                height: s.height,
                remaining: s.available,
            })
            .collect();
        entries.sort_by(|a, b| {
            let area_a = a.width as u64 * a.height as u64;
            let area_b = b.width as u64 * b.height as u64;
            area_b.cmp(&area_a)
        });
        Self { entries }
    }

    /// First entry (in sorted order) with `remaining > 0` that can contain
    /// `(required_w, required_h)` in either orientation.
    pub fn find_available_stock(&self, required_w: u32, required_h: u32) -> Option<(String, u32, u32)> {
        self.entries
            .iter()
            .find(|e| {
                e.remaining > 0
                    && ((e.width >= required_w && e.height >= required_h)
                        || (e.width >= required_h && e.height >= required_w))
            })
            .map(|e| (e.id.clone(), e.width, e.height))
    }

    /// Decrement the `remaining` counter for `stock_id`. Panics if the
    /// counter is already zero: callers must obtain the id from
    /// [`Self::find_available_stock`] first.
    pub fn consume(&mut self, stock_id: &str) {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == stock_id)
            .expect("consume called with an id not tracked by this manager");
        assert!(entry.remaining > 0, "stock {stock_id} already exhausted");
        entry.remaining -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s1d(id: &str, length: u32, available: u32) -> StockInput1D {
        StockInput1D {
            id: id.to_string(),
            length,
            available,
            unit_price: None,
        }
    }

    #[test]
    fn desc_ordering_prefers_larger_stock() {
        let stock = vec![s1d("small", 900, 1), s1d("big", 1000, 1)];
        let mgr = StockManager1D::new(&stock, Ordering::Desc);
        let (id, _) = mgr.find_available_stock(800).unwrap();
        assert_eq!(id, "big");
    }

    #[test]
    fn asc_ordering_prefers_tightest_fit() {
        let stock = vec![s1d("big", 1000, 1), s1d("small", 900, 1)];
        let mgr = StockManager1D::new(&stock, Ordering::Asc);
        let (id, _) = mgr.find_available_stock(800).unwrap();
        assert_eq!(id, "small");
    }

    #[test]
    fn zero_available_is_filtered() {
        let stock = vec![s1d("s1", 1000, 0)];
        let mgr = StockManager1D::new(&stock, Ordering::Desc);
        assert!(mgr.find_available_stock(10).is_none());
    }

    #[test]
    fn consume_decrements_remaining() {
        let stock = vec![s1d("s1", 1000, 1)];
        let mut mgr = StockManager1D::new(&stock, Ordering::Desc);
        mgr.consume("s1");
        assert!(mgr.find_available_stock(10).is_none());
    }
}
