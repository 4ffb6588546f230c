//! Shared data model: pieces, stock, placed geometry and results.
//!
//! Dimensions are plain integers (millimetres in the source domain, but the
//! engine never interprets units). Kept integral throughout placement so
//! that the determinism requirement (bit-identical output for identical
//! input) never depends on floating point rounding; percentages are only
//! computed at result-building time.

use serde::{Deserialize, Serialize};

/// A required 1D piece, as supplied by the caller, possibly with `quantity > 1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceInput1D {
    /// Caller-chosen group id.
    pub id: String,
    /// Length of the piece. Must be `> 0`.
    pub length: u32,
    /// Number of pieces needed with this length. Must be `>= 1`.
    pub quantity: u32,
    /// Opaque back-reference stored on every cut produced from this group.
    pub order_item_id: String,
}

/// Linear grain / pattern direction constraint for a 2D piece.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GrainDirection {
    /// No constraint.
    #[default]
    None,
    /// Longer side of the piece must run along X.
    Horizontal,
    /// Longer side of the piece must run along Y.
    Vertical,
}

/// A required 2D (rectangular) piece, as supplied by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceInput2D {
    /// Caller-chosen group id.
    pub id: String,
    /// Width of the piece. Must be `> 0`.
    pub width: u32,
    /// Height of the piece. Must be `> 0`.
    pub height: u32,
    /// Number of pieces needed with these dimensions. Must be `>= 1`.
    pub quantity: u32,
    /// Opaque back-reference stored on every placement produced from this group.
    pub order_item_id: String,
    /// Whether the optimizer may place this piece rotated 90 degrees.
    pub can_rotate: bool,
    /// Grain direction constraint, if any.
    #[serde(default)]
    pub grain_direction: GrainDirection,
}

/// A single unrolled unit of a [`PieceInput1D`] of quantity `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedPiece1D {
    /// Unique id within this invocation: `"<original_id>_<i>"`.
    pub id: String,
    /// The id of the [`PieceInput1D`] this unit was expanded from.
    pub original_id: String,
    /// Order-item back-reference, copied from the input group.
    pub order_item_id: String,
    /// Length of this unit.
    pub length: u32,
}

/// A single unrolled unit of a [`PieceInput2D`] of quantity `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedPiece2D {
    /// Unique id within this invocation: `"<original_id>_<i>"`.
    pub id: String,
    /// The id of the [`PieceInput2D`] this unit was expanded from.
    pub original_id: String,
    /// Order-item back-reference, copied from the input group.
    pub order_item_id: String,
    /// Width of this unit (unrotated).
    pub width: u32,
    /// Height of this unit (unrotated).
    pub height: u32,
    /// Whether this unit may be placed rotated.
    pub can_rotate: bool,
    /// Grain direction constraint, copied from the input group.
    pub grain_direction: GrainDirection,
}

impl ExpandedPiece2D {
    /// Area of the unrotated piece.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// `min(width, height)`.
    pub fn short_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// `max(width, height)`.
    pub fn long_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// `2 * (width + height)`.
    pub fn perimeter(&self) -> u64 {
        2 * (self.width as u64 + self.height as u64)
    }

    /// `|width - height|`.
    pub fn side_difference(&self) -> u32 {
        self.width.abs_diff(self.height)
    }
}

/// A stock unit available for 1D cutting.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInput1D {
    /// Caller-chosen stock id.
    pub id: String,
    /// Length of one stock unit. Must be `> 0`.
    pub length: u32,
    /// Number of interchangeable stock units with this length.
    pub available: u32,
    /// Optional price per unit; unused by any operation (see DESIGN.md).
    #[serde(default)]
    pub unit_price: Option<u64>,
}

/// A stock unit available for 2D cutting.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInput2D {
    /// Caller-chosen stock id.
    pub id: String,
    /// Width of one stock unit. Must be `> 0`.
    pub width: u32,
    /// Height of one stock unit. Must be `> 0`.
    pub height: u32,
    /// Number of interchangeable stock units with these dimensions.
    pub available: u32,
    /// Optional price per unit; unused by any operation (see DESIGN.md).
    #[serde(default)]
    pub unit_price: Option<u64>,
}

/// A single cut placed on a 1D bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cut {
    /// Id of the expanded piece this cut came from.
    pub piece_id: String,
    /// Order-item back-reference.
    pub order_item_id: String,
    /// Starting position of this cut on the bar.
    pub position: u32,
    /// Length of this cut.
    pub length: u32,
}

/// A usable off-cut left over on a bar after the last cut.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsableOffcut {
    /// Starting position of the off-cut.
    pub position: u32,
    /// Length of the off-cut.
    pub length: u32,
}

/// A single rectangular piece placed on a 2D sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Id of the expanded piece this placement came from.
    pub piece_id: String,
    /// Order-item back-reference.
    pub order_item_id: String,
    /// X location of the placed piece's left edge.
    pub x: u32,
    /// Y location of the placed piece's bottom edge.
    pub y: u32,
    /// Placed width (after rotation, if any).
    pub width: u32,
    /// Placed height (after rotation, if any).
    pub height: u32,
    /// Whether this piece was rotated 90 degrees from its input orientation.
    pub rotated: bool,
}

impl Placement {
    /// The kerf-expanded bounding rectangle used for overlap tests.
    pub fn expanded(&self, kerf: u32) -> ExpandedRect {
        ExpandedRect {
            x: self.x.saturating_sub(kerf),
            y: self.y.saturating_sub(kerf),
            right: self.x + self.width + kerf,
            top: self.y + self.height + kerf,
        }
    }
}

/// A kerf-expanded axis-aligned rectangle, used only for overlap tests.
#[derive(Copy, Clone, Debug)]
pub struct ExpandedRect {
    pub x: u32,
    pub y: u32,
    pub right: u32,
    pub top: u32,
}

impl ExpandedRect {
    /// Strict overlap test: touching edges do not count as overlapping.
    pub fn overlaps(&self, other: &ExpandedRect) -> bool {
        self.x < other.right && other.x < self.right && self.y < other.top && other.y < self.top
    }
}

/// An empty axis-aligned rectangle within a sheet, available for future placements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FreeRect {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether `self` fully contains `other`.
    pub fn contains(&self, other: &FreeRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

/// The result of one 1D bar being filled.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarResult {
    /// Id of the stock this bar was cut from.
    pub stock_id: String,
    /// Length of the stock unit used for this bar.
    pub stock_length: u32,
    /// Cuts placed on this bar, in placement order.
    pub cuts: Vec<Cut>,
    /// `remaining_length` at the end of placement for this bar.
    pub waste: u64,
    /// `waste / stock_length * 100`.
    pub waste_percentage: f64,
    /// Usable off-cut, if the remainder (after one more kerf) meets the threshold.
    pub usable_offcut: Option<UsableOffcut>,
}

/// Aggregate statistics for a 1D optimization.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics1D {
    pub total_pieces: usize,
    pub total_stock_length: u64,
    pub total_used_length: u64,
    pub efficiency: f64,
}

/// Full result of a 1D optimization call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Result1D {
    /// `true` iff `unplaced_pieces` is empty.
    pub success: bool,
    pub bars: Vec<BarResult>,
    pub total_waste: u64,
    pub total_waste_percentage: f64,
    pub stock_used_count: usize,
    pub unplaced_pieces: Vec<PieceInput1D>,
    pub statistics: Statistics1D,
}

/// The result of one 2D sheet being filled.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResult {
    /// Id of the stock this sheet was cut from.
    pub stock_id: String,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
    /// `stock_area - used_area` at the end of placement for this sheet.
    pub waste_area: u64,
    /// `waste_area / stock_area * 100`.
    pub waste_percentage: f64,
    /// Remaining free rectangles, for algorithms that track them
    /// (Guillotine, MAXRECTS). Empty for Bottom-Left.
    pub waste_rects: Vec<FreeRect>,
}

/// Aggregate statistics for a 2D optimization.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics2D {
    pub total_pieces: usize,
    pub total_stock_area: u64,
    pub total_used_area: u64,
    pub efficiency: f64,
}

/// Full result of a 2D optimization call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Result2D {
    /// `true` iff `unplaced_pieces` is empty.
    pub success: bool,
    pub sheets: Vec<SheetResult>,
    pub total_waste_area: u64,
    pub total_waste_percentage: f64,
    pub stock_used_count: usize,
    pub unplaced_pieces: Vec<PieceInput2D>,
    pub statistics: Statistics2D,
}

/// Algorithm selector for [`crate::optimize_1d`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm1D {
    /// First Fit Decreasing.
    Ffd,
    /// Best Fit Decreasing.
    Bfd,
    /// Alias for `Bfd` until a true branch-and-bound ships.
    BranchBound,
}

impl std::str::FromStr for Algorithm1D {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FFD" => Ok(Algorithm1D::Ffd),
            "BFD" => Ok(Algorithm1D::Bfd),
            "BRANCH_BOUND" => Ok(Algorithm1D::BranchBound),
            other => Err(crate::error::EngineError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Algorithm selector for [`crate::optimize_2d`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm2D {
    BottomLeft,
    Guillotine,
    MaxRects,
    MaxRectsBest,
}

impl std::str::FromStr for Algorithm2D {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOTTOM_LEFT" => Ok(Algorithm2D::BottomLeft),
            "GUILLOTINE" => Ok(Algorithm2D::Guillotine),
            "MAXRECTS" => Ok(Algorithm2D::MaxRects),
            "MAXRECTS_BEST" => Ok(Algorithm2D::MaxRectsBest),
            other => Err(crate::error::EngineError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Scoring heuristic consulted by the MAXRECTS family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Heuristic {
    /// Best Short Side Fit.
    Bssf,
    /// Best Long Side Fit.
    Blsf,
    /// Best Area Fit.
    Baf,
    /// Bottom-Left.
    Bl,
    /// Contact Point.
    Cp,
    /// Run all heuristics, keep the globally lowest-scoring placement.
    Best,
}

impl std::str::FromStr for Heuristic {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BSSF" => Ok(Heuristic::Bssf),
            "BLSF" => Ok(Heuristic::Blsf),
            "BAF" => Ok(Heuristic::Baf),
            "BL" => Ok(Heuristic::Bl),
            "CP" => Ok(Heuristic::Cp),
            "BEST" => Ok(Heuristic::Best),
            other => Err(crate::error::EngineError::UnknownHeuristic(other.to_string())),
        }
    }
}

/// Piece sort strategy, consulted by the MAXRECTS orchestrator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortStrategy {
    AreaDesc,
    ShortSide,
    LongSide,
    Perimeter,
    Difference,
}

impl std::str::FromStr for SortStrategy {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AREA_DESC" => Ok(SortStrategy::AreaDesc),
            "SHORT_SIDE" => Ok(SortStrategy::ShortSide),
            "LONG_SIDE" => Ok(SortStrategy::LongSide),
            "PERIMETER" => Ok(SortStrategy::Perimeter),
            "DIFFERENCE" => Ok(SortStrategy::Difference),
            other => Err(crate::error::EngineError::UnknownSortStrategy(other.to_string())),
        }
    }
}

impl Default for SortStrategy {
    fn default() -> Self {
        SortStrategy::AreaDesc
    }
}

/// Options controlling [`crate::optimize_1d`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options1D {
    pub algorithm: Algorithm1D,
    pub kerf: u32,
    pub min_usable_waste: u32,
}

impl Default for Options1D {
    fn default() -> Self {
        Self {
            algorithm: Algorithm1D::Ffd,
            kerf: 0,
            min_usable_waste: 0,
        }
    }
}

/// Options controlling [`crate::optimize_2d`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options2D {
    pub algorithm: Algorithm2D,
    pub kerf: u32,
    pub allow_rotation: bool,
    #[serde(default)]
    pub respect_grain_direction: bool,
    #[serde(default)]
    pub heuristic: Option<Heuristic>,
    #[serde(default)]
    pub multi_pass: bool,
    #[serde(default)]
    pub sort_strategy: SortStrategy,
    /// Minimum edge length kept when splitting MAXRECTS free rects; slivers
    /// at or below this are discarded. Defaults to `max(kerf, 1)` when unset
    /// (spec.md §9 "Open question — sliver threshold"; see DESIGN.md).
    #[serde(default)]
    pub sliver_threshold: Option<u32>,
}

impl Default for Options2D {
    fn default() -> Self {
        Self {
            algorithm: Algorithm2D::BottomLeft,
            kerf: 0,
            allow_rotation: true,
            respect_grain_direction: false,
            heuristic: None,
            multi_pass: false,
            sort_strategy: SortStrategy::default(),
            sliver_threshold: None,
        }
    }
}

impl Options2D {
    /// Effective sliver threshold: `max(kerf, 1)` unless overridden.
    pub fn effective_sliver_threshold(&self) -> u32 {
        self.sliver_threshold.unwrap_or_else(|| self.kerf.max(1))
    }

    /// Effective heuristic: `BEST` when the algorithm is `MAXRECTS_BEST`,
    /// otherwise the configured heuristic, defaulting to `BSSF`.
    pub fn effective_heuristic(&self) -> Heuristic {
        if self.algorithm == Algorithm2D::MaxRectsBest {
            Heuristic::Best
        } else {
            self.heuristic.unwrap_or(Heuristic::Bssf)
        }
    }
}
