//! Sprite-sheet addressing.
//!
//! Product images live in one sheet partitioned into a `rows × cols` grid.
//! A product references its cell by flat index; the view crops the cell with
//! a percentage-based `background-position`.

use serde::{Deserialize, Serialize};

/// Grid geometry of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteGrid {
    pub cols: u32,
    pub rows: u32,
}

/// A cell position within the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteCell {
    pub row: u32,
    pub col: u32,
}

/// Percentage crop offsets for a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteOffset {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl SpriteGrid {
    /// The master sheet: 10 columns by 9 rows.
    pub const MASTER: Self = Self::new(10, 9);

    #[must_use]
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Number of addressable cells.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.cols * self.rows
    }

    /// Row/column of `index`, or `None` when it falls outside the grid.
    #[must_use]
    pub const fn cell(&self, index: u32) -> Option<SpriteCell> {
        if self.cols == 0 || index >= self.capacity() {
            return None;
        }
        Some(SpriteCell {
            row: index / self.cols,
            col: index % self.cols,
        })
    }

    /// Background offset for `index`.
    ///
    /// `index` must be inside the grid; the catalog factory guarantees this
    /// for every product it builds.
    #[must_use]
    pub fn offset(&self, index: u32) -> SpriteOffset {
        debug_assert!(index < self.capacity(), "sprite index {index} outside grid");
        let cols = self.cols.max(1);
        SpriteOffset {
            x_percent: axis_percent(index % cols, self.cols),
            y_percent: axis_percent(index / cols, self.rows),
        }
    }

    /// CSS `background-size` that scales one cell to the element box.
    #[must_use]
    pub fn background_size(&self) -> String {
        format!("{}% {}%", self.cols * 100, self.rows * 100)
    }
}

impl SpriteOffset {
    /// CSS `background-position` value.
    #[must_use]
    pub fn css_position(&self) -> String {
        format!("{:.4}% {:.4}%", self.x_percent, self.y_percent)
    }
}

/// `position / (cells - 1) * 100`, or 0 for a single-cell axis.
fn axis_percent(position: u32, cells: u32) -> f64 {
    if cells > 1 {
        f64::from(position) * 100.0 / f64::from(cells - 1)
    } else {
        0.0
    }
}
