//! View model for displaying records.
//!
//! Pure transformations from the record list to what a front end draws:
//! one row per record carrying the index that edit and delete actions
//! report back, an empty-state flag, and a fixed-height scrolling viewport.

use std::ops::Range;

use serde::Serialize;

use crate::record::Record;

/// Default viewport height before scrolling kicks in.
pub const DEFAULT_SCROLL_MAX_HEIGHT: u32 = 400;

/// Default height of one rendered row.
pub const DEFAULT_ROW_HEIGHT: u32 = 40;

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    /// Position in the record list; what edit and delete act on.
    pub index: usize,
    /// Student name.
    pub name: String,
    /// Student ID.
    pub student_id: String,
    /// Class.
    #[serde(rename = "class")]
    pub class_name: String,
    /// Roll number.
    pub roll_no: String,
}

/// All rows of the record table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableView {
    rows: Vec<RecordRow>,
}

impl TableView {
    /// Build the table from a record list, preserving order.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let rows = records
            .iter()
            .enumerate()
            .map(|(index, r)| RecordRow {
                index,
                name: r.name.clone(),
                student_id: r.student_id.clone(),
                class_name: r.class_name.clone(),
                roll_no: r.roll_no.clone(),
            })
            .collect();
        Self { rows }
    }

    /// The rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether to show the "no records" indicator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A fixed-height window onto the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Height beyond which content scrolls.
    pub max_height: u32,
    /// Height of one row.
    pub row_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_SCROLL_MAX_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub fn new(max_height: u32, row_height: u32) -> Self {
        Self {
            max_height,
            row_height,
        }
    }

    /// Total height of `rows` rendered rows.
    #[must_use]
    pub fn content_height(&self, rows: usize) -> u64 {
        u64::try_from(rows)
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::from(self.row_height))
    }

    /// Whether content of this height needs a scrollbar.
    #[must_use]
    pub fn is_scrolling(&self, content_height: u64) -> bool {
        content_height > u64::from(self.max_height)
    }

    /// How many whole rows fit without scrolling. At least one.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        let rows = self.max_height.checked_div(self.row_height).unwrap_or(0);
        usize::try_from(rows).unwrap_or(usize::MAX).max(1)
    }

    /// Rows shown when scrolled `offset` rows down a table of `total`.
    ///
    /// The offset is clamped so the window never runs past the end.
    #[must_use]
    pub fn window(&self, total: usize, offset: usize) -> Range<usize> {
        if !self.is_scrolling(self.content_height(total)) {
            return 0..total;
        }
        let visible = self.visible_rows().min(total);
        let start = offset.min(total - visible);
        start..start + visible
    }
}
