//! Indentation sizing for generated lists.
//!
//! Numbers of depth `d` start where the text of depth `d - 1` starts, and
//! the text of depth `d` starts after the widest number of that depth plus
//! the number gap. Depths with no rows take no space.

use crate::error::Warning;
use serde::{Deserialize, Serialize};

/// Horizontal offsets of one depth, relative to the list's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Indent {
    /// Where the number starts
    pub number: f32,

    /// Where the text starts
    pub text: f32,
}

/// Offsets for every depth of a list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndentTable {
    levels: Vec<Indent>,
    max_level: Option<usize>,
    default_text_indent: f32,
}

impl IndentTable {
    /// Compute offsets from `(iterator depth, number width)` pairs.
    ///
    /// Depths beyond `max_level` share the offsets of `max_level`.
    pub fn compute(
        widths: impl IntoIterator<Item = (usize, f32)>,
        gap: f32,
        max_level: Option<usize>,
        default_text_indent: f32,
    ) -> Self {
        let mut widest: Vec<Option<f32>> = Vec::new();
        for (depth, width) in widths {
            let depth = max_level.map_or(depth, |max| depth.min(max));
            if widest.len() <= depth {
                widest.resize(depth + 1, None);
            }
            let entry = &mut widest[depth];
            *entry = Some(entry.map_or(width, |w: f32| w.max(width)));
        }

        let mut levels = Vec::with_capacity(widest.len());
        let mut offset = 0.0;
        for width in &widest {
            let text = match width {
                Some(w) => offset + w + gap,
                None => offset,
            };
            levels.push(Indent {
                number: offset,
                text,
            });
            offset = text;
        }

        Self {
            levels,
            max_level,
            default_text_indent,
        }
    }

    /// Offsets for a row at `depth`.
    ///
    /// Rows outside the computed range get the default text indent.
    pub fn get(&self, depth: usize) -> Indent {
        let depth = self.max_level.map_or(depth, |max| depth.min(max));
        self.levels.get(depth).copied().unwrap_or(Indent {
            number: 0.0,
            text: self.default_text_indent,
        })
    }

    /// Number of computed depths.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if no depth was computed.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Computed offsets, shallowest first.
    pub fn levels(&self) -> &[Indent] {
        &self.levels
    }
}

/// Space left for titles in a list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleColumn {
    /// Full width of the list
    pub list_width: f32,

    /// Width reserved for page numbers (0 when pages are hidden)
    pub page_column: f32,

    /// Minimum share of the list width in percent
    pub min_percentage: f32,
}

impl TitleColumn {
    /// Minimum title width in user units.
    pub fn minimum(&self) -> f32 {
        self.min_percentage / 100.0 * self.list_width
    }

    /// Width left for a title starting at `text_offset`.
    pub fn available(&self, text_offset: f32) -> f32 {
        self.list_width - self.page_column - text_offset
    }
}

/// Report every depth whose title column is narrower than the minimum.
pub fn check_title_widths(
    table: &IndentTable,
    depths: impl IntoIterator<Item = usize>,
    column: &TitleColumn,
) -> Vec<Warning> {
    let mut depths: Vec<usize> = depths.into_iter().collect();
    depths.sort_unstable();
    depths.dedup();

    let minimum = column.minimum();
    depths
        .into_iter()
        .filter_map(|depth| {
            let available = column.available(table.get(depth).text);
            (available < minimum).then_some(Warning::NarrowTitleColumn {
                depth,
                available,
                minimum,
            })
        })
        .collect()
}
