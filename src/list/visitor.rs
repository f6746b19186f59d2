//! Visitor pattern for customizing generated list rows.
//!
//! A visitor sees every row before it is added to a list and may keep it,
//! replace its text, or drop it.
//!
//! # Example
//!
//! ```
//! use pagetree::list::{ListRow, RowVisitor, VisitorAction};
//!
//! struct ShoutingVisitor;
//!
//! impl RowVisitor for ShoutingVisitor {
//!     fn visit_row(&mut self, row: &ListRow) -> VisitorAction {
//!         VisitorAction::Replace(row.text.to_uppercase())
//!     }
//! }
//! ```

use super::ListRow;

/// What happens to a row after a visitor looked at it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VisitorAction {
    /// Keep the row as generated.
    #[default]
    Continue,

    /// Keep the row with a different text.
    Replace(String),

    /// Drop the row.
    Skip,
}

impl VisitorAction {
    /// Apply the action to `row`. Returns `false` when the row is dropped.
    pub fn apply(self, row: &mut ListRow) -> bool {
        match self {
            VisitorAction::Continue => true,
            VisitorAction::Replace(text) => {
                row.text = text;
                true
            }
            VisitorAction::Skip => false,
        }
    }
}

/// Trait for visiting rows while a list is generated.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait RowVisitor: Send + Sync {
    /// Called for every row that passed the type and depth filters.
    fn visit_row(&mut self, row: &ListRow) -> VisitorAction {
        let _ = row;
        VisitorAction::Continue
    }

    /// Called before the first row.
    fn on_list_start(&mut self, title: &str) {
        let _ = title;
    }

    /// Called after the last row.
    fn on_list_end(&mut self, rows: usize) {
        let _ = rows;
    }
}

/// Default visitor that keeps every row.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl RowVisitor for DefaultVisitor {}

/// Visitor that drops rows of non-enumerated nodes.
#[derive(Debug, Clone, Default)]
pub struct SkipUnnumberedVisitor;

impl RowVisitor for SkipUnnumberedVisitor {
    fn visit_row(&mut self, row: &ListRow) -> VisitorAction {
        if row.numbers.is_empty() {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Visitor that shortens long titles.
#[derive(Debug, Clone)]
pub struct TruncateTitleVisitor {
    max_chars: usize,
}

impl TruncateTitleVisitor {
    /// Create a visitor that keeps at most `max_chars` characters of a title.
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }
}

impl RowVisitor for TruncateTitleVisitor {
    fn visit_row(&mut self, row: &ListRow) -> VisitorAction {
        if row.text.chars().count() <= self.max_chars {
            return VisitorAction::Continue;
        }
        let short: String = row.text.chars().take(self.max_chars - 1).collect();
        VisitorAction::Replace(format!("{}…", short.trim_end()))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn RowVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: RowVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl RowVisitor for CompositeVisitor {
    fn visit_row(&mut self, row: &ListRow) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_row(row);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn on_list_start(&mut self, title: &str) {
        for visitor in &mut self.visitors {
            visitor.on_list_start(title);
        }
    }

    fn on_list_end(&mut self, rows: usize) {
        for visitor in &mut self.visitors {
            visitor.on_list_end(rows);
        }
    }
}
