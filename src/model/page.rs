//! Deferred page references.
//!
//! A node's page moves through `Unassigned → Placeholder → Resolved`. The
//! placeholder reserves horizontal space before layout; the resolved value
//! is written exactly once by the layout pass.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

use super::NodeId;

/// Page group used when neither a node nor its ancestors name one.
pub const DEFAULT_PAGE_GROUP: &str = "default";

/// Final page position of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPage {
    /// Page number within its group
    pub number: i64,

    /// Page group the number belongs to
    pub group: String,
}

impl ResolvedPage {
    /// Create a resolved page.
    pub fn new(number: i64, group: impl Into<String>) -> Self {
        Self {
            number,
            group: group.into(),
        }
    }
}

/// Page reference state of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageRef {
    /// Never queried
    #[default]
    Unassigned,

    /// Queried before layout; fixed-width stand-in
    Placeholder {
        /// Marker text
        marker: String,
    },

    /// Page known after layout
    Resolved(ResolvedPage),
}

impl PageRef {
    /// Build the stand-in text for an unresolved page.
    pub fn placeholder_text(marker: char, width: usize) -> String {
        std::iter::repeat(marker).take(width).collect()
    }

    /// Check if the page is final.
    pub fn is_resolved(&self) -> bool {
        matches!(self, PageRef::Resolved(_))
    }

    /// The final page, if known.
    pub fn resolved(&self) -> Option<&ResolvedPage> {
        match self {
            PageRef::Resolved(page) => Some(page),
            _ => None,
        }
    }

    /// Move `Unassigned` to `Placeholder`. Other states are kept.
    pub(crate) fn reserve(&mut self, marker: char, width: usize) -> &PageRef {
        if matches!(self, PageRef::Unassigned) {
            *self = PageRef::Placeholder {
                marker: Self::placeholder_text(marker, width),
            };
        }
        self
    }

    /// Write the final page. A second resolution is a pass-ordering bug.
    pub(crate) fn resolve(&mut self, node: NodeId, page: ResolvedPage) -> Result<()> {
        if let PageRef::Resolved(existing) = self {
            return Err(Error::PageAlreadyResolved {
                node,
                existing: existing.number,
                attempted: page.number,
            });
        }
        *self = PageRef::Resolved(page);
        Ok(())
    }
}
