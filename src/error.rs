//! Error and warning types for pagetree.

use crate::model::{ContentType, NodeId};
use thiserror::Error;

/// Result type alias for pagetree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures. These abort the operation that raised them.
#[derive(Error, Debug)]
pub enum Error {
    /// The parent's allowed-child-types forbid the child.
    #[error("{parent} does not accept {child} content")]
    ChildTypeNotAllowed {
        /// Type of the parent node
        parent: ContentType,
        /// Type of the rejected child
        child: ContentType,
    },

    /// The document root can never become a child.
    #[error("The document root can't be attached to a parent")]
    RootReparent,

    /// Nodes are attached exactly once.
    #[error("Node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    /// Children can only be attached below nodes that are part of the tree.
    #[error("Node {0} is not attached to the document")]
    DetachedParent(NodeId),

    /// Pages are only assigned to nodes that are part of the tree.
    #[error("Node {0} must be attached before its page is resolved")]
    DetachedNode(NodeId),

    /// Configuration is frozen once a node has a parent.
    #[error("The configuration of node {0} can't be changed after setting the parent")]
    ConfigurationFrozen(NodeId),

    /// The tree is only mutable during construction.
    #[error("The document tree is sealed; layout has already started")]
    TreeSealed,

    /// Labels are unique within a document.
    #[error("Label \"{0}\" is already in use")]
    DuplicateLabel(String),

    /// A page was resolved a second time.
    #[error("Page of node {node} is already resolved to {existing}; refusing {attempted}")]
    PageAlreadyResolved {
        /// Node whose page was resolved twice
        node: NodeId,
        /// The page it already carries
        existing: i64,
        /// The rejected value
        attempted: i64,
    },

    /// Final list content was requested before every page was known.
    #[error("{0} node(s) still have unresolved pages")]
    UnresolvedPages(usize),

    /// Unknown node id.
    #[error("Node {0} does not exist in this document")]
    NodeNotFound(NodeId),

    /// Settings could not be deserialized.
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// Image size specification could not be parsed.
    #[error("Invalid image size specification: {0}")]
    InvalidImageSize(String),

    /// The layout collaborator failed.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Non-fatal conditions. Processing continues with a best-effort result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    /// Numbering level below -1; unlimited depth is used instead.
    #[error("Invalid numbering level {level} for {content_type}, defaulting to -1")]
    InvalidNumberingLevel {
        /// Type the rule applies to
        content_type: ContentType,
        /// The rejected level
        level: i32,
    },

    /// Numbering start index outside the 32-bit range; clamped into it.
    #[error("Start index {start_index} for {content_type} out of range, clamped to {clamped}")]
    InvalidStartIndex {
        /// Type the rule applies to
        content_type: ContentType,
        /// The rejected start index
        start_index: i64,
        /// Value used instead
        clamped: i64,
    },

    /// List max depth below -1; unlimited depth is used instead.
    #[error("Invalid max depth {0}, defaulting to -1")]
    InvalidMaxDepth(i32),

    /// Formula font not in the available set.
    #[error("Font {0} not available, defaulting to TeX")]
    UnknownFormulaFont(String),

    /// Number format name not recognized; raw integers are printed.
    #[error("Unknown number format \"{0}\", printing raw values")]
    UnknownNumberFormat(String),

    /// Not enough room left for the title column of a list row.
    #[error(
        "The remaining space for the title-display of {available} at depth {depth} \
         is lower than the set minimum of {minimum}"
    )]
    NarrowTitleColumn {
        /// Iterator depth of the row
        depth: usize,
        /// Width left for the title
        available: f32,
        /// Configured minimum width
        minimum: f32,
    },

    /// A reference pointed at a label nobody registered.
    #[error("Label \"{0}\" for reference not found")]
    MissingLabel(String),
}

/// Collected warnings of an operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a warning and keep it.
    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// All warnings in the order they were raised.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Move all warnings of `other` into this collection without logging again.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RootReparent;
        assert_eq!(
            err.to_string(),
            "The document root can't be attached to a parent"
        );

        let err = Error::ChildTypeNotAllowed {
            parent: ContentType::Text,
            child: ContentType::Section,
        };
        assert_eq!(err.to_string(), "text does not accept section content");
    }

    #[test]
    fn test_settings_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn test_diagnostics_collect() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.warn(Warning::MissingLabel("fig:x".into()));
        diagnostics.warn(Warning::InvalidMaxDepth(-4));

        assert_eq!(diagnostics.warnings().len(), 2);
        assert_eq!(
            diagnostics.warnings()[0].to_string(),
            "Label \"fig:x\" for reference not found"
        );
    }
}
