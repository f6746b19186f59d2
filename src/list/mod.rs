//! Generated lists: tables of contents, lists of figures, and the like.
//!
//! Rows are produced by a filtered pre-order traversal. Final output is
//! only available after the layout pass resolved every page; before that,
//! [`ListBuilder::preview`] renders placeholders so a layout engine can size
//! the list.

mod builder;
mod indent;
pub mod visitor;

pub use builder::{generate_list, preview_list, LinkTarget, ListBuilder, ListOutput, ListRow};
pub use indent::{check_title_widths, Indent, IndentTable, TitleColumn};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, RowVisitor, SkipUnnumberedVisitor, TruncateTitleVisitor,
    VisitorAction,
};
