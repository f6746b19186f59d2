//! # pagetree
//!
//! Document content trees with hierarchical numbering, generated lists and
//! deferred page references.
//!
//! Content is built as a tree of sections, text, images, formulas and
//! generated lists. Every enumerable node gets a hierarchical number such as
//! `2.1.3`; generated lists (tables of contents, lists of figures) are built
//! from a filtered traversal of the tree. Page numbers are not known until a
//! layout engine has placed the content, so they start as fixed-width
//! placeholders and are resolved once by a layout pass.
//!
//! ## Quick Start
//!
//! ```
//! use pagetree::layout::{run_layout_pass, SequentialLayout};
//! use pagetree::list::ListBuilder;
//! use pagetree::render::{to_text, RenderOptions};
//! use pagetree::Document;
//!
//! fn main() -> pagetree::Result<()> {
//!     let mut doc = Document::new();
//!     let root = doc.root();
//!     let intro = doc.add_section(root, "Intro")?;
//!     doc.add_section(intro, "Background")?;
//!
//!     // Assign pages, then build the final table of contents
//!     run_layout_pass(&mut doc, &mut SequentialLayout::new(1))?;
//!     let toc = ListBuilder::new(&doc).materialize()?;
//!     println!("{}", to_text(&toc, &RenderOptions::default())?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Numbering**: per-type format, depth, prefix, postfix, separator and start index
//! - **Traversal**: lazy pre/post-order walks with depth limits and index filters
//! - **Generated lists**: rows with outline-style indentation sizing
//! - **Two-pass pages**: placeholders before layout, per-group page styles after
//! - **Labels**: unique reference targets with graceful missing-label handling

pub mod error;
pub mod layout;
pub mod list;
pub mod model;
pub mod number;
pub mod numbering;
pub mod render;
pub mod traverse;

// Re-export commonly used types
pub use error::{Diagnostics, Error, Result, Warning};
pub use layout::{run_layout_pass, LayoutReport, Measure, PageLayout, StyleContext};
pub use list::{generate_list, preview_list, ListBuilder, ListOutput, ListRow};
pub use model::{
    AllowedChildren, Content, ContentType, Document, DocumentSettings, LabelLookup, ListSpec,
    Metadata, Node, NodeConfig, NodeId, NodeRef, PageRef, Phase, ReferenceKind, ResolvedPage,
    Styleable,
};
pub use number::{format_number, Number, NumberFormat};
pub use numbering::{Numberable, NumberingOverride, NumberingRule, NumberingSettings};
pub use render::{JsonFormat, RenderOptions};
pub use traverse::{Traversal, TraversalOrder, Visit};

/// Build a document from JSON settings.
///
/// # Example
///
/// ```
/// let doc = pagetree::document_from_json(r##"{"unresolved_reference_marker": "#"}"##).unwrap();
/// assert_eq!(doc.placeholder(), "###");
/// ```
pub fn document_from_json(settings: &str) -> Result<Document> {
    Ok(Document::with_settings(DocumentSettings::from_json(settings)?))
}
