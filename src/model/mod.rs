//! Document model types for the content tree.
//!
//! The [`Document`] owns every node in an arena indexed by [`NodeId`].
//! Nodes are created detached, configured, then attached exactly once;
//! attaching freezes their configuration. Page positions are tracked per
//! node as a [`PageRef`] state machine that the layout pass resolves.

mod content;
mod document;
mod node;
mod page;
mod style;

pub use content::{
    Alignment, CodeFormat, Content, Dimension, Formula, Image, ListSpec, PageMeasurements,
    ReferenceDimension, Text, FORMULA_FONTS,
};
pub use document::{
    Document, DocumentSettings, LabelLookup, Metadata, NodeRef, Phase, ReferenceKind,
    MISSING_REFERENCE,
};
pub use node::{AllowedChildren, ContentType, Node, NodeConfig, NodeId};
pub use page::{PageRef, ResolvedPage, DEFAULT_PAGE_GROUP};
pub use style::{NodeStyle, StyleMap, Styleable};
