//! Interfaces to the layout engine.
//!
//! Typesetting itself lives outside this crate. The core only needs two
//! things from it: the width of a rendered string ([`Measure`]) and the
//! starting page of each node ([`PageLayout`]). [`run_layout_pass`] drives
//! the latter over the whole tree and seals the document.

use crate::error::{Error, Result};
use crate::model::{Document, NodeId, NodeRef, ResolvedPage, Styleable};
use crate::traverse::TraversalOrder;
use std::collections::HashMap;

/// Font attributes consulted when measuring a string.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleContext {
    /// Font family name
    pub font_family: String,

    /// Font size in points
    pub font_size: f32,

    /// Font variation flags
    pub font_style: String,
}

impl StyleContext {
    /// Create a style context.
    pub fn new(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            font_style: String::new(),
        }
    }

    /// Resolve the style of `source` for `key`.
    pub fn from_style<S: Styleable + ?Sized>(source: &S, key: Option<&str>) -> Self {
        Self {
            font_family: source.font_family(key).to_string(),
            font_size: source.font_size(key),
            font_style: source.font_style(key).to_string(),
        }
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new("times", 12.0)
    }
}

/// Width measurement service.
pub trait Measure {
    /// Rendered width of `text` in user units.
    fn measure_width(&self, text: &str, style: &StyleContext) -> f32;
}

impl<F> Measure for F
where
    F: Fn(&str, &StyleContext) -> f32,
{
    fn measure_width(&self, text: &str, style: &StyleContext) -> f32 {
        self(text, style)
    }
}

/// Estimates widths with a fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance of one character relative to the font size
    pub advance: f32,

    /// User units per point
    pub unit_scale: f32,
}

impl MonospaceMeasure {
    /// Create a measure with the given advance ratio and point-to-unit scale.
    pub fn new(advance: f32, unit_scale: f32) -> Self {
        Self { advance, unit_scale }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        // half an em per glyph, millimetres per point
        Self::new(0.5, 0.352_778)
    }
}

impl Measure for MonospaceMeasure {
    fn measure_width(&self, text: &str, style: &StyleContext) -> f32 {
        text.chars().count() as f32 * style.font_size * self.advance * self.unit_scale
    }
}

/// Page placement service, invoked once per node during the layout pass.
pub trait PageLayout {
    /// Starting page of `node`.
    fn render_page_for(&mut self, node: NodeRef<'_>) -> Result<ResolvedPage>;
}

impl<F> PageLayout for F
where
    F: FnMut(NodeRef<'_>) -> Result<ResolvedPage>,
{
    fn render_page_for(&mut self, node: NodeRef<'_>) -> Result<ResolvedPage> {
        self(node)
    }
}

/// Places a fixed number of nodes on each page, counting pages per page group.
#[derive(Debug, Clone)]
pub struct SequentialLayout {
    nodes_per_page: usize,
    placed: HashMap<String, usize>,
}

impl SequentialLayout {
    /// Create a layout placing `nodes_per_page` nodes per page.
    pub fn new(nodes_per_page: usize) -> Self {
        Self {
            nodes_per_page: nodes_per_page.max(1),
            placed: HashMap::new(),
        }
    }
}

impl PageLayout for SequentialLayout {
    fn render_page_for(&mut self, node: NodeRef<'_>) -> Result<ResolvedPage> {
        let group = node.page_group();
        let placed = self.placed.entry(group.to_string()).or_insert(0);
        let page = *placed / self.nodes_per_page + 1;
        *placed += 1;
        Ok(ResolvedPage::new(page as i64, group))
    }
}

/// Outcome of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutReport {
    /// Pages written by this pass
    pub resolved: usize,

    /// Pages that were already resolved before the pass
    pub skipped: usize,
}

/// Resolve the page of every attached node and finalize the document.
///
/// Placeholders are reserved first so that anything rendered during the
/// pass sees fixed-width markers. Nodes are handed to `layout` in pre-order.
pub fn run_layout_pass<L: PageLayout + ?Sized>(doc: &mut Document, layout: &mut L) -> Result<LayoutReport> {
    doc.reserve_placeholders();
    doc.begin_layout();

    let order: Vec<NodeId> = doc
        .traverse(TraversalOrder::PreOrder)
        .map(|visit| visit.node.id())
        .collect();

    let mut report = LayoutReport {
        resolved: 0,
        skipped: 0,
    };
    for id in order {
        let node = doc.get(id)?;
        if node.page().is_resolved() {
            report.skipped += 1;
            continue;
        }
        let page = layout
            .render_page_for(node)
            .map_err(|e| Error::Layout(format!("node {}: {}", id, e)))?;
        doc.resolve_page(id, page)?;
        report.resolved += 1;
    }

    log::debug!(
        "Layout pass resolved {} pages ({} already known)",
        report.resolved,
        report.skipped
    );
    doc.finalize()?;
    Ok(report)
}
