//! Row generation for tables of contents and other generated lists.

use super::indent::{check_title_widths, IndentTable, TitleColumn};
use super::visitor::{DefaultVisitor, RowVisitor};
use crate::error::{Diagnostics, Error, Result};
use crate::layout::{Measure, MonospaceMeasure, StyleContext};
use crate::model::{
    Content, ContentType, Document, ListSpec, NodeId, NodeRef, NodeStyle, PageRef,
};
use crate::numbering::Numberable;
use crate::traverse::{Traversal, TraversalOrder};
use serde::{Deserialize, Serialize};

/// Navigation target of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    /// `#<label>` or `#node-<id>`
    pub anchor: String,

    /// Resolved page of the target
    pub page: i64,
}

/// One line of a generated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    /// Listed node
    pub node: NodeId,

    /// Depth relative to the list roots; drives indentation
    pub iterator_depth: usize,

    /// Depth in the full document tree
    pub level: usize,

    /// Formatted number, empty for non-enumerated nodes
    pub numbers: String,

    /// Alt title of the node
    pub text: String,

    /// Page string, or the placeholder before layout
    pub page: String,

    /// Target position, once the page is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
}

/// A generated list ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    /// Heading of the list
    pub title: String,

    /// Whether the page column is shown
    pub show_pages: bool,

    /// Rows in document order
    pub rows: Vec<ListRow>,

    /// Offsets per iterator depth
    pub indents: IndentTable,

    /// Warnings raised while building
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

impl ListOutput {
    /// Check if the list has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the rows of a generated list.
///
/// # Example
///
/// ```
/// use pagetree::list::ListBuilder;
/// use pagetree::model::{ContentType, Document};
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// let intro = doc.add_section(root, "Intro").unwrap();
/// doc.add_section(intro, "Background").unwrap();
///
/// let preview = ListBuilder::new(&doc)
///     .with_display_types([ContentType::Section])
///     .preview();
/// assert_eq!(preview.rows[1].numbers, "1.1");
/// assert_eq!(preview.rows[1].page, "???");
/// ```
pub struct ListBuilder<'a> {
    doc: &'a Document,
    roots: Vec<NodeId>,
    spec: ListSpec,
    title: String,
    style: NodeStyle,
    list_width: f32,
    measure: Box<dyn Measure + 'a>,
}

impl<'a> ListBuilder<'a> {
    /// Table of contents over the whole document.
    pub fn new(doc: &'a Document) -> Self {
        let spec = ListSpec::table_of_contents();
        Self {
            doc,
            roots: doc.top_level().to_vec(),
            title: spec.describe(),
            spec,
            style: NodeStyle::default(),
            list_width: 170.0,
            measure: Box::new(MonospaceMeasure::default()),
        }
    }

    /// Builder configured from a list node of the document.
    pub fn for_list(doc: &'a Document, list: NodeId) -> Result<Self> {
        let node = doc.get(list)?;
        let Content::List(spec) = node.content() else {
            return Err(Error::Render(format!(
                "node {} is a {}, not a list",
                list,
                node.content_type()
            )));
        };
        Ok(Self {
            title: node.alt_title(),
            spec: spec.clone(),
            style: node.config().style.clone(),
            ..Self::new(doc)
        })
    }

    /// List the content below `parent` (the parent itself is not listed).
    pub fn with_root(mut self, parent: NodeId) -> Self {
        self.roots = self
            .doc
            .node(parent)
            .map(|n| n.children().to_vec())
            .unwrap_or_default();
        self
    }

    /// List an explicit set of subtree roots, each at depth 0.
    pub fn with_roots(mut self, roots: impl IntoIterator<Item = NodeId>) -> Self {
        self.roots = roots.into_iter().collect();
        self
    }

    /// Replace the list specification.
    pub fn with_spec(mut self, spec: ListSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Types included in the list.
    pub fn with_display_types(mut self, types: impl IntoIterator<Item = ContentType>) -> Self {
        self.spec.display_types = types.into_iter().collect();
        self
    }

    /// Traversal depth limit (-1 = unlimited).
    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.spec.max_depth = max_depth;
        self
    }

    /// Heading of the list.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Style used to measure numbers (key `level<depth>`).
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    /// Available width for the list in user units.
    pub fn with_list_width(mut self, width: f32) -> Self {
        self.list_width = width;
        self
    }

    /// Width measurement service.
    pub fn with_measure(mut self, measure: impl Measure + 'a) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Rows before layout; unresolved pages show the placeholder.
    pub fn preview(&self) -> ListOutput {
        self.preview_with(&mut DefaultVisitor)
    }

    /// [`preview`](Self::preview) with a row visitor.
    pub fn preview_with(&self, visitor: &mut dyn RowVisitor) -> ListOutput {
        self.build(visitor)
    }

    /// Final rows. Fails while any page of the document is unresolved.
    pub fn materialize(&self) -> Result<ListOutput> {
        self.materialize_with(&mut DefaultVisitor)
    }

    /// [`materialize`](Self::materialize) with a row visitor.
    pub fn materialize_with(&self, visitor: &mut dyn RowVisitor) -> Result<ListOutput> {
        let unresolved = self.doc.unresolved_count();
        if unresolved > 0 {
            return Err(Error::UnresolvedPages(unresolved));
        }
        Ok(self.build(visitor))
    }

    fn build(&self, visitor: &mut dyn RowVisitor) -> ListOutput {
        let mut diagnostics = Diagnostics::new();
        let mut spec = self.spec.clone();
        for warning in spec.validate() {
            diagnostics.warn(warning);
        }
        visitor.on_list_start(&self.title);

        let traversal = Traversal::new(self.doc, self.roots.iter().copied(), TraversalOrder::PreOrder)
            .depth_limit(spec.max_depth)
            .show_in_index(spec.display_types.clone());

        let mut rows = Vec::new();
        for visit in traversal {
            let mut row = make_row(&visit.node, visit.depth);
            if visitor.visit_row(&row).apply(&mut row) {
                rows.push(row);
            }
        }

        let widths: Vec<(usize, f32)> = rows
            .iter()
            .map(|row| (row.iterator_depth, self.number_width(row)))
            .collect();
        let indents = IndentTable::compute(
            widths,
            spec.number_gap,
            usize::try_from(spec.indent_max_level).ok(),
            spec.default_text_indent,
        );

        let column = TitleColumn {
            list_width: self.list_width,
            page_column: if spec.show_pages {
                spec.page_number_width + spec.min_page_num_distance
            } else {
                0.0
            },
            min_percentage: spec.min_title_width_percentage,
        };
        let depths = rows.iter().map(|row| row.iterator_depth);
        for warning in check_title_widths(&indents, depths, &column) {
            diagnostics.warn(warning);
        }

        visitor.on_list_end(rows.len());
        log::debug!("Generated {} rows for \"{}\"", rows.len(), self.title);

        ListOutput {
            title: self.title.clone(),
            show_pages: spec.show_pages,
            rows,
            indents,
            diagnostics,
        }
    }

    fn number_width(&self, row: &ListRow) -> f32 {
        let key = format!("level{}", row.iterator_depth);
        let style = StyleContext::from_style(&self.style, Some(&key));
        self.measure.measure_width(&row.numbers, &style)
    }
}

fn make_row(node: &NodeRef<'_>, iterator_depth: usize) -> ListRow {
    let link = match node.page() {
        PageRef::Resolved(page) => Some(LinkTarget {
            anchor: node.anchor(),
            page: page.number,
        }),
        _ => None,
    };

    ListRow {
        node: node.id(),
        iterator_depth,
        level: node.level(),
        numbers: node.formatted_numbers(),
        text: node.alt_title(),
        page: node.page_text(),
        link,
    }
}

/// Final rows of a list node.
pub fn generate_list(doc: &Document, list: NodeId) -> Result<ListOutput> {
    ListBuilder::for_list(doc, list)?.materialize()
}

/// Preview rows of a list node, usable before layout.
pub fn preview_list(doc: &Document, list: NodeId) -> Result<ListOutput> {
    Ok(ListBuilder::for_list(doc, list)?.preview())
}
