//! Document-level types: the root of the content tree.

use super::content::{Formula, Image, ListSpec, Text};
use super::page::{PageRef, ResolvedPage, DEFAULT_PAGE_GROUP};
use super::style::{NodeStyle, Styleable};
use super::{Content, ContentType, Node, NodeConfig, NodeId};
use crate::error::{Diagnostics, Error, Result, Warning};
use crate::number::{Number, NumberFormat};
use crate::numbering::{Numberable, NumberingSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Deref;

/// Text printed for references to unknown labels.
pub const MISSING_REFERENCE: &str = "[??]";

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Short description
    pub description: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

/// Document-wide settings supplied by the configuration loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentSettings {
    /// Document metadata
    pub metadata: Metadata,

    /// Numbering rules per content type
    pub numbering: NumberingSettings,

    /// Page-number format per page group
    pub page_number_styles: HashMap<String, NumberFormat>,

    /// Character repeated for unresolved page references
    pub unresolved_reference_marker: char,

    /// Number of marker characters reserved for a page number
    pub assumed_page_number_width: usize,
}

impl DocumentSettings {
    /// Create default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON mapping. Unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the numbering rules.
    pub fn with_numbering(mut self, numbering: NumberingSettings) -> Self {
        self.numbering = numbering;
        self
    }

    /// Register a page-number format for a page group.
    pub fn with_page_number_style(mut self, group: impl Into<String>, format: NumberFormat) -> Self {
        self.page_number_styles.insert(group.into(), format);
        self
    }

    /// Set the placeholder marker and width.
    pub fn with_placeholder(mut self, marker: char, width: usize) -> Self {
        self.unresolved_reference_marker = marker;
        self.assumed_page_number_width = width;
        self
    }
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            metadata: Metadata::default(),
            numbering: NumberingSettings::default(),
            page_number_styles: HashMap::new(),
            unresolved_reference_marker: '?',
            assumed_page_number_width: 3,
        }
    }
}

/// Lifecycle of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nodes and labels may be added
    Construction,
    /// Layout is running; only page resolutions are accepted
    Layout,
    /// Every page is resolved
    Finalized,
}

/// Result of a label lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLookup {
    /// The labelled node
    Found(NodeId),
    /// Nobody registered the label
    Missing,
}

/// What a reference renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// The formatted number of the target
    Number,
    /// The page of the target
    Page,
    /// The alt title of the target
    Title,
}

/// The document tree. Owns every node, the label registry and the settings.
#[derive(Debug, Clone)]
pub struct Document {
    settings: DocumentSettings,
    nodes: Vec<Node>,
    labels: HashMap<String, NodeId>,
    phase: Phase,
    diagnostics: Diagnostics,
}

impl Document {
    /// Create an empty document with default settings.
    pub fn new() -> Self {
        Self::with_settings(DocumentSettings::default())
    }

    /// Create an empty document.
    pub fn with_settings(mut settings: DocumentSettings) -> Self {
        let mut diagnostics = Diagnostics::new();
        for warning in settings.numbering.validate() {
            diagnostics.warn(warning);
        }

        let mut config = NodeConfig::for_type(ContentType::Document);
        if let Some(title) = &settings.metadata.title {
            config.title = title.clone();
        }
        let root = Node::new(NodeId(0), Content::Document, config);

        Self {
            settings,
            nodes: vec![root],
            labels: HashMap::new(),
            phase: Phase::Construction,
            diagnostics,
        }
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Document settings.
    pub fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Warnings collected so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Take the collected warnings, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    /// Number of nodes including the root and detached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no content besides the root.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Raw node access.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Tree-aware view of a node.
    pub fn get(&self, id: NodeId) -> Result<NodeRef<'_>> {
        self.node(id)
            .map(|node| NodeRef { doc: self, node })
            .ok_or(Error::NodeNotFound(id))
    }

    /// Top-level content in insertion order.
    pub fn top_level(&self) -> &[NodeId] {
        &self.nodes[0].children
    }

    /// Check if a node is part of the tree (the root always is).
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root() || self.node(id).map_or(false, |n| n.parent.is_some())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(Error::NodeNotFound(id))
    }

    fn ensure_construction(&self) -> Result<()> {
        if self.phase != Phase::Construction {
            return Err(Error::TreeSealed);
        }
        Ok(())
    }

    /// Create a detached node. Invalid content settings are corrected with a warning.
    pub fn create(&mut self, mut content: Content, config: NodeConfig) -> NodeId {
        for warning in content.validate() {
            self.diagnostics.warn(warning);
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, content, config));
        id
    }

    /// Create a detached node with the defaults of its type.
    pub fn create_default(&mut self, content: Content) -> NodeId {
        let config = NodeConfig::for_type(content.content_type());
        self.create(content, config)
    }

    /// Change the configuration of a detached node.
    pub fn configure(&mut self, id: NodeId, f: impl FnOnce(&mut NodeConfig)) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.parent.is_some() || id == NodeId(0) {
            return Err(Error::ConfigurationFrozen(id));
        }
        f(&mut node.config);
        Ok(())
    }

    /// Attach a detached node below an attached parent.
    ///
    /// This freezes the child's configuration and registers its label.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ensure_construction()?;
        if child == self.root() {
            return Err(Error::RootReparent);
        }

        let child_node = self.node(child).ok_or(Error::NodeNotFound(child))?;
        let parent_node = self.node(parent).ok_or(Error::NodeNotFound(parent))?;
        if child_node.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if !self.is_attached(parent) {
            return Err(Error::DetachedParent(parent));
        }

        let child_type = child_node.content_type();
        if !parent_node.config.allowed_children.allows(child_type) {
            return Err(Error::ChildTypeNotAllowed {
                parent: parent_node.content_type(),
                child: child_type,
            });
        }

        let label = child_node.config.label.clone();
        if let Some(label) = &label {
            if self.labels.contains_key(label) {
                return Err(Error::DuplicateLabel(label.clone()));
            }
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        if let Some(label) = label {
            self.labels.insert(label, child);
        }
        Ok(())
    }

    /// Create a node and attach it in one step.
    pub fn add(&mut self, parent: NodeId, content: Content, config: NodeConfig) -> Result<NodeId> {
        let id = self.create(content, config);
        if let Err(err) = self.attach(parent, id) {
            // nothing references the new node yet
            self.nodes.pop();
            return Err(err);
        }
        Ok(id)
    }

    /// Add a section with the given title.
    pub fn add_section(&mut self, parent: NodeId, title: impl Into<String>) -> Result<NodeId> {
        let config = NodeConfig::for_type(ContentType::Section).with_title(title);
        self.add(parent, Content::Section, config)
    }

    /// Add a text block.
    pub fn add_text(&mut self, parent: NodeId, text: Text) -> Result<NodeId> {
        let config = NodeConfig::for_type(ContentType::Text);
        self.add(parent, Content::Text(text), config)
    }

    /// Add an image.
    pub fn add_image(&mut self, parent: NodeId, image: Image) -> Result<NodeId> {
        let config = NodeConfig::for_type(ContentType::Image);
        self.add(parent, Content::Image(image), config)
    }

    /// Add a formula.
    pub fn add_formula(&mut self, parent: NodeId, formula: Formula) -> Result<NodeId> {
        let config = NodeConfig::for_type(ContentType::Formula);
        self.add(parent, Content::Formula(formula), config)
    }

    /// Add a generated list.
    pub fn add_list(&mut self, parent: NodeId, spec: ListSpec) -> Result<NodeId> {
        let config = NodeConfig::for_type(ContentType::List);
        self.add(parent, Content::List(spec), config)
    }

    /// Set or replace the label of a node.
    ///
    /// Detached nodes keep the label in their configuration until attached.
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<()> {
        self.ensure_construction()?;
        let label = label.into();
        let attached = self.is_attached(id);
        let node = self.node(id).ok_or(Error::NodeNotFound(id))?;

        if node.config.label.as_deref() == Some(label.as_str()) {
            return Ok(());
        }
        if attached {
            if self.labels.contains_key(&label) {
                return Err(Error::DuplicateLabel(label));
            }
            if let Some(old) = node.config.label.clone() {
                self.labels.remove(&old);
            }
            self.labels.insert(label.clone(), id);
        }
        self.nodes[id.0].config.label = Some(label);
        Ok(())
    }

    /// Registered labels.
    pub fn labels(&self) -> &HashMap<String, NodeId> {
        &self.labels
    }

    /// Look up a label.
    pub fn resolve_label(&self, label: &str) -> LabelLookup {
        match self.labels.get(label) {
            Some(id) => LabelLookup::Found(*id),
            None => LabelLookup::Missing,
        }
    }

    /// Render a reference to a labelled node.
    ///
    /// Unknown labels render as [`MISSING_REFERENCE`] and are reported.
    pub fn reference(&mut self, label: &str, kind: ReferenceKind) -> String {
        let id = match self.resolve_label(label) {
            LabelLookup::Found(id) => id,
            LabelLookup::Missing => {
                self.diagnostics.warn(Warning::MissingLabel(label.to_string()));
                return MISSING_REFERENCE.to_string();
            }
        };

        let node = NodeRef {
            doc: &*self,
            node: &self.nodes[id.0],
        };
        match kind {
            ReferenceKind::Number => node.formatted_numbers(),
            ReferenceKind::Page => node.page_text(),
            ReferenceKind::Title => node.alt_title(),
        }
    }

    /// Page-number format registered for a page group (`int` by default).
    pub fn page_number_style(&self, group: &str) -> NumberFormat {
        self.settings
            .page_number_styles
            .get(group)
            .copied()
            .unwrap_or_default()
    }

    /// Fixed-width stand-in for unknown pages.
    pub fn placeholder(&self) -> String {
        PageRef::placeholder_text(
            self.settings.unresolved_reference_marker,
            self.settings.assumed_page_number_width,
        )
    }

    /// Query a node's page, caching a placeholder if layout has not resolved it.
    pub fn reserve_page(&mut self, id: NodeId) -> Result<&PageRef> {
        let marker = self.settings.unresolved_reference_marker;
        let width = self.settings.assumed_page_number_width;
        Ok(self.node_mut(id)?.page.reserve(marker, width))
    }

    /// Reserve placeholders for every attached node.
    pub fn reserve_placeholders(&mut self) {
        let marker = self.settings.unresolved_reference_marker;
        let width = self.settings.assumed_page_number_width;
        for node in self.nodes.iter_mut().skip(1) {
            if node.parent.is_some() {
                node.page.reserve(marker, width);
            }
        }
    }

    /// Seal the tree for layout.
    pub fn begin_layout(&mut self) {
        if self.phase == Phase::Construction {
            log::debug!("Sealing document with {} nodes for layout", self.nodes.len());
            self.phase = Phase::Layout;
        }
    }

    /// Write the final page of a node. Each node is resolved exactly once.
    pub fn resolve_page(&mut self, id: NodeId, page: ResolvedPage) -> Result<()> {
        let node = self.node(id).ok_or(Error::NodeNotFound(id))?;
        if node.parent.is_none() && id != self.root() {
            return Err(Error::DetachedNode(id));
        }
        self.begin_layout();
        self.node_mut(id)?.page.resolve(id, page)
    }

    /// Attached nodes (excluding the root) whose page is not final.
    pub fn unresolved_count(&self) -> usize {
        self.nodes
            .iter()
            .skip(1)
            .filter(|n| n.parent.is_some() && !n.page.is_resolved())
            .count()
    }

    /// Finish layout. Fails while any attached node is unresolved.
    pub fn finalize(&mut self) -> Result<()> {
        let unresolved = self.unresolved_count();
        if unresolved > 0 {
            return Err(Error::UnresolvedPages(unresolved));
        }
        self.phase = Phase::Finalized;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A node together with the document it lives in.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    /// The owning document.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// The plain node.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Parent view, if attached.
    pub fn parent_node(&self) -> Option<NodeRef<'a>> {
        self.node.parent.map(|id| NodeRef {
            doc: self.doc,
            node: &self.doc.nodes[id.0],
        })
    }

    /// Children in insertion order.
    pub fn child_nodes(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.node.children.iter().map(move |id| NodeRef {
            doc,
            node: &doc.nodes[id.0],
        })
    }

    /// Ancestors from the parent upwards, excluding the document root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let root = self.doc.root();
        std::iter::successors(self.parent_node(), |n| n.parent_node())
            .take_while(move |n| n.id() != root)
    }

    /// Nesting depth in the full tree; top-level content is at level 0.
    pub fn level(&self) -> usize {
        self.ancestors().count()
    }

    /// Whether the node is part of the tree.
    pub fn is_attached(&self) -> bool {
        self.doc.is_attached(self.node.id)
    }

    /// Own page group or the nearest ancestor's.
    pub fn page_group(&self) -> &'a str {
        std::iter::successors(Some(*self), |n| n.parent_node())
            .find_map(|n| n.node.config.page_group.as_deref())
            .unwrap_or(DEFAULT_PAGE_GROUP)
    }

    /// Page rendered with the style of its page group, or the placeholder.
    pub fn page_text(&self) -> String {
        match &self.node.page {
            PageRef::Resolved(page) => {
                Number(page.number).formatted(self.doc.page_number_style(&page.group))
            }
            PageRef::Placeholder { marker } => marker.clone(),
            PageRef::Unassigned => self.doc.placeholder(),
        }
    }

    /// Anchor of the node for navigation.
    pub fn anchor(&self) -> String {
        match self.node.label() {
            Some(label) => format!("#{}", label),
            None => format!("#node-{}", self.node.id),
        }
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node
    }
}

impl Styleable for NodeRef<'_> {
    fn style(&self) -> &NodeStyle {
        &self.node.config.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AllowedChildren;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.phase(), Phase::Construction);
    }

    #[test]
    fn test_sibling_order_preserved() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.add_section(root, "A").unwrap();
        let b = doc.add_section(root, "B").unwrap();
        let c = doc.add_section(root, "C").unwrap();
        assert_eq!(doc.top_level(), &[a, b, c]);
    }

    #[test]
    fn test_root_cannot_be_reparented() {
        let mut doc = Document::new();
        let root = doc.root();
        let section = doc.add_section(root, "Intro").unwrap();
        assert!(matches!(doc.attach(section, root), Err(Error::RootReparent)));
    }

    #[test]
    fn test_attach_exactly_once() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.add_section(root, "A").unwrap();
        let b = doc.add_section(root, "B").unwrap();
        assert!(matches!(doc.attach(a, b), Err(Error::AlreadyAttached(_))));
    }

    #[test]
    fn test_detached_parent_rejected() {
        let mut doc = Document::new();
        let loose = doc.create_default(Content::Section);
        let child = doc.create_default(Content::Section);
        assert!(matches!(
            doc.attach(loose, child),
            Err(Error::DetachedParent(_))
        ));
    }

    #[test]
    fn test_forbidden_child_type() {
        let mut doc = Document::new();
        let root = doc.root();
        let text = doc.add_text(root, Text::new("body")).unwrap();
        let err = doc.add_section(text, "Nested").unwrap_err();
        assert!(matches!(
            err,
            Error::ChildTypeNotAllowed {
                parent: ContentType::Text,
                child: ContentType::Section
            }
        ));
        // the rejected node is not left behind
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_configuration_frozen_after_attach() {
        let mut doc = Document::new();
        let root = doc.root();
        let id = doc.create_default(Content::Section);
        doc.configure(id, |c| c.enumerate = false).unwrap();
        doc.attach(root, id).unwrap();

        let err = doc.configure(id, |c| c.enumerate = true).unwrap_err();
        assert!(matches!(err, Error::ConfigurationFrozen(_)));
        assert!(!doc.get(id).unwrap().enumerate());
    }

    #[test]
    fn test_labels() {
        let mut doc = Document::new();
        let root = doc.root();
        let problem = doc.add_section(root, "Problem").unwrap();
        doc.set_label(problem, "sec:problem").unwrap();
        assert_eq!(doc.resolve_label("sec:problem"), LabelLookup::Found(problem));
        assert_eq!(doc.resolve_label("sec:none"), LabelLookup::Missing);

        let other = doc.add_section(root, "Other").unwrap();
        let err = doc.set_label(other, "sec:problem").unwrap_err();
        assert!(matches!(err, Error::DuplicateLabel(_)));
        assert_eq!(doc.resolve_label("sec:problem"), LabelLookup::Found(problem));
    }

    #[test]
    fn test_label_registered_on_attach() {
        let mut doc = Document::new();
        let root = doc.root();
        let config = NodeConfig::for_type(ContentType::Section).with_label("intro");
        let first = doc.add(root, Content::Section, config.clone()).unwrap();
        assert_eq!(doc.resolve_label("intro"), LabelLookup::Found(first));

        let err = doc.add(root, Content::Section, config).unwrap_err();
        assert!(matches!(err, Error::DuplicateLabel(_)));
    }

    #[test]
    fn test_relabel_moves_registration() {
        let mut doc = Document::new();
        let root = doc.root();
        let id = doc.add_section(root, "A").unwrap();
        doc.set_label(id, "old").unwrap();
        doc.set_label(id, "new").unwrap();
        assert_eq!(doc.resolve_label("old"), LabelLookup::Missing);
        assert_eq!(doc.resolve_label("new"), LabelLookup::Found(id));
    }

    #[test]
    fn test_missing_reference_is_reported() {
        let mut doc = Document::new();
        let text = doc.reference("img:nn", ReferenceKind::Number);
        assert_eq!(text, MISSING_REFERENCE);
        assert_eq!(
            doc.diagnostics().warnings(),
            &[Warning::MissingLabel("img:nn".into())]
        );
    }

    #[test]
    fn test_level_and_page_group() {
        let mut doc = Document::new();
        let root = doc.root();
        let main = doc
            .add(
                root,
                Content::Section,
                NodeConfig::for_type(ContentType::Section)
                    .with_title("Main")
                    .with_page_group("PG1"),
            )
            .unwrap();
        let sub = doc.add_section(main, "Sub").unwrap();
        let intro = doc.add_section(root, "Intro").unwrap();

        let sub_ref = doc.get(sub).unwrap();
        assert_eq!(sub_ref.level(), 1);
        assert_eq!(sub_ref.page_group(), "PG1");
        assert_eq!(doc.get(main).unwrap().level(), 0);
        assert_eq!(doc.get(intro).unwrap().page_group(), DEFAULT_PAGE_GROUP);
    }

    #[test]
    fn test_page_lifecycle() {
        let settings = DocumentSettings::new()
            .with_placeholder('#', 4)
            .with_page_number_style("front", NumberFormat::LowerRoman);
        let mut doc = Document::with_settings(settings);
        let root = doc.root();
        let id = doc.add_section(root, "Preface").unwrap();

        assert_eq!(doc.get(id).unwrap().page_text(), "####");
        assert_eq!(
            doc.reserve_page(id).unwrap(),
            &PageRef::Placeholder {
                marker: "####".into()
            }
        );

        doc.resolve_page(id, ResolvedPage::new(4, "front")).unwrap();
        assert_eq!(doc.phase(), Phase::Layout);
        assert_eq!(doc.get(id).unwrap().page_text(), "iv");
        assert!(doc.resolve_page(id, ResolvedPage::new(5, "front")).is_err());

        // construction is over
        assert!(matches!(doc.add_section(root, "Late"), Err(Error::TreeSealed)));

        doc.finalize().unwrap();
        assert_eq!(doc.phase(), Phase::Finalized);
    }

    #[test]
    fn test_resolve_rejects_unknown_and_detached_nodes() {
        let mut doc = Document::new();
        let loose = doc.create_default(Content::Section);
        let missing = NodeId(42);

        assert!(matches!(
            doc.resolve_page(missing, ResolvedPage::new(1, "default")),
            Err(Error::NodeNotFound(id)) if id == missing
        ));
        assert!(matches!(
            doc.resolve_page(loose, ResolvedPage::new(1, "default")),
            Err(Error::DetachedNode(id)) if id == loose
        ));

        // failed calls leave the tree open
        assert_eq!(doc.phase(), Phase::Construction);
        let root = doc.root();
        doc.attach(root, loose).unwrap();
        doc.resolve_page(loose, ResolvedPage::new(1, "default")).unwrap();
        assert_eq!(doc.phase(), Phase::Layout);
    }

    #[test]
    fn test_finalize_requires_all_pages() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.add_section(root, "A").unwrap();
        doc.add_section(root, "B").unwrap();
        doc.resolve_page(a, ResolvedPage::new(1, "default")).unwrap();
        assert!(matches!(doc.finalize(), Err(Error::UnresolvedPages(1))));
    }

    #[test]
    fn test_settings_from_json() {
        let settings = DocumentSettings::from_json(
            r#"{
                "metadata": {"title": "Report", "author": "N. N."},
                "page_number_styles": {"PG1": "roman", "PG2": "alpha"},
                "assumed_page_number_width": 2
            }"#,
        )
        .unwrap();
        assert_eq!(settings.metadata.title.as_deref(), Some("Report"));
        assert_eq!(settings.page_number_styles["PG1"], NumberFormat::LowerRoman);
        assert_eq!(settings.unresolved_reference_marker, '?');

        let doc = Document::with_settings(settings);
        assert_eq!(doc.get(doc.root()).unwrap().title(), "Report");
        assert_eq!(doc.placeholder(), "??");

        let err = DocumentSettings::from_json(r#"{"pageSize": "A4"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn test_allowed_children_override() {
        let mut doc = Document::new();
        let root = doc.root();
        let appendix = doc
            .add(
                root,
                Content::Section,
                NodeConfig::for_type(ContentType::Section)
                    .with_allowed_children(AllowedChildren::only([ContentType::Text])),
            )
            .unwrap();
        assert!(doc.add_text(appendix, Text::new("x")).is_ok());
        assert!(doc.add_section(appendix, "y").is_err());
    }
}
