//! Node-level types.

use super::content::Content;
use super::page::PageRef;
use super::style::{NodeStyle, Styleable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Index of a node inside its [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// The document root
    Document,
    /// A (sub)section with a heading
    Section,
    /// A block of running text
    Text,
    /// An image
    Image,
    /// A formula rendered by an external service
    Formula,
    /// A generated list such as a table of contents
    List,
}

impl ContentType {
    /// Tag name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Document => "document",
            ContentType::Section => "section",
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Formula => "formula",
            ContentType::List => "list",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which child types a node accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedChildren {
    /// Any content type
    #[default]
    Any,
    /// No children at all
    Nothing,
    /// Only the listed types
    Only(BTreeSet<ContentType>),
}

impl AllowedChildren {
    /// Accept only the given types.
    pub fn only(types: impl IntoIterator<Item = ContentType>) -> Self {
        AllowedChildren::Only(types.into_iter().collect())
    }

    /// Check if a child of `child` type may be attached.
    pub fn allows(&self, child: ContentType) -> bool {
        match self {
            AllowedChildren::Any => true,
            AllowedChildren::Nothing => false,
            AllowedChildren::Only(types) => types.contains(&child),
        }
    }
}

impl From<bool> for AllowedChildren {
    fn from(allow: bool) -> Self {
        if allow {
            AllowedChildren::Any
        } else {
            AllowedChildren::Nothing
        }
    }
}

/// Configuration of a node. Frozen once the node is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    /// Title of the node
    pub title: String,

    /// Shorter title used in generated lists (falls back to `title`)
    pub alt_title: String,

    /// Whether the node receives its own number
    pub enumerate: bool,

    /// Whether the node is eligible for generated lists
    pub show_in_index: bool,

    /// Identifier for references; unique per document
    pub label: Option<String>,

    /// Page group; inherited from the parent when unset
    pub page_group: Option<String>,

    /// Child types this node accepts
    pub allowed_children: AllowedChildren,

    /// Per-key style values
    pub style: NodeStyle,
}

impl NodeConfig {
    /// Defaults for a content type.
    pub fn for_type(content_type: ContentType) -> Self {
        let base = Self {
            title: String::new(),
            alt_title: String::new(),
            enumerate: true,
            show_in_index: true,
            label: None,
            page_group: None,
            allowed_children: AllowedChildren::Any,
            style: NodeStyle::default(),
        };

        match content_type {
            ContentType::Document | ContentType::Section => base,
            ContentType::Text => Self {
                enumerate: false,
                show_in_index: false,
                allowed_children: AllowedChildren::Nothing,
                ..base
            },
            ContentType::Image => Self {
                title: "Image".to_string(),
                allowed_children: AllowedChildren::only([ContentType::Image]),
                ..base
            },
            ContentType::Formula => Self {
                title: "Formula".to_string(),
                allowed_children: AllowedChildren::only([ContentType::Formula]),
                ..base
            },
            ContentType::List => Self {
                allowed_children: AllowedChildren::Nothing,
                ..base
            },
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the alternative list title.
    pub fn with_alt_title(mut self, alt_title: impl Into<String>) -> Self {
        self.alt_title = alt_title.into();
        self
    }

    /// Enable or disable numbering.
    pub fn with_enumerate(mut self, enumerate: bool) -> Self {
        self.enumerate = enumerate;
        self
    }

    /// Enable or disable list eligibility.
    pub fn with_show_in_index(mut self, show: bool) -> Self {
        self.show_in_index = show;
        self
    }

    /// Set the reference label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the page group.
    pub fn with_page_group(mut self, group: impl Into<String>) -> Self {
        self.page_group = Some(group.into());
        self
    }

    /// Restrict accepted child types.
    pub fn with_allowed_children(mut self, allowed: impl Into<AllowedChildren>) -> Self {
        self.allowed_children = allowed.into();
        self
    }

    /// Replace the style.
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }
}

/// A node of the document tree, stored in the document's arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) content: Content,
    pub(crate) config: NodeConfig,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) page: PageRef,
}

impl Node {
    pub(crate) fn new(id: NodeId, content: Content, config: NodeConfig) -> Self {
        Self {
            id,
            content,
            config,
            parent: None,
            children: Vec::new(),
            page: PageRef::Unassigned,
        }
    }

    /// Id of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Typed payload.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Kind of the node.
    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    /// Frozen configuration.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Parent id (None for the root and for detached nodes).
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Page reference state.
    pub fn page(&self) -> &PageRef {
        &self.page
    }

    /// Title of the node.
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Title for generated lists.
    pub fn alt_title(&self) -> String {
        if !self.config.alt_title.is_empty() {
            return self.config.alt_title.clone();
        }
        match &self.content {
            Content::List(spec) => spec.describe(),
            _ => self.config.title.clone(),
        }
    }

    /// Whether the node receives a number.
    pub fn enumerate(&self) -> bool {
        self.config.enumerate
    }

    /// Whether the node is eligible for generated lists.
    pub fn show_in_index(&self) -> bool {
        self.config.show_in_index
    }

    /// Reference label, if any.
    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }
}

impl Styleable for Node {
    fn style(&self) -> &NodeStyle {
        &self.config.style
    }
}
