//! Depth-first traversal of the content tree.
//!
//! A [`Traversal`] lazily yields `(node, depth)` pairs over a set of root
//! nodes. Depth counts from the roots (0), not from the document root.
//! [`ShowInIndexFilter`] narrows a traversal to nodes eligible for a
//! generated list while still descending into the nodes it rejects.

use crate::model::{ContentType, Document, NodeId, NodeRef};
use std::collections::BTreeSet;

/// Order in which a node and its children are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Node before its children
    #[default]
    PreOrder,
    /// Children before their node
    PostOrder,
}

/// A node reached by a traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// The visited node
    pub node: NodeRef<'a>,

    /// Depth relative to the traversal roots
    pub depth: usize,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    id: NodeId,
    depth: usize,
    expanded: bool,
}

/// Lazy depth-first iterator over a subtree.
///
/// The iterator only borrows the document; clone it before consuming to
/// walk the same sequence again.
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    doc: &'a Document,
    order: TraversalOrder,
    max_depth: Option<usize>,
    stack: Vec<Frame>,
}

impl<'a> Traversal<'a> {
    /// Traverse the given roots in order.
    pub fn new(doc: &'a Document, roots: impl IntoIterator<Item = NodeId>, order: TraversalOrder) -> Self {
        let mut roots: Vec<NodeId> = roots
            .into_iter()
            .filter(|id| doc.node(*id).is_some())
            .collect();
        roots.reverse();

        Self {
            doc,
            order,
            max_depth: None,
            stack: roots
                .into_iter()
                .map(|id| Frame {
                    id,
                    depth: 0,
                    expanded: false,
                })
                .collect(),
        }
    }

    /// Traverse the children of `parent`; the parent itself is not emitted.
    pub fn children_of(doc: &'a Document, parent: NodeId, order: TraversalOrder) -> Self {
        let children = doc
            .node(parent)
            .map(|n| n.children().to_vec())
            .unwrap_or_default();
        Self::new(doc, children, order)
    }

    /// Stop descending below `max_depth`; nodes at that depth are still emitted.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Depth limit in configuration form: negative values mean unlimited.
    pub fn depth_limit(self, max_depth: i32) -> Self {
        self.with_max_depth(usize::try_from(max_depth).ok())
    }

    /// Keep only nodes of the given types that are shown in indexes.
    pub fn show_in_index(self, types: BTreeSet<ContentType>) -> ShowInIndexFilter<'a> {
        ShowInIndexFilter { inner: self, types }
    }

    fn descends(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    fn push_children(&mut self, id: NodeId, depth: usize) {
        let Some(node) = self.doc.node(id) else {
            return;
        };
        for child in node.children().iter().rev() {
            self.stack.push(Frame {
                id: *child,
                depth: depth + 1,
                expanded: false,
            });
        }
    }

    fn visit(&self, frame: Frame) -> Option<Visit<'a>> {
        self.doc.get(frame.id).ok().map(|node| Visit {
            node,
            depth: frame.depth,
        })
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let descend = self.descends(frame.depth);
            match self.order {
                TraversalOrder::PreOrder => {
                    if descend {
                        self.push_children(frame.id, frame.depth);
                    }
                    return self.visit(frame);
                }
                TraversalOrder::PostOrder => {
                    if frame.expanded || !descend {
                        return self.visit(frame);
                    }
                    self.stack.push(Frame {
                        expanded: true,
                        ..frame
                    });
                    self.push_children(frame.id, frame.depth);
                }
            }
        }
        None
    }
}

/// Traversal narrowed to index-eligible nodes of selected types.
#[derive(Debug, Clone)]
pub struct ShowInIndexFilter<'a> {
    inner: Traversal<'a>,
    types: BTreeSet<ContentType>,
}

impl ShowInIndexFilter<'_> {
    /// Check if a node passes the filter.
    pub fn accepts(&self, node: &NodeRef<'_>) -> bool {
        node.show_in_index() && self.types.contains(&node.content_type())
    }
}

impl<'a> Iterator for ShowInIndexFilter<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let visit = self.inner.next()?;
            if self.accepts(&visit.node) {
                return Some(visit);
            }
        }
    }
}

impl Document {
    /// Traverse all content below the root.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        Traversal::children_of(self, self.root(), order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Content, Image, NodeConfig, Text};

    fn titles<'a>(visits: impl Iterator<Item = Visit<'a>>) -> Vec<(String, usize)> {
        visits
            .map(|v| (v.node.title().to_string(), v.depth))
            .collect()
    }

    fn sample() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let parent = doc.add_section(root, "P").unwrap();
        let c1 = doc.add_section(parent, "C1").unwrap();
        doc.add_section(c1, "C1a").unwrap();
        doc.add_section(parent, "C2").unwrap();
        doc.add_section(parent, "C3").unwrap();
        doc
    }

    #[test]
    fn test_pre_order_preserves_insertion() {
        let doc = sample();
        let visits = titles(doc.traverse(TraversalOrder::PreOrder));
        assert_eq!(
            visits,
            vec![
                ("P".to_string(), 0),
                ("C1".to_string(), 1),
                ("C1a".to_string(), 2),
                ("C2".to_string(), 1),
                ("C3".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_post_order() {
        let doc = sample();
        let order: Vec<String> = titles(doc.traverse(TraversalOrder::PostOrder))
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        assert_eq!(order, vec!["C1a", "C1", "C2", "C3", "P"]);
    }

    #[test]
    fn test_depth_limit_emits_boundary() {
        let doc = sample();
        for order in [TraversalOrder::PreOrder, TraversalOrder::PostOrder] {
            let visits = titles(doc.traverse(order).depth_limit(1));
            assert_eq!(visits.len(), 4);
            assert!(visits.iter().all(|(_, depth)| *depth <= 1));
        }

        let top = titles(doc.traverse(TraversalOrder::PreOrder).depth_limit(0));
        assert_eq!(top, vec![("P".to_string(), 0)]);
    }

    #[test]
    fn test_restartable() {
        let doc = sample();
        let traversal = doc.traverse(TraversalOrder::PreOrder);
        let first: Vec<_> = titles(traversal.clone());
        let second: Vec<_> = titles(traversal);
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_descends_into_rejected_nodes() {
        let mut doc = Document::new();
        let root = doc.root();
        let chapter = doc.add_section(root, "Chapter").unwrap();
        let figure = doc.add_image(chapter, Image::new("a.png")).unwrap();
        // images only accept images by default; open it up for this tree
        let open = doc
            .add(
                chapter,
                Content::Image(Image::new("b.png")),
                NodeConfig::for_type(ContentType::Image).with_allowed_children(true),
            )
            .unwrap();
        doc.add_section(open, "Below image").unwrap();
        doc.add_text(chapter, Text::new("body")).unwrap();
        let hidden = doc
            .add(
                chapter,
                Content::Section,
                NodeConfig::for_type(ContentType::Section)
                    .with_title("Hidden")
                    .with_show_in_index(false),
            )
            .unwrap();
        doc.add_section(hidden, "Under hidden").unwrap();

        let sections = titles(
            doc.traverse(TraversalOrder::PreOrder)
                .show_in_index(BTreeSet::from([ContentType::Section])),
        );
        assert_eq!(
            sections,
            vec![
                ("Chapter".to_string(), 0),
                ("Below image".to_string(), 2),
                ("Under hidden".to_string(), 2),
            ]
        );

        let images: Vec<NodeId> = doc
            .traverse(TraversalOrder::PreOrder)
            .show_in_index(BTreeSet::from([ContentType::Image]))
            .map(|v| v.node.id())
            .collect();
        assert_eq!(images, vec![figure, open]);
    }

    #[test]
    fn test_explicit_roots() {
        let doc = sample();
        let p = doc.top_level()[0];
        let c1 = doc.get(p).unwrap().children()[0];
        let visits = titles(Traversal::new(&doc, [c1], TraversalOrder::PreOrder));
        assert_eq!(visits, vec![("C1".to_string(), 0), ("C1a".to_string(), 1)]);
    }
}
