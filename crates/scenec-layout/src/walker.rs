//! Depth-first scene-graph walker.

use crate::context::LayoutContext;
use scenec_core::{NodeId, SceneNode};

/// One node visited by the walker.
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry<'a> {
    pub node: &'a SceneNode,
    /// Depth below the walk roots (roots are 0)
    pub depth: usize,
    pub parent_id: Option<&'a NodeId>,
    pub layout: LayoutContext,
    /// Position among the parent's children (or among the roots)
    pub index: usize,
}

impl<'a> WalkEntry<'a> {
    pub fn id(&self) -> &'a NodeId {
        &self.node.id
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending<'a> {
    node: &'a SceneNode,
    parent: Option<&'a SceneNode>,
    depth: usize,
    index: usize,
}

/// Pre-order iterator over a forest of scene nodes.
///
/// Children are visited in document order. The walker borrows the tree and
/// never filters or mutates it; [`restart`](Self::restart) or a clone gives
/// an identical second pass.
#[derive(Debug, Clone)]
pub struct ScenegraphWalker<'a> {
    roots: &'a [SceneNode],
    stack: Vec<Pending<'a>>,
}

impl<'a> ScenegraphWalker<'a> {
    /// Walk every node under `roots`, each root taking the root context.
    pub fn new(roots: &'a [SceneNode]) -> Self {
        let mut walker = Self {
            roots,
            stack: Vec::new(),
        };
        walker.restart();
        walker
    }

    /// Walk the subtree of a single node, treating it as the root.
    pub fn from_node(node: &'a SceneNode) -> Self {
        Self::new(std::slice::from_ref(node))
    }

    /// Rewind to the first root.
    pub fn restart(&mut self) {
        self.stack.clear();
        self.stack
            .extend(self.roots.iter().enumerate().rev().map(|(index, node)| Pending {
                node,
                parent: None,
                depth: 0,
                index,
            }));
    }
}

impl<'a> Iterator for ScenegraphWalker<'a> {
    type Item = WalkEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let pending = self.stack.pop()?;
        let node = pending.node;

        // Reverse push keeps the first child on top of the stack.
        self.stack
            .extend(node.children.iter().enumerate().rev().map(|(index, child)| Pending {
                node: child,
                parent: Some(node),
                depth: pending.depth + 1,
                index,
            }));

        let layout = match pending.parent {
            Some(parent) => LayoutContext::for_child(parent, node),
            None => LayoutContext::Root,
        };

        tracing::trace!(id = %node.id, depth = pending.depth, ?layout, "walk");

        Some(WalkEntry {
            node,
            depth: pending.depth,
            parent_id: pending.parent.map(|parent| &parent.id),
            layout,
            index: pending.index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FlowDirection;
    use scenec_core::{FrameProps, LayoutMode, NodeKind, Rect, TextProps, TextStyle};

    fn frame(id: &str, layout_mode: LayoutMode) -> SceneNode {
        SceneNode::new(
            id,
            NodeKind::Frame(FrameProps {
                layout_mode,
                ..Default::default()
            }),
        )
    }

    fn text(id: &str) -> SceneNode {
        SceneNode::new(
            id,
            NodeKind::Text(TextProps::new(id, TextStyle::new("Inter", 400.0, 16.0))),
        )
    }

    fn sample() -> Vec<SceneNode> {
        vec![
            frame("a", LayoutMode::Horizontal)
                .with_child(text("a1"))
                .with_child(
                    frame("a2", LayoutMode::None)
                        .with_bounds(Rect::new(0.0, 0.0, 50.0, 50.0))
                        .with_child(text("a2x").with_bounds(Rect::new(5.0, 6.0, 10.0, 10.0))),
                )
                .with_child(text("a3")),
            frame("b", LayoutMode::None),
        ]
    }

    #[test]
    fn test_preorder_document_order() {
        let roots = sample();
        let ids: Vec<_> = ScenegraphWalker::new(&roots)
            .map(|e| e.node.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "a1", "a2", "a2x", "a3", "b"]);
    }

    #[test]
    fn test_depth_parent_and_index() {
        let roots = sample();
        let entries: Vec<_> = ScenegraphWalker::new(&roots).collect();

        let a2x = &entries[3];
        assert_eq!(a2x.depth, 2);
        assert_eq!(a2x.parent_id.map(NodeId::as_str), Some("a2"));
        assert_eq!(a2x.index, 0);

        let b = &entries[5];
        assert_eq!(b.depth, 0);
        assert!(b.parent_id.is_none());
        assert_eq!(b.index, 1);
    }

    #[test]
    fn test_layout_context_per_parent() {
        let roots = sample();
        let entries: Vec<_> = ScenegraphWalker::new(&roots).collect();

        assert_eq!(entries[0].layout, LayoutContext::Root);
        assert_eq!(
            entries[1].layout,
            LayoutContext::Flow {
                direction: FlowDirection::Row
            }
        );
        assert!(matches!(
            entries[3].layout,
            LayoutContext::Absolute { offset } if offset.x == 5.0 && offset.y == 6.0
        ));
    }

    #[test]
    fn test_restart_and_clone_repeat_the_walk() {
        let roots = sample();
        let mut walker = ScenegraphWalker::new(&roots);
        let copy = walker.clone();

        let first: Vec<_> = walker.by_ref().map(|e| e.node.id.clone()).collect();
        assert!(walker.next().is_none());

        walker.restart();
        let second: Vec<_> = walker.map(|e| e.node.id.clone()).collect();
        let third: Vec<_> = copy.map(|e| e.node.id.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_subtree_walk_makes_node_root() {
        let roots = sample();
        let entries: Vec<_> = ScenegraphWalker::from_node(&roots[0].children[1]).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].layout, LayoutContext::Root);
        assert_eq!(entries[0].depth, 0);
    }

    #[test]
    fn test_hidden_nodes_still_walked() {
        let mut root = frame("r", LayoutMode::None).with_child(text("t"));
        root.children[0].visible = false;
        let roots = vec![root];
        assert_eq!(ScenegraphWalker::new(&roots).count(), 2);
    }
}
