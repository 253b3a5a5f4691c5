//! Search tree kept alive across turns
//!
//! Nodes live in an arena and refer to each other through [`NodeId`]s. Each
//! node stores the move that led to it, its negamax bounds, its window and the
//! children explored so far (in the order they were first searched).
//!
//! After a real move the matching child becomes the new root and the rest of
//! the tree is dropped. The surviving subtree is compacted so the arena never
//! holds unreachable nodes.

use std::ops::{Index, IndexMut};

use crate::board::{Pos, Window};
use crate::policy::{Deterministic, Policy};

/// Index of a node inside a [`NodeTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Negamax bounds of a node, from the view of the player to move there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub alpha: f64,
    pub beta: f64,
}

impl Bounds {
    /// Unbounded window `(-inf, +inf)`
    pub const FULL: Bounds = Bounds {
        alpha: f64::NEG_INFINITY,
        beta: f64::INFINITY,
    };

    #[inline]
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Collapsed bounds of a leaf
    #[inline]
    pub fn exact(value: f64) -> Self {
        Self {
            alpha: value,
            beta: value,
        }
    }

    /// Window handed to a child: negated and swapped
    #[inline]
    #[must_use]
    pub fn negated(self) -> Self {
        Self {
            alpha: -self.beta,
            beta: -self.alpha,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::FULL
    }
}

/// One explored position
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Move that led here; `None` only for the initial root
    pub mv: Option<Pos>,
    pub bounds: Bounds,
    /// Occupied-cell rectangle of this position
    pub window: Window,
    children: Vec<(Pos, NodeId)>,
}

impl Node {
    fn new(mv: Option<Pos>, window: Window) -> Self {
        Self {
            mv,
            bounds: Bounds::FULL,
            window,
            children: Vec::new(),
        }
    }

    /// Children in the order they were first explored
    #[inline]
    pub fn children(&self) -> &[(Pos, NodeId)] {
        &self.children
    }
}

/// Arena-backed tree of search nodes
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl NodeTree {
    /// Tree holding a single root for the empty board
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, Window::EMPTY)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Move that led to the current root
    #[inline]
    pub fn root_move(&self) -> Option<Pos> {
        self[self.root].mv
    }

    /// Number of nodes in the arena
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn reset_root_bounds(&mut self) {
        let root = self.root;
        self[root].bounds = Bounds::FULL;
    }

    /// Child of `id` reached by `mv`, if explored
    pub fn child(&self, id: NodeId, mv: Pos) -> Option<NodeId> {
        self[id]
            .children
            .iter()
            .find(|(p, _)| *p == mv)
            .map(|(_, c)| *c)
    }

    /// Child of `id` reached by `mv`, created on first use.
    ///
    /// A new child's window is the parent's window stretched by `mv`.
    pub fn child_or_insert(&mut self, id: NodeId, mv: Pos) -> NodeId {
        if let Some(child) = self.child(id, mv) {
            return child;
        }
        let window = self[id].window.stretched(mv);
        let child = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(Some(mv), window));
        self[id].children.push((mv, child));
        child
    }

    /// Make the root's child for `mv` the new root.
    ///
    /// The promoted node keeps its subtree but its bounds are reset. Without
    /// such a child a fresh root is created. Returns whether a subtree was
    /// reused.
    pub fn advance_root(&mut self, mv: Pos) -> bool {
        match self.child(self.root, mv) {
            Some(child) => {
                self.compact(child);
                self.reset_root_bounds();
                true
            }
            None => {
                let window = self[self.root].window.stretched(mv);
                self.nodes.clear();
                self.nodes.push(Node::new(Some(mv), window));
                self.root = NodeId(0);
                false
            }
        }
    }

    /// Best reply from `id`: the child with the lowest alpha.
    ///
    /// Children sharing the lowest alpha are told apart by `policy.pick`.
    /// Returns `None` for a node without children.
    pub fn follow(&self, id: NodeId, policy: &mut dyn Policy) -> Option<NodeId> {
        let children = &self[id].children;
        let best = children
            .iter()
            .map(|(_, c)| self[*c].bounds.alpha)
            .min_by(f64::total_cmp)?;
        let tied: Vec<NodeId> = children
            .iter()
            .filter(|(_, c)| self[*c].bounds.alpha == best)
            .map(|(_, c)| *c)
            .collect();
        let pick = policy.pick(tied.len()).min(tied.len() - 1);
        Some(tied[pick])
    }

    /// Expected continuation from the root, following first-best children.
    pub fn principal_line(&self) -> Vec<Pos> {
        let mut line = Vec::new();
        let mut node = self.root;
        while let Some(next) = self.follow(node, &mut Deterministic) {
            if let Some(mv) = self[next].mv {
                line.push(mv);
            }
            node = next;
        }
        line
    }

    /// Rebuild the arena from the subtree under `new_root` in breadth-first order.
    fn compact(&mut self, new_root: NodeId) {
        let mut order = vec![new_root];
        let mut i = 0;
        while i < order.len() {
            order.extend(self[order[i]].children.iter().map(|(_, c)| *c));
            i += 1;
        }

        let mut remap = vec![0u32; self.nodes.len()];
        for (new, old) in order.iter().enumerate() {
            remap[old.index()] = new as u32;
        }

        let mut old_nodes = std::mem::take(&mut self.nodes);
        self.nodes = order
            .iter()
            .map(|old| {
                let mut node = std::mem::take(&mut old_nodes[old.index()]);
                for (_, child) in &mut node.children {
                    *child = NodeId(remap[child.index()]);
                }
                node
            })
            .collect();
        self.root = NodeId(0);
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for NodeTree {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for NodeTree {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
