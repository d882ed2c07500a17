use std::fmt;

use generational_arena::{Arena, Index};
use thiserror::Error;
use tracing::instrument;

use crate::TypeTag;

/// Handle to a node in a [`Scene`].
///
/// Handles stay valid until the node is removed. A handle to a removed node
/// is never reused for a node inserted later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}v{}", slot, generation)
    }
}

/// Read access to a node hierarchy.
///
/// Path resolution, binding lookup and the runtime accessor only see the
/// scene through this trait.
pub trait SceneTree {
    /// Whether the handle refers to a live node.
    fn contains(&self, node: NodeId) -> bool;

    /// Display name of a node. Names are not unique among siblings.
    fn name(&self, node: NodeId) -> Option<&str>;

    /// Parent of a node, `None` for the top of the hierarchy.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Children in order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Capabilities attached to a node.
    fn capabilities(&self, node: NodeId) -> &[TypeTag];

    fn has_capability(&self, node: NodeId, tag: &TypeTag) -> bool {
        self.capabilities(node).contains(tag)
    }

    /// Whether some capability on the node can stand in for `tag`. Any
    /// attached capability satisfies `Component`.
    fn provides(&self, node: NodeId, tag: &TypeTag) -> bool {
        self.capabilities(node)
            .iter()
            .any(|attached| attached.is_assignable_to(tag))
    }

    /// First child of `parent` named `name`.
    fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.name(child) == Some(name))
    }

    /// Follow a `/`-separated path downwards from `from`, taking the first
    /// matching child at each step. The empty path is `from` itself.
    fn find_path(&self, from: NodeId, path: &str) -> Option<NodeId> {
        if !self.contains(from) {
            return None;
        }
        if path.is_empty() {
            return Some(from);
        }
        path.split('/')
            .try_fold(from, |node, segment| self.find_child(node, segment))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {0} is not part of the scene")]
    UnknownNode(NodeId),

    #[error("cannot move node {node} under its own descendant {parent}")]
    CycleDetected { node: NodeId, parent: NodeId },

    #[error("the scene root cannot be moved or removed")]
    RootNode,
}

#[derive(Debug, Clone)]
struct SceneNode {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    capabilities: Vec<TypeTag>,
}

/// Arena-backed scene hierarchy with a single root.
#[derive(Debug, Clone)]
pub struct Scene {
    arena: Arena<SceneNode>,
    root: NodeId,
}

impl Scene {
    /// Create a scene containing only a root node.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(SceneNode {
            name: root_name.into(),
            parent: None,
            children: Vec::new(),
            capabilities: Vec::new(),
        }));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false: a scene has at least its root.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self, name))]
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let child = NodeId(self.arena.insert(SceneNode {
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            capabilities: Vec::new(),
        }));
        self.node_mut(parent)?.children.push(child);
        Ok(child)
    }

    /// Attach a capability to a node.
    pub fn attach(&mut self, node: NodeId, tag: impl Into<TypeTag>) -> Result<(), SceneError> {
        self.node_mut(node)?.capabilities.push(tag.into());
        Ok(())
    }

    pub fn rename(&mut self, node: NodeId, name: impl Into<String>) -> Result<(), SceneError> {
        self.node_mut(node)?.name = name.into();
        Ok(())
    }

    /// Move `node` (with its subtree) to the end of `new_parent`'s children.
    #[instrument(level = "trace", skip(self))]
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::RootNode);
        }
        if !self.contains(node) {
            return Err(SceneError::UnknownNode(node));
        }
        if !self.contains(new_parent) {
            return Err(SceneError::UnknownNode(new_parent));
        }

        let mut current = Some(new_parent);
        while let Some(ancestor) = current {
            if ancestor == node {
                return Err(SceneError::CycleDetected {
                    node,
                    parent: new_parent,
                });
            }
            current = self.parent(ancestor);
        }

        self.detach(node)?;
        self.node_mut(node)?.parent = Some(new_parent);
        self.node_mut(new_parent)?.children.push(node);
        Ok(())
    }

    /// Remove a node and its whole subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, node: NodeId) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::RootNode);
        }
        if !self.contains(node) {
            return Err(SceneError::UnknownNode(node));
        }

        self.detach(node)?;
        for doomed in self.descendants(node) {
            self.arena.remove(doomed.0);
        }
        Ok(())
    }

    /// `node` and everything below it, in pre-order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        order
    }

    fn detach(&mut self, node: NodeId) -> Result<(), SceneError> {
        if let Some(parent) = self.parent(node) {
            self.node_mut(parent)?.children.retain(|&child| child != node);
        }
        Ok(())
    }

    fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.arena.get(node.0)
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut SceneNode, SceneError> {
        self.arena
            .get_mut(node.0)
            .ok_or(SceneError::UnknownNode(node))
    }
}

impl SceneTree for Scene {
    fn contains(&self, node: NodeId) -> bool {
        self.arena.contains(node.0)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    fn capabilities(&self, node: NodeId) -> &[TypeTag] {
        self.node(node)
            .map(|n| n.capabilities.as_slice())
            .unwrap_or_default()
    }
}
