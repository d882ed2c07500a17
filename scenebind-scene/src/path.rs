//! Root-relative node paths.

use std::fmt;

use thiserror::Error;
use tracing::instrument;

use crate::{NodeId, SceneTree};

/// Node names from just below a root down to (and including) a target.
///
/// Displays as the names joined with `/`; the root itself is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolvedPath {
    segments: Vec<String>,
}

impl ResolvedPath {
    /// The path of a root relative to itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments, i.e. depth of the target below the root.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("node {0} is not part of the scene")]
    UnknownNode(NodeId),

    #[error("node {target} is not below root {root}")]
    NotAnAncestor { root: NodeId, target: NodeId },
}

/// Resolves paths of nodes relative to a fixed root.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a, T: SceneTree + ?Sized> {
    tree: &'a T,
    root: NodeId,
}

impl<'a, T: SceneTree + ?Sized> PathResolver<'a, T> {
    pub fn new(tree: &'a T, root: NodeId) -> Self {
        Self { tree, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn resolve(&self, target: NodeId) -> Result<ResolvedPath, PathError> {
        resolve_path(self.tree, self.root, target)
    }
}

/// Compute the path from `root` down to `target`.
///
/// Walks the parent chain of `target` iteratively, so depth is only bounded
/// by memory. Sibling names are not checked for uniqueness: with duplicate
/// names the path is ambiguous and a later lookup takes the first match.
#[instrument(level = "trace", skip(tree))]
pub fn resolve_path<T: SceneTree + ?Sized>(
    tree: &T,
    root: NodeId,
    target: NodeId,
) -> Result<ResolvedPath, PathError> {
    if !tree.contains(root) {
        return Err(PathError::UnknownNode(root));
    }
    if target == root {
        return Ok(ResolvedPath::root());
    }

    let mut segments = Vec::new();
    let mut current = Some(target);
    while let Some(node) = current {
        if node == root {
            segments.reverse();
            return Ok(ResolvedPath { segments });
        }
        let name = tree.name(node).ok_or(PathError::UnknownNode(node))?;
        segments.push(name.to_owned());
        current = tree.parent(node);
    }

    Err(PathError::NotAnAncestor { root, target })
}
