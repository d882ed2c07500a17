use tracing::{debug, warn};

use crate::{Binder, Capability, NodeId, PathResolver, SceneTree, TypeTag};

/// A capability found on a node at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef {
    pub node: NodeId,
    pub tag: TypeTag,
}

/// Name + type lookup over the components a generated script collected.
///
/// Entries are fixed at construction. Lookups scan linearly and return the
/// first entry with a matching name whose capability satisfies the request.
#[derive(Debug, Clone, Default)]
pub struct RuntimeAccessor {
    entries: Vec<(String, ComponentRef)>,
}

impl RuntimeAccessor {
    pub fn new(entries: impl IntoIterator<Item = (String, ComponentRef)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Collect components the way the generated init method does: resolve
    /// each binding's path from the binder root, look the path up again, and
    /// keep the binding if the node found provides the bound capability.
    pub fn from_binder<T: SceneTree + ?Sized>(binder: &Binder, tree: &T) -> Self {
        let resolver = PathResolver::new(tree, binder.root);
        let mut entries = Vec::new();

        for binding in &binder.bindings {
            let Some(node) = binding.node else {
                debug!(name = %binding.name, "skipping unset binding");
                continue;
            };
            let path = match resolver.resolve(node) {
                Ok(path) => path.to_string(),
                Err(err) => {
                    debug!(name = %binding.name, %err, "skipping unresolvable binding");
                    continue;
                }
            };
            match tree.find_path(binder.root, &path) {
                Some(found) if tree.provides(found, &binding.capability) => {
                    entries.push((
                        binding.name.clone(),
                        ComponentRef {
                            node: found,
                            tag: binding.capability.clone(),
                        },
                    ));
                }
                _ => {
                    debug!(name = %binding.name, %path, "no {} at path", binding.capability);
                }
            }
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a component by name and required type tag.
    pub fn get_tag(&self, name: &str, tag: &TypeTag) -> Option<&ComponentRef> {
        let found = self
            .entries
            .iter()
            .find(|(entry, component)| entry == name && component.tag.is_assignable_to(tag))
            .map(|(_, component)| component);
        if found.is_none() {
            warn!("component {} with name {} not found", tag, name);
        }
        found
    }

    /// Look up a component by name and statically known capability type.
    pub fn get<C: Capability>(&self, name: &str) -> Option<&ComponentRef> {
        self.get_tag(name, &TypeTag::of::<C>())
    }
}
