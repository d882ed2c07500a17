use tracing::warn;

use crate::{NodeId, SceneTree, TypeTag};

/// A named reference to a node plus the capability expected on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Field identifier in the generated script and runtime lookup key.
    pub name: String,
    /// Bound node; `None` while the binding is still being edited.
    pub node: Option<NodeId>,
    pub capability: TypeTag,
}

impl Binding {
    pub fn new(name: impl Into<String>, node: NodeId, capability: impl Into<TypeTag>) -> Self {
        Self {
            name: name.into(),
            node: Some(node),
            capability: capability.into(),
        }
    }

    /// A binding that does not point at any node yet.
    pub fn unset(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node: None,
            capability: TypeTag::component(),
        }
    }

    pub fn is_set(&self) -> bool {
        self.node.is_some()
    }
}

/// Insertion-ordered list of bindings.
///
/// Names are not required to be unique; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding and return its position.
    pub fn push(&mut self, binding: Binding) -> usize {
        self.bindings.push(binding);
        self.bindings.len() - 1
    }

    /// Remove the binding at `index`, shifting later bindings down.
    pub fn remove(&mut self, index: usize) -> Option<Binding> {
        (index < self.bindings.len()).then(|| self.bindings.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Binding> {
        self.bindings.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Binding> {
        self.bindings.get_mut(index)
    }

    /// Point the binding at `index` to another node. Returns false if there
    /// is no such binding.
    pub fn set_node(&mut self, index: usize, node: Option<NodeId>) -> bool {
        match self.bindings.get_mut(index) {
            Some(binding) => {
                binding.node = node;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// First binding named `name` whose node provides its capability and
    /// whose capability satisfies `tag`.
    pub fn find<T: SceneTree + ?Sized>(
        &self,
        tree: &T,
        name: &str,
        tag: &TypeTag,
    ) -> Option<&Binding> {
        let found = self.bindings.iter().find(|binding| {
            binding.name == name
                && binding.capability.is_assignable_to(tag)
                && binding
                    .node
                    .is_some_and(|node| tree.provides(node, &binding.capability))
        });
        if found.is_none() {
            warn!("component {} with name {} not found", tag, name);
        }
        found
    }

    /// Names bound more than once, each reported once in first-seen order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (i, binding) in self.bindings.iter().enumerate() {
            let name = binding.name.as_str();
            if !duplicates.contains(&name)
                && self.bindings[i + 1..].iter().any(|b| b.name == name)
            {
                duplicates.push(name);
            }
        }
        duplicates
    }
}

impl FromIterator<Binding> for BindingRegistry {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BindingRegistry {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

/// The binding set owned by one root node, plus where its script goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binder {
    pub module_name: String,
    pub script_name: String,
    /// Node the generated script is attached to; paths are relative to it.
    pub root: NodeId,
    pub bindings: BindingRegistry,
}

impl Binder {
    pub fn new(
        module_name: impl Into<String>,
        script_name: impl Into<String>,
        root: NodeId,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            script_name: script_name.into(),
            root,
            bindings: BindingRegistry::new(),
        }
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }
}
