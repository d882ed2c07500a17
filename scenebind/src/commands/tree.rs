use std::{collections::HashMap, path::PathBuf};

use clap::Args;
use eyre::Result;
use scenebind_manifest::{BinderToml, Manifest};
use scenebind_scene::{Binder, NodeId, Scene, SceneTree};
use termtree::Tree;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct TreeCommand {
    /// Path to binder.toml
    #[arg(short, long, default_value = "binder.toml")]
    pub config: PathBuf,
}

impl TreeCommand {
    pub fn run(&self) -> Result<()> {
        let binder_toml = BinderToml::open(&self.config).unwrap_or_exit();
        let manifest = binder_toml.manifest();
        let binder = manifest.binder();
        let scene = manifest.scene();

        let tree = build_tree(scene, scene.root(), |node| label(manifest, &binder, node));
        print!("{}", tree);
        Ok(())
    }
}

/// Assemble the display tree bottom-up from a pre-order listing, so scene
/// depth never turns into call depth.
fn build_tree(scene: &Scene, top: NodeId, label: impl Fn(NodeId) -> String) -> Tree<String> {
    let order = scene.descendants(top);
    let mut built: HashMap<NodeId, Tree<String>> = HashMap::with_capacity(order.len());

    for &node in order.iter().rev() {
        let leaves: Vec<_> = scene
            .children(node)
            .iter()
            .filter_map(|child| built.remove(child))
            .collect();
        built.insert(node, Tree::new(label(node)).with_leaves(leaves));
    }

    built
        .remove(&top)
        .unwrap_or_else(|| Tree::new(label(top)))
}

/// `Name #id [Components] * <- bindings`, with `*` marking the binder root.
fn label(manifest: &Manifest, binder: &Binder, node: NodeId) -> String {
    let scene = manifest.scene();
    let mut label = scene.name(node).unwrap_or_default().to_string();

    if let Some(id) = manifest.node_id(node) {
        label.push_str(&format!(" #{}", id));
    }

    let components = scene.capabilities(node);
    if !components.is_empty() {
        let names: Vec<_> = components.iter().map(|c| c.name()).collect();
        label.push_str(&format!(" [{}]", names.join(", ")));
    }

    if node == binder.root {
        label.push_str(" *");
    }

    let bound: Vec<_> = binder
        .bindings
        .iter()
        .filter(|b| b.node == Some(node))
        .map(|b| b.name.as_str())
        .collect();
    if !bound.is_empty() {
        label.push_str(&format!(" <- {}", bound.join(", ")));
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_marks_root_and_bindings() {
        let src = r#"
[binder]
module = "Shop"
script = "ShopPanel"

[scene]
name = "ShopPanel"

[[scene.children]]
name = "Buy"
id = "buy"
components = ["Image", "Button"]

[[bindings]]
name = "buyButton"
node = "buy"
"#;
        let manifest: Manifest = src.parse().unwrap();
        let binder = manifest.binder();
        let scene = manifest.scene();
        let tree = build_tree(scene, scene.root(), |node| label(&manifest, &binder, node));

        assert_eq!(
            tree.to_string(),
            "ShopPanel *\n└── Buy #buy [Image, Button] <- buyButton\n"
        );
    }

    #[test]
    fn test_children_keep_scene_order() {
        let mut scene = Scene::new("Root");
        let a = scene.add_child(scene.root(), "A").unwrap();
        scene.add_child(a, "A1").unwrap();
        scene.add_child(a, "A2").unwrap();
        scene.add_child(scene.root(), "B").unwrap();

        let tree = build_tree(&scene, scene.root(), |node| {
            scene.name(node).unwrap_or_default().to_string()
        });
        assert_eq!(
            tree.to_string(),
            "Root\n├── A\n│   ├── A1\n│   └── A2\n└── B\n"
        );
    }

    #[test]
    fn test_deep_chain_builds_without_recursion() {
        const DEPTH: usize = 10_000;
        let mut scene = Scene::new("N0");
        let mut node = scene.root();
        for i in 1..=DEPTH {
            node = scene.add_child(node, format!("N{}", i)).unwrap();
        }

        let tree = build_tree(&scene, scene.root(), |node| {
            scene.name(node).unwrap_or_default().to_string()
        });

        // Walk down by taking leaves so each level is dropped on its own.
        let mut current = tree;
        let mut depth = 0;
        while let Some(next) = current.leaves.pop() {
            assert!(current.leaves.is_empty());
            current = next;
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
        assert_eq!(current.root, format!("N{}", DEPTH));
    }
}
