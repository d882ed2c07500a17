use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use scenebind_scene::{Binder, Binding, BindingRegistry, NodeId, Scene, SceneTree, TypeTag};
use serde::Deserialize;

use crate::{Error, Result, ScriptKind, validate::ParseContext};

/// The `[binder]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinderConfig {
    /// Module directory of the generated script. May be empty while editing.
    #[serde(default)]
    pub module: String,
    /// Class and file name of the generated script. May be empty while editing.
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub kind: ScriptKind,
    /// Id of the node the script is attached to (defaults to the scene root)
    pub root: Option<String>,
}

/// The optional `[template]` table overriding the kind's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateOverrides {
    pub imports: Option<Vec<String>>,
    pub namespace: Option<String>,
    pub base_type: Option<String>,
    pub region: Option<String>,
    pub init_method: Option<String>,
    pub lookup: Option<String>,
    pub output_dir: Option<String>,
    pub extension: Option<String>,
}

/// A node of the `[scene]` hierarchy.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDef {
    pub name: String,
    /// Stable id bindings refer to
    pub id: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub children: Vec<NodeDef>,
}

/// An entry of the `[[bindings]]` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingDef {
    pub name: String,
    /// Node id; absent while the binding is unset
    pub node: Option<String>,
    /// Component type; defaults to the node's first component
    pub component: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    binder: BinderConfig,
    #[serde(default)]
    template: TemplateOverrides,
    scene: NodeDef,
    #[serde(default)]
    bindings: Vec<BindingDef>,
}

/// A parsed and validated binder.toml.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub binder: BinderConfig,
    pub template: TemplateOverrides,
    pub bindings: Vec<BindingDef>,
    scene: Scene,
    node_ids: IndexMap<String, NodeId>,
    root: NodeId,
    registry: BindingRegistry,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "binder.toml")
    }
}

impl Manifest {
    /// Parse a binder.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a binder.toml from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let raw: RawManifest =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        let ctx = ParseContext::new(content, filename);

        let (scene, node_ids) = build_scene(&raw.scene, &ctx)?;

        let root = match &raw.binder.root {
            Some(id) => *node_ids.get(id).ok_or_else(|| {
                Box::new(Error::UnknownRoot {
                    src: ctx.named_source(),
                    span: ctx.find_span(id),
                    id: id.clone(),
                })
            })?,
            None => scene.root(),
        };

        let registry = raw
            .bindings
            .iter()
            .map(|def| build_binding(def, &scene, &node_ids, &ctx))
            .collect::<Result<BindingRegistry>>()?;

        Ok(Self {
            binder: raw.binder,
            template: raw.template,
            bindings: raw.bindings,
            scene,
            node_ids,
            root,
            registry,
        })
    }

    /// The scene hierarchy described by `[scene]`.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Node the binder is attached to.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self) -> ScriptKind {
        self.binder.kind
    }

    /// Look up a node by its manifest id.
    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.node_ids.get(id).copied()
    }

    /// Manifest id of a node, if it has one.
    pub fn node_id(&self, node: NodeId) -> Option<&str> {
        self.node_ids
            .iter()
            .find(|(_, n)| **n == node)
            .map(|(id, _)| id.as_str())
    }

    /// Node ids in declaration order.
    pub fn node_ids(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.node_ids.iter().map(|(id, node)| (id.as_str(), *node))
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.bindings.iter().any(|b| b.name == name)
    }

    /// The binder context for generation and lookup.
    pub fn binder(&self) -> Binder {
        Binder {
            module_name: self.binder.module.clone(),
            script_name: self.binder.script.clone(),
            root: self.root,
            bindings: self.registry.clone(),
        }
    }
}

fn build_scene(
    def: &NodeDef,
    ctx: &ParseContext<'_>,
) -> Result<(Scene, IndexMap<String, NodeId>)> {
    ctx.validate_node_name(&def.name)?;
    let mut scene = Scene::new(def.name.clone());
    let mut node_ids = IndexMap::new();

    let root = scene.root();
    register_node(&mut scene, &mut node_ids, def, root, ctx)?;

    // Reversed so siblings are created in declaration order.
    let mut stack: Vec<(&NodeDef, NodeId)> =
        def.children.iter().rev().map(|child| (child, root)).collect();

    while let Some((node_def, parent)) = stack.pop() {
        ctx.validate_node_name(&node_def.name)?;
        let node = scene
            .add_child(parent, node_def.name.clone())
            .map_err(|_| scene_error(ctx, &node_def.name))?;
        register_node(&mut scene, &mut node_ids, node_def, node, ctx)?;
        stack.extend(node_def.children.iter().rev().map(|child| (child, node)));
    }

    Ok((scene, node_ids))
}

/// Record a node's id and attach its components.
fn register_node(
    scene: &mut Scene,
    node_ids: &mut IndexMap<String, NodeId>,
    def: &NodeDef,
    node: NodeId,
    ctx: &ParseContext<'_>,
) -> Result<()> {
    if let Some(id) = &def.id {
        if node_ids.insert(id.clone(), node).is_some() {
            return Err(Box::new(Error::DuplicateNodeId {
                src: ctx.named_source(),
                first_span: ctx.find_span(id),
                second_span: ctx.find_second_span(id),
                id: id.clone(),
            }));
        }
    }

    for component in &def.components {
        ctx.validate_name(component, &format!("component on node '{}'", def.name))?;
        scene
            .attach(node, component.as_str())
            .map_err(|_| scene_error(ctx, &def.name))?;
    }
    Ok(())
}

// Parents on the stack are always live, so this only guards the arena API.
fn scene_error(ctx: &ParseContext<'_>, name: &str) -> Box<Error> {
    Box::new(Error::InvalidNodeName {
        src: ctx.named_source(),
        span: ctx.find_span(name),
        name: name.to_string(),
        reason: "node could not be added to the scene".to_string(),
    })
}

fn build_binding(
    def: &BindingDef,
    scene: &Scene,
    node_ids: &IndexMap<String, NodeId>,
    ctx: &ParseContext<'_>,
) -> Result<Binding> {
    ctx.validate_name(&def.name, "binding")?;

    let Some(id) = &def.node else {
        let mut binding = Binding::unset(def.name.clone());
        if let Some(component) = &def.component {
            ctx.validate_name(component, &format!("component of binding '{}'", def.name))?;
            binding.capability = TypeTag::new(component.clone());
        }
        return Ok(binding);
    };

    let node = *node_ids.get(id).ok_or_else(|| {
        Box::new(Error::UnknownNode {
            src: ctx.named_source(),
            span: ctx.find_span(id),
            id: id.clone(),
            binding: def.name.clone(),
        })
    })?;
    let attached = scene.capabilities(node);
    let node_name = scene.name(node).unwrap_or(id.as_str()).to_string();

    let capability = match &def.component {
        Some(component) => {
            let tag = TypeTag::new(component.clone());
            if !attached.contains(&tag) {
                return Err(Box::new(Error::MissingComponent {
                    src: ctx.named_source(),
                    span: ctx.find_span(component),
                    binding: def.name.clone(),
                    node: node_name,
                    component: component.clone(),
                    available: available_list(attached),
                }));
            }
            tag
        }
        None => attached.first().cloned().ok_or_else(|| {
            Box::new(Error::NoComponents {
                src: ctx.named_source(),
                span: ctx.find_span(id),
                binding: def.name.clone(),
                node: node_name.clone(),
            })
        })?,
    };

    Ok(Binding::new(def.name.clone(), node, capability))
}

fn available_list(attached: &[TypeTag]) -> String {
    if attached.is_empty() {
        "(none)".to_string()
    } else {
        attached
            .iter()
            .map(TypeTag::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use scenebind_scene::resolve_path;

    use super::*;

    const SHOP: &str = r#"
[binder]
module = "Shop"
script = "ShopPanel"

[scene]
name = "ShopPanel"
id = "panel"
components = ["RectTransform"]

[[scene.children]]
name = "Header"

[[scene.children.children]]
name = "Title"
id = "title"
components = ["Text"]

[[scene.children]]
name = "Buy"
id = "buy"
components = ["Image", "Button"]

[[bindings]]
name = "title"
node = "title"

[[bindings]]
name = "buyButton"
node = "buy"
component = "Button"

[[bindings]]
name = "pending"
"#;

    #[test]
    fn test_parse_scene_and_bindings() {
        let manifest: Manifest = SHOP.parse().unwrap();
        let scene = manifest.scene();

        assert_eq!(scene.len(), 4);
        assert_eq!(manifest.root(), scene.root());
        assert_eq!(manifest.kind(), ScriptKind::Gui);

        let title = manifest.node("title").unwrap();
        assert_eq!(
            resolve_path(scene, manifest.root(), title)
                .unwrap()
                .to_string(),
            "Header/Title"
        );
        assert_eq!(manifest.node_id(title), Some("title"));

        let binder = manifest.binder();
        assert_eq!(binder.module_name, "Shop");
        assert_eq!(binder.script_name, "ShopPanel");
        assert_eq!(binder.bindings.len(), 3);

        let title_binding = binder.bindings.get(0).unwrap();
        assert_eq!(title_binding.capability, TypeTag::new("Text"));
        let buy = binder.bindings.get(1).unwrap();
        assert_eq!(buy.capability, TypeTag::new("Button"));
        assert!(!binder.bindings.get(2).unwrap().is_set());
    }

    #[test]
    fn test_children_keep_declaration_order() {
        let manifest: Manifest = SHOP.parse().unwrap();
        let scene = manifest.scene();
        let names: Vec<_> = scene
            .children(scene.root())
            .iter()
            .map(|&c| scene.name(c).unwrap())
            .collect();
        assert_eq!(names, ["Header", "Buy"]);
    }

    #[test]
    fn test_binder_section_is_optional() {
        let manifest: Manifest = "[scene]\nname = \"Root\"\n".parse().unwrap();
        assert!(manifest.binder.module.is_empty());
        assert!(manifest.binder().bindings.is_empty());
    }

    #[test]
    fn test_custom_root() {
        let src = SHOP.replace("script = \"ShopPanel\"", "script = \"ShopPanel\"\nroot = \"buy\"");
        let manifest: Manifest = src.parse().unwrap();
        assert_eq!(manifest.root(), manifest.node("buy").unwrap());
    }

    #[test]
    fn test_unknown_root() {
        let src = SHOP.replace("script = \"ShopPanel\"", "script = \"ShopPanel\"\nroot = \"nope\"");
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::UnknownRoot { .. }));
    }

    #[test]
    fn test_unknown_node_reference() {
        let src = SHOP.replace("node = \"buy\"", "node = \"sell\"");
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::UnknownNode { id, binding, .. } => {
                assert_eq!(id, "sell");
                assert_eq!(binding, "buyButton");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_component_must_be_attached() {
        let src = SHOP.replace("component = \"Button\"", "component = \"Toggle\"");
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::MissingComponent {
                component,
                available,
                ..
            } => {
                assert_eq!(component, "Toggle");
                assert_eq!(available, "Image, Button");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_node_without_components_needs_explicit_component() {
        let src = r#"
[scene]
name = "Root"

[[scene.children]]
name = "Empty"
id = "empty"

[[bindings]]
name = "empty"
node = "empty"
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::NoComponents { .. }));
    }

    #[test]
    fn test_duplicate_node_id() {
        let src = SHOP.replace("id = \"title\"", "id = \"buy\"");
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::DuplicateNodeId { .. }));
    }

    #[test]
    fn test_binding_name_must_be_identifier() {
        let src = SHOP.replace("name = \"buyButton\"", "name = \"buy-button\"");
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));

        let src = SHOP.replace("name = \"buyButton\"", "name = \"class\"");
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_node_name_cannot_contain_separator() {
        let src = SHOP.replace("name = \"Header\"", "name = \"Head/er\"");
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::InvalidNodeName { .. }));
    }

    #[test]
    fn test_duplicate_binding_names_are_accepted() {
        let src = SHOP.replace("name = \"pending\"", "name = \"title\"");
        let manifest: Manifest = src.parse().unwrap();
        assert_eq!(manifest.binder().bindings.duplicate_names(), ["title"]);
    }

    #[test]
    fn test_parse_error() {
        let err = "[scene\nname = 1".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_template_overrides() {
        let src = format!("{}\n[template]\nlookup = \"Lookup\"\n", SHOP);
        let manifest: Manifest = src.parse().unwrap();
        assert_eq!(manifest.template.lookup.as_deref(), Some("Lookup"));
        assert!(manifest.template.namespace.is_none());
    }
}
