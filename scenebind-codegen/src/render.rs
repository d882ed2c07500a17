//! Pure rendering of binding scripts.

use scenebind_core::escape_string_literal;
use scenebind_scene::ResolvedPath;

use crate::{CodeBuilder, Template};

/// A binding ready to be rendered: field name, field type and lookup path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinding {
    pub name: String,
    pub type_name: String,
    pub path: ResolvedPath,
}

impl ResolvedBinding {
    /// `public <Type> <name>;`
    pub fn field_line(&self) -> String {
        format!("public {} {};", self.type_name, self.name)
    }

    /// `<name> = <lookup><<Type>>("<path>");`
    pub fn init_line(&self, lookup: &str) -> String {
        format!("{} = {};", self.name, self.lookup_expr(lookup))
    }

    /// `<lookup><<Type>>("<path>")`
    pub fn lookup_expr(&self, lookup: &str) -> String {
        format!(
            "{}<{}>(\"{}\")",
            lookup,
            self.type_name,
            escape_string_literal(&self.path.to_string())
        )
    }
}

/// Render a complete script from its header configuration and the ordered
/// bindings. Output depends only on the arguments.
pub fn render_script(
    template: &Template,
    script_name: &str,
    bindings: &[ResolvedBinding],
) -> String {
    CodeBuilder::new(template.indent)
        .each(&template.imports, |b, import| {
            b.line(&format!("using {};", import))
        })
        .when(!template.imports.is_empty(), |b| b.blank())
        .block(&format!("namespace {}", template.namespace), |b| {
            b.block(
                &format!("public class {} : {}", script_name, template.base_type),
                |b| {
                    b.line(&format!("#region {}", template.region))
                        .each(bindings, |b, binding| b.line(&binding.field_line()))
                        .line("#endregion")
                        .blank()
                        .block(
                            &format!("protected override void {}()", template.init_method),
                            |b| {
                                b.each(bindings, |b, binding| {
                                    b.line(&binding.init_line(&template.lookup))
                                })
                            },
                        )
                },
            )
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenebind_scene::{Scene, resolve_path};

    fn binding(name: &str, type_name: &str, segments: &[&str]) -> ResolvedBinding {
        let mut scene = Scene::new("Root");
        let mut node = scene.root();
        for segment in segments {
            node = scene.add_child(node, *segment).unwrap();
        }
        ResolvedBinding {
            name: name.to_string(),
            type_name: type_name.to_string(),
            path: resolve_path(&scene, scene.root(), node).unwrap(),
        }
    }

    #[test]
    fn test_init_line_uses_lookup_and_path() {
        let btn = binding("btn", "Button", &["A", "B"]);
        assert_eq!(btn.init_line("Lookup"), "btn = Lookup<Button>(\"A/B\");");
        assert_eq!(btn.field_line(), "public Button btn;");
    }

    #[test]
    fn test_root_binding_uses_empty_literal() {
        let root = binding("self", "RectTransform", &[]);
        assert_eq!(
            root.init_line("transform.Find"),
            "self = transform.Find<RectTransform>(\"\");"
        );
    }

    #[test]
    fn test_path_literal_is_escaped() {
        let quoted = binding("label", "Text", &["Say \"hi\""]);
        assert_eq!(
            quoted.lookup_expr("Lookup"),
            "Lookup<Text>(\"Say \\\"hi\\\"\")"
        );
    }

    #[test]
    fn test_render_without_imports_has_no_leading_blank() {
        let template = Template {
            imports: Vec::new(),
            ..Template::gui()
        };
        let script = render_script(&template, "Empty", &[]);
        assert!(script.starts_with("namespace ProjectM.GamePlay\n{\n"));
    }

    #[test]
    fn test_render_keeps_binding_order() {
        let bindings = [
            binding("second", "Text", &["B"]),
            binding("first", "Text", &["A"]),
        ];
        let script = render_script(&Template::gui(), "Panel", &bindings);
        let second = script.find("public Text second;").unwrap();
        let first = script.find("public Text first;").unwrap();
        assert!(second < first);
    }
}
