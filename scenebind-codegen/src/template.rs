//! Fixed header configuration of generated scripts.

use std::path::{Path, PathBuf};

use scenebind_manifest::{Manifest, ScriptKind, TemplateOverrides};

use crate::Indent;

/// Everything about a generated script that does not come from bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Namespaces emitted as `using` lines, in order
    pub imports: Vec<String>,
    pub namespace: String,
    /// Class the generated script derives from
    pub base_type: String,
    /// Label of the `#region` wrapping the field declarations
    pub region: String,
    /// Name of the overridden initialization method
    pub init_method: String,
    /// Generic lookup called as `<lookup><Type>("path")`
    pub lookup: String,
    /// Directory that module directories are created in
    pub output_dir: PathBuf,
    /// File extension without the dot
    pub extension: String,
    pub indent: Indent,
}

impl Template {
    /// Preset for UI panel scripts.
    pub fn gui() -> Self {
        Self {
            imports: ["FpUI", "ProjectM.Core.UI", "UnityEngine", "UnityEngine.UI"]
                .map(String::from)
                .to_vec(),
            namespace: "ProjectM.GamePlay".to_string(),
            base_type: "BaseGUI".to_string(),
            region: "UI Components".to_string(),
            init_method: "FindComponents".to_string(),
            lookup: "transform.Find".to_string(),
            output_dir: PathBuf::from("Assets/Scripts/GamePlay/UI/GUI"),
            extension: "cs".to_string(),
            indent: Indent::CSHARP,
        }
    }

    /// Items are emitted exactly like panels. A project with its own item
    /// base class sets it through `[template] base_type`.
    pub fn for_kind(kind: ScriptKind) -> Self {
        match kind {
            ScriptKind::Gui | ScriptKind::Item => Self::gui(),
        }
    }

    /// Preset for the manifest's kind with its `[template]` overrides applied.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::for_kind(manifest.kind()).with_overrides(&manifest.template)
    }

    pub fn with_overrides(mut self, overrides: &TemplateOverrides) -> Self {
        if let Some(imports) = &overrides.imports {
            self.imports = imports.clone();
        }
        if let Some(namespace) = &overrides.namespace {
            self.namespace = namespace.clone();
        }
        if let Some(base_type) = &overrides.base_type {
            self.base_type = base_type.clone();
        }
        if let Some(region) = &overrides.region {
            self.region = region.clone();
        }
        if let Some(init_method) = &overrides.init_method {
            self.init_method = init_method.clone();
        }
        if let Some(lookup) = &overrides.lookup {
            self.lookup = lookup.clone();
        }
        if let Some(output_dir) = &overrides.output_dir {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Some(extension) = &overrides.extension {
            self.extension = extension.trim_start_matches('.').to_string();
        }
        self
    }

    /// `<base>/<output_dir>/<module>/<script>.<extension>`
    pub fn script_path(&self, base: &Path, module: &str, script: &str) -> PathBuf {
        base.join(&self.output_dir)
            .join(module)
            .join(format!("{}.{}", script, self.extension))
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::gui()
    }
}
