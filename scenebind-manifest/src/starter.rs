use std::path::{Path, PathBuf};

use scenebind_core::{GeneratedFile, Overwrite, escape_string_literal};

use crate::ScriptKind;

/// A starter binder.toml, written only if the file does not exist yet.
pub struct StarterManifest {
    pub file_name: PathBuf,
    pub module: String,
    pub script: String,
    pub kind: ScriptKind,
}

impl StarterManifest {
    pub fn new(
        file_name: impl Into<PathBuf>,
        module: impl Into<String>,
        script: impl Into<String>,
        kind: ScriptKind,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            module: module.into(),
            script: script.into(),
            kind,
        }
    }
}

impl GeneratedFile for StarterManifest {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.file_name)
    }

    fn overwrite(&self) -> Overwrite {
        Overwrite::IfMissing
    }

    fn render(&self) -> String {
        let root_name = if self.script.is_empty() {
            "Root"
        } else {
            self.script.as_str()
        };

        format!(
            r#"[binder]
module = "{module}"
script = "{script}"
kind = "{kind}"

[scene]
name = "{root}"
id = "root"
components = ["RectTransform"]

# [[scene.children]]
# name = "Title"
# id = "title"
# components = ["Text"]

# [[bindings]]
# name = "title"
# node = "title"
"#,
            module = escape_string_literal(&self.module),
            script = escape_string_literal(&self.script),
            kind = self.kind,
            root = escape_string_literal(root_name),
        )
    }
}
