use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

use eyre::{Result, WrapErr};
use scenebind_core::{GeneratedFile, WriteResult, validate_identifier};
use scenebind_scene::{Binder, PathError, PathResolver, SceneTree};
use tracing::{debug, error, info, instrument, warn};

use crate::{GenerateError, RequiredName, ResolvedBinding, Template, render_script};

/// Why a binding was left out of the generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The binding does not point at a node.
    Unset,
    /// The node is not below the binder root.
    NotAnAncestor,
    /// The node has been removed from the scene.
    UnknownNode,
    /// The binding name cannot be used as a field name.
    InvalidName(&'static str),
    /// The capability name cannot be used as a C# type.
    InvalidType(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("binding has no node"),
            Self::NotAnAncestor => f.write_str("node is not below the binder root"),
            Self::UnknownNode => f.write_str("node is no longer in the scene"),
            Self::InvalidName(reason) => f.write_str(reason),
            Self::InvalidType(reason) => write!(f, "component type {}", reason),
        }
    }
}

/// A binding omitted from generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBinding {
    /// Position in the registry
    pub index: usize,
    pub name: String,
    pub reason: SkipReason,
}

/// Bindings split into renderable ones and skipped ones, both in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub resolved: Vec<ResolvedBinding>,
    pub skipped: Vec<SkippedBinding>,
}

/// A rendered script and where it belongs.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub module_name: String,
    pub script_name: String,
    pub content: String,
    pub skipped: Vec<SkippedBinding>,
    output_dir: PathBuf,
    extension: String,
}

impl Artifact {
    /// Path relative to the project directory.
    pub fn relative_path(&self) -> PathBuf {
        self.path(Path::new(""))
    }
}

impl GeneratedFile for Artifact {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.output_dir)
            .join(&self.module_name)
            .join(format!("{}.{}", self.script_name, self.extension))
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}

/// Result of writing a script to disk.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub path: PathBuf,
    pub write: WriteResult,
    /// Number of bindings rendered as fields
    pub fields: usize,
    pub skipped: Vec<SkippedBinding>,
}

/// Renders a binder's script against a scene.
pub struct Generator<'a, T: SceneTree + ?Sized> {
    tree: &'a T,
    template: &'a Template,
}

impl<'a, T: SceneTree + ?Sized> Generator<'a, T> {
    pub fn new(tree: &'a T, template: &'a Template) -> Self {
        Self { tree, template }
    }

    /// Resolve every binding's path relative to the binder root.
    ///
    /// Bindings that cannot be rendered are skipped rather than failing the
    /// whole script.
    #[instrument(level = "debug", skip_all, fields(script = %binder.script_name))]
    pub fn resolve(&self, binder: &Binder) -> Resolution {
        let resolver = PathResolver::new(self.tree, binder.root);
        let mut resolution = Resolution::default();

        for (index, binding) in binder.bindings.iter().enumerate() {
            let outcome = match (validate_identifier(&binding.name), binding.node) {
                (Some(reason), _) => Err(SkipReason::InvalidName(reason)),
                (None, None) => Err(SkipReason::Unset),
                (None, Some(node)) => match validate_identifier(binding.capability.name()) {
                    Some(reason) => Err(SkipReason::InvalidType(reason)),
                    None => resolver.resolve(node).map_err(|err| match err {
                        PathError::NotAnAncestor { .. } => SkipReason::NotAnAncestor,
                        PathError::UnknownNode(_) => SkipReason::UnknownNode,
                    }),
                },
            };

            match outcome {
                Ok(path) => {
                    debug!(name = %binding.name, %path, "resolved binding");
                    resolution.resolved.push(ResolvedBinding {
                        name: binding.name.clone(),
                        type_name: binding.capability.name().to_string(),
                        path,
                    });
                }
                Err(reason) => {
                    if reason == SkipReason::Unset {
                        debug!(index, name = %binding.name, "skipping unset binding");
                    } else {
                        warn!(index, name = %binding.name, "skipping binding: {}", reason);
                    }
                    resolution.skipped.push(SkippedBinding {
                        index,
                        name: binding.name.clone(),
                        reason,
                    });
                }
            }
        }

        resolution
    }

    /// Render the binder's script without touching the filesystem.
    pub fn render(&self, binder: &Binder) -> std::result::Result<Artifact, GenerateError> {
        if let Err(err) = check_names(binder) {
            error!("{}", err);
            return Err(err);
        }

        let resolution = self.resolve(binder);
        let content = render_script(self.template, &binder.script_name, &resolution.resolved);

        Ok(Artifact {
            module_name: binder.module_name.clone(),
            script_name: binder.script_name.clone(),
            content,
            skipped: resolution.skipped,
            output_dir: self.template.output_dir.clone(),
            extension: self.template.extension.clone(),
        })
    }

    /// Render the script and write it under `base`, replacing any previous
    /// version of the file.
    #[instrument(level = "debug", skip_all, fields(base = %base.display()))]
    pub fn generate(&self, binder: &Binder, base: &Path) -> Result<GenerateResult> {
        let artifact = self.render(binder)?;
        let path = artifact.path(base);
        let write = artifact
            .write(base)
            .wrap_err_with(|| format!("failed to write script '{}'", path.display()))?;
        info!("script generated at: {}", path.display());

        let skipped = artifact.skipped;
        Ok(GenerateResult {
            fields: binder.bindings.len() - skipped.len(),
            path,
            write,
            skipped,
        })
    }

    /// One `<Type> <name> = <lookup><<Type>>("<path>");` line per renderable
    /// binding, for inspecting references without generating.
    pub fn reference_lines(&self, binder: &Binder) -> Vec<String> {
        self.resolve(binder)
            .resolved
            .iter()
            .map(|binding| {
                let line = format!(
                    "{} {} = {};",
                    binding.type_name,
                    binding.name,
                    binding.lookup_expr(&self.template.lookup)
                );
                debug!("{}", line);
                line
            })
            .collect()
    }
}

/// Problem with a module name used as a directory below the output dir.
/// Nested modules such as `Shop/Bag` are allowed.
pub(crate) fn module_path_problem(module: &str) -> Option<&'static str> {
    let path = Path::new(module);
    if path.has_root() || path.is_absolute() {
        return Some("module must be a relative path");
    }
    if !path
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return Some("module must not contain '.' or '..' segments");
    }
    None
}

fn check_names(binder: &Binder) -> std::result::Result<(), GenerateError> {
    if binder.module_name.trim().is_empty() {
        return Err(GenerateError::MissingRequiredName(RequiredName::Module));
    }
    if let Some(reason) = module_path_problem(&binder.module_name) {
        return Err(GenerateError::InvalidModuleName {
            name: binder.module_name.clone(),
            reason,
        });
    }
    if binder.script_name.trim().is_empty() {
        return Err(GenerateError::MissingRequiredName(RequiredName::Script));
    }
    if let Some(reason) = validate_identifier(&binder.script_name) {
        return Err(GenerateError::InvalidScriptName {
            name: binder.script_name.clone(),
            reason,
        });
    }
    Ok(())
}
