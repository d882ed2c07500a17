use scenebind_core::validate_identifier;
use scenebind_scene::{Binder, PathError, PathResolver, SceneTree};
use tracing::instrument;

use crate::{Diagnostic, generator::module_path_problem};

/// Check a binder against its scene without generating anything.
///
/// Errors are problems that make generation fail. Warnings are bindings
/// that would be silently left out of the script or would not resolve at
/// runtime.
#[instrument(level = "debug", skip_all, fields(script = %binder.script_name))]
pub fn lint<T: SceneTree + ?Sized>(binder: &Binder, tree: &T) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if binder.module_name.trim().is_empty() {
        diagnostics.push(Diagnostic::error("module name cannot be empty").at("binder.module"));
    } else if let Some(reason) = module_path_problem(&binder.module_name) {
        diagnostics.push(
            Diagnostic::error(format!(
                "invalid module name '{}': {}",
                binder.module_name, reason
            ))
            .at("binder.module"),
        );
    }
    if binder.script_name.trim().is_empty() {
        diagnostics.push(Diagnostic::error("script name cannot be empty").at("binder.script"));
    } else if let Some(reason) = validate_identifier(&binder.script_name) {
        diagnostics.push(
            Diagnostic::error(format!(
                "invalid script name '{}': {}",
                binder.script_name, reason
            ))
            .at("binder.script"),
        );
    }

    let resolver = PathResolver::new(tree, binder.root);
    for (index, binding) in binder.bindings.iter().enumerate() {
        let location = format!("bindings[{}]", index);

        if let Some(reason) = validate_identifier(&binding.name) {
            diagnostics.push(
                Diagnostic::error(format!("invalid binding name '{}': {}", binding.name, reason))
                    .at(location),
            );
            continue;
        }

        let Some(node) = binding.node else {
            diagnostics.push(
                Diagnostic::warning(format!("binding '{}' has no node", binding.name))
                    .at(location),
            );
            continue;
        };

        if let Some(reason) = validate_identifier(binding.capability.name()) {
            diagnostics.push(
                Diagnostic::error(format!(
                    "invalid component type '{}' for binding '{}': {}",
                    binding.capability, binding.name, reason
                ))
                .at(location),
            );
            continue;
        }

        match resolver.resolve(node) {
            Ok(_) => {}
            Err(PathError::NotAnAncestor { .. }) => {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "binding '{}' points outside the binder root",
                        binding.name
                    ))
                    .at(location),
                );
                continue;
            }
            Err(PathError::UnknownNode(_)) => {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "binding '{}' points at a removed node",
                        binding.name
                    ))
                    .at(location),
                );
                continue;
            }
        }

        if !tree.provides(node, &binding.capability) {
            let node_name = tree.name(node).unwrap_or_default();
            diagnostics.push(
                Diagnostic::warning(format!(
                    "node '{}' has no '{}' component, binding '{}' will be null at runtime",
                    node_name, binding.capability, binding.name
                ))
                .at(location),
            );
        }
    }

    for name in binder.bindings.duplicate_names() {
        diagnostics.push(Diagnostic::warning(format!(
            "binding name '{}' is used more than once, lookups return the first",
            name
        )));
    }

    if binder.bindings.is_empty() {
        diagnostics.push(Diagnostic::info("binder has no bindings"));
    }

    diagnostics
}
