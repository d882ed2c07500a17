//! `binder.toml` parsing and validation for scenebind.
//!
//! A manifest describes one binder: the scene hierarchy it lives in, the
//! node it is attached to, its bindings, and where the generated script
//! goes. Parsing validates every cross reference and reports problems as
//! [`miette`] diagnostics pointing into the source.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod edit;
mod error;
mod file;
mod kind;
mod manifest;
mod starter;
mod validate;

pub use edit::{append_binding_section, binding_section, remove_binding_section};
pub use error::{Error, Result};
pub use file::BinderToml;
pub use kind::ScriptKind;
pub use manifest::{BinderConfig, BindingDef, Manifest, NodeDef, TemplateOverrides};
pub use starter::StarterManifest;
