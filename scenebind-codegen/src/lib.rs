//! C# script generation for scenebind binders.
//!
//! A [`Generator`] resolves each binding of a [`Binder`](scenebind_scene::Binder)
//! to a path relative to the binder root and renders one script per binder
//! with [`render_script`]. [`lint`] reports the same problems without
//! generating anything.

mod builder;
mod diagnostic;
mod error;
mod generator;
mod lint;
mod render;
mod template;

pub use builder::{CodeBuilder, Indent};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{GenerateError, RequiredName};
pub use generator::{
    Artifact, GenerateResult, Generator, Resolution, SkipReason, SkippedBinding,
};
pub use lint::lint;
pub use render::{ResolvedBinding, render_script};
pub use template::Template;
