//! Scene hierarchy model for scenebind.
//!
//! This crate owns everything the generator needs to know about the scene:
//!
//! - [`Scene`] - arena-backed node hierarchy implementing [`SceneTree`]
//! - [`TypeTag`] / [`Capability`] - components attached to nodes
//! - [`PathResolver`] - root-relative `/`-joined node paths
//! - [`BindingRegistry`] / [`Binder`] - named, typed references to nodes
//! - [`RuntimeAccessor`] - name + type lookup as performed by the generated script

mod accessor;
mod binding;
mod capability;
mod path;
mod tree;

pub use accessor::{ComponentRef, RuntimeAccessor};
pub use binding::{Binder, Binding, BindingRegistry};
pub use capability::{Capability, TypeTag};
pub use path::{PathError, PathResolver, ResolvedPath, resolve_path};
pub use tree::{NodeId, Scene, SceneError, SceneTree};
