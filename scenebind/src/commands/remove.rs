use std::path::PathBuf;

use clap::Args;
use eyre::{Result, bail};
use scenebind_manifest::BinderToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct RemoveCommand {
    /// Position of the binding (0-based, in file order)
    index: usize,

    /// Path to binder.toml
    #[arg(short, long, default_value = "binder.toml")]
    config: PathBuf,
}

impl RemoveCommand {
    pub fn run(&self) -> Result<()> {
        let mut binder_toml = BinderToml::open(&self.config).unwrap_or_exit();
        let count = binder_toml.manifest().bindings.len();

        let Some(name) = binder_toml.remove_binding(self.index).unwrap_or_exit() else {
            bail!("No binding at index {} ({} defined)", self.index, count);
        };
        binder_toml.save().unwrap_or_exit();
        println!("Removed binding '{}'", name);

        Ok(())
    }
}
