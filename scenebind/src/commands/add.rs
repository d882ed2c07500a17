use std::path::PathBuf;

use clap::Args;
use eyre::{Result, bail};
use scenebind_manifest::BinderToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct AddCommand {
    /// Field name of the binding
    name: String,

    /// Id of the bound node; omit to add an unset binding
    #[arg(short, long)]
    node: Option<String>,

    /// Component type to bind (defaults to the node's first component)
    #[arg(long)]
    component: Option<String>,

    /// Path to binder.toml
    #[arg(short, long, default_value = "binder.toml")]
    config: PathBuf,
}

impl AddCommand {
    pub fn run(&self) -> Result<()> {
        let mut binder_toml = BinderToml::open(&self.config).unwrap_or_exit();

        if binder_toml.manifest().has_binding(&self.name) {
            bail!("Binding '{}' already exists", self.name);
        }

        let index = binder_toml
            .add_binding(&self.name, self.node.as_deref(), self.component.as_deref())
            .unwrap_or_exit();
        binder_toml.save().unwrap_or_exit();

        match &self.node {
            Some(node) => println!("Added binding #{} '{}' -> {}", index, self.name, node),
            None => println!("Added unset binding #{} '{}'", index, self.name),
        }

        Ok(())
    }
}
