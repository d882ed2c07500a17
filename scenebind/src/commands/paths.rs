use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use scenebind_codegen::{Generator, Template};
use scenebind_manifest::BinderToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct PathsCommand {
    /// Path to binder.toml
    #[arg(short, long, default_value = "binder.toml")]
    pub config: PathBuf,
}

impl PathsCommand {
    pub fn run(&self) -> Result<()> {
        let binder_toml = BinderToml::open(&self.config).unwrap_or_exit();
        let manifest = binder_toml.manifest();
        let template = Template::from_manifest(manifest);

        let generator = Generator::new(manifest.scene(), &template);
        for line in generator.reference_lines(&manifest.binder()) {
            println!("{}", line);
        }

        Ok(())
    }
}
