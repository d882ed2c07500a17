use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Result, bail};
use scenebind_core::{GeneratedFile, WriteResult};
use scenebind_manifest::{ScriptKind, StarterManifest};

#[derive(Args)]
pub struct InitCommand {
    /// Module directory the generated script is placed in
    #[arg(short, long)]
    pub module: String,

    /// Name of the generated script and its class
    #[arg(short, long)]
    pub script: String,

    /// Script kind: gui or item
    #[arg(short, long, default_value_t = ScriptKind::Gui)]
    pub kind: ScriptKind,

    /// Path of the binder.toml to create
    #[arg(short, long, default_value = "binder.toml")]
    pub config: PathBuf,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        if self.module.trim().is_empty() || self.script.trim().is_empty() {
            bail!("module and script names cannot be empty");
        }

        let starter = StarterManifest::new(&self.config, &self.module, &self.script, self.kind);
        match starter.write(Path::new(""))? {
            WriteResult::Written => {
                println!("Created {}", self.config.display());
                println!();
                println!("Next steps:");
                println!("  describe the scene under [scene] and add [[bindings]]");
                println!("  scenebind check --config {}", self.config.display());
            }
            WriteResult::Skipped => {
                println!("{} already exists, leaving it untouched", self.config.display());
            }
        }

        Ok(())
    }
}
