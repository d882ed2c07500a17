use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use scenebind_codegen::{Generator, Template};
use scenebind_manifest::BinderToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to binder.toml
    #[arg(short, long, default_value = "binder.toml")]
    pub config: PathBuf,

    /// Project directory the script path is relative to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Print the script instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let binder_toml = BinderToml::open(&self.config).unwrap_or_exit();
        let manifest = binder_toml.manifest();
        let binder = manifest.binder();
        let template = Template::from_manifest(manifest);
        let generator = Generator::new(manifest.scene(), &template);

        if self.dry_run {
            let artifact = generator.render(&binder)?;
            let path = self.output.join(artifact.relative_path());
            eprintln!("would write {}", path.display());
            print!("{}", artifact.content);
            return Ok(());
        }

        let result = generator.generate(&binder, &self.output)?;
        println!(
            "Generated {} ({} field{})",
            result.path.display(),
            result.fields,
            if result.fields == 1 { "" } else { "s" }
        );
        if !result.skipped.is_empty() {
            println!(
                "  {} binding{} skipped, run 'scenebind check' for details",
                result.skipped.len(),
                if result.skipped.len() == 1 { "" } else { "s" }
            );
        }

        Ok(())
    }
}
