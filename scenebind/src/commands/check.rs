use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use scenebind_codegen::{Severity, lint};
use scenebind_manifest::BinderToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to binder.toml
    #[arg(short, long, default_value = "binder.toml")]
    pub config: PathBuf,

    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let binder_toml = BinderToml::open(&self.config).unwrap_or_exit();
        let manifest = binder_toml.manifest();
        let binder = manifest.binder();

        let mut diagnostics = lint(&binder, manifest.scene());
        diagnostics.sort_by_key(|d| d.severity);
        let failed = diagnostics.iter().any(|d| d.severity.is_error());

        if self.json {
            let json = serde_json::to_string_pretty(&diagnostics)
                .wrap_err("Failed to serialize diagnostics")?;
            println!("{}", json);
        } else {
            for diag in &diagnostics {
                let location = diag
                    .location
                    .as_deref()
                    .map(|loc| format!("\n  --> {}", loc))
                    .unwrap_or_default();
                match diag.severity {
                    Severity::Info => println!("{}: {}{}", diag.severity, diag.message, location),
                    _ => eprintln!("{}: {}{}", diag.severity, diag.message, location),
                }
            }
        }

        if failed {
            std::process::exit(1);
        }
        if self.json {
            return Ok(());
        }

        if !diagnostics.is_empty() {
            println!();
        }
        println!("✓ {} is valid\n", self.config.display());
        println!(
            "  {}/{} ({}, root '{}')",
            binder.module_name,
            binder.script_name,
            manifest.kind(),
            manifest.node_id(binder.root).unwrap_or("scene root")
        );
        let bound = binder.bindings.iter().filter(|b| b.is_set()).count();
        println!(
            "  {} of {} binding{} set",
            bound,
            binder.bindings.len(),
            if binder.bindings.len() == 1 { "" } else { "s" }
        );

        Ok(())
    }
}
