mod add;
mod check;
mod completions;
mod generate;
mod init;
mod paths;
mod remove;
mod tree;

use add::AddCommand;
use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use init::InitCommand;
use paths::PathsCommand;
use remove::RemoveCommand;
use tree::TreeCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for scenebind_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "scenebind")]
#[command(version)]
#[command(about = "Bind scene nodes to named fields and generate the lookup script")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Paths(cmd) => cmd.run(),
            Commands::Tree(cmd) => cmd.run(),
            Commands::Add(cmd) => cmd.run(),
            Commands::Remove(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter binder.toml
    Init(InitCommand),

    /// Generate the binding script from binder.toml
    Generate(GenerateCommand),

    /// Validate binder.toml and report binding problems
    Check(CheckCommand),

    /// Print the lookup expression of every binding
    Paths(PathsCommand),

    /// Print the scene hierarchy
    Tree(TreeCommand),

    /// Append a binding to binder.toml
    Add(AddCommand),

    /// Remove a binding from binder.toml
    Remove(RemoveCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
