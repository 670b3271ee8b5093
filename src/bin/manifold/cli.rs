//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// manifold - resolve package manifests into build descriptors
#[derive(Parser)]
#[command(name = "manifold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Root package directory (defaults to the current directory)
    #[arg(long, global = true, env = "MANIFOLD_ROOT")]
    pub root: Option<PathBuf>,

    /// Additional package directory (repeatable)
    #[arg(long = "path", global = true, value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every discovered package
    Packages(PackagesArgs),

    /// Print the dependency closure of a package
    Deps(DepsArgs),

    /// Display the dependency tree
    Tree(TreeArgs),

    /// Generate the build descriptor for a package
    Build(BuildArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct PackagesArgs {
    /// Print the full manifest of each package as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Package to resolve (defaults to the root package)
    pub target: Option<String>,

    /// Order dependencies before dependents
    #[arg(long)]
    pub topo: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Package to show tree for (defaults to root)
    pub package: Option<String>,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Expand packages that were already shown
    #[arg(long)]
    pub duplicates: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Package to build (defaults to the root package)
    pub target: Option<String>,

    /// Prefix for resource identifiers
    #[arg(long)]
    pub prefix: Option<String>,

    /// Write the descriptor to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
