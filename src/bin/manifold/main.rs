//! manifold CLI - resolve package manifests into build descriptors

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use manifold::builder::extension::ExtensionError;
use manifold::core::{ManifestError, RegistryError};
use manifold::resolver::ResolveError;
use manifold::util::diagnostic::{emit, Diagnostic};
use manifold::util::GlobalContext;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match diagnostic_for(&e) {
            Some(diag) => emit(&diag, color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("manifold=debug")
    } else {
        EnvFilter::new("manifold=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    let project = commands::Project::load(&ctx, cli.root.as_deref(), &cli.paths)?;

    // Execute command
    match cli.command {
        Commands::Packages(args) => commands::packages::execute(&project, args),
        Commands::Deps(args) => commands::deps::execute(&project, args),
        Commands::Tree(args) => commands::tree::execute(&project, args),
        Commands::Build(args) => commands::build::execute(&project, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Render known library errors with context and suggestions.
fn diagnostic_for(err: &anyhow::Error) -> Option<Diagnostic> {
    if let Some(e) = err.downcast_ref::<ResolveError>() {
        return Some(e.to_diagnostic());
    }
    if let Some(e) = err.downcast_ref::<RegistryError>() {
        return Some(e.to_diagnostic());
    }
    if let Some(e) = err.downcast_ref::<ManifestError>() {
        return Some(e.to_diagnostic());
    }
    if let Some(e) = err.downcast_ref::<ExtensionError>() {
        return Some(e.to_diagnostic());
    }
    None
}
