//! Arbor CLI - resource trees from the command line
//!
//! Usage: arbor [--json] [-v] [--config FILE] <COMMAND>
//!
//! Commands:
//!   tree    Print the tree of a root
//!   find    List entries whose name contains a query
//!   rename  Rename an entry in place
//!   move    Move an entry into another folder
//!   delete  Delete an entry and everything below it
//!   create  Create an entry with a create-menu factory
//!   watch   Watch the roots and report rebuilds
//!   scene   Print the hierarchy of a scene description

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::{GlobalOptions, SceneOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = GlobalOptions {
        json: cli.json,
        verbose: cli.verbose,
        config: cli.config,
    };

    match cli.command {
        Commands::Tree { project, depth } => commands::cmd_tree(&project, depth, &options),
        Commands::Find { project, query } => commands::cmd_find(&project, &query, &options),
        Commands::Rename {
            project,
            path,
            name,
        } => commands::cmd_rename(&project, &path, &name, &options),
        Commands::Move {
            project,
            path,
            folder,
        } => commands::cmd_move(&project, &path, &folder, &options),
        Commands::Delete { project, path } => commands::cmd_delete(&project, &path, &options),
        Commands::Create {
            project,
            parent,
            factory,
            name,
        } => commands::cmd_create(&project, &parent, &factory, name.as_deref(), &options),
        Commands::Watch { project } => commands::cmd_watch(&project, &options),
        Commands::Scene {
            file,
            find,
            components,
            temporary,
            collapsed,
        } => commands::cmd_scene(
            &file,
            &SceneOptions {
                find: find.as_deref(),
                components,
                temporary,
                collapsed,
            },
            &options,
        ),
    }
}
