use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Arbor - browse, reorganize and watch resource trees
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// NDJSON output for scripts
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v shows browser events on stderr)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (overrides ARBOR_CONFIG and arbor.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Project directory and root selection shared by the tree commands
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project directory
    pub dir: PathBuf,

    /// Root index; defaults to the left panel's root
    #[arg(short, long)]
    pub root: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tree of a root
    Tree {
        #[command(flatten)]
        project: ProjectArgs,

        /// Deepest level to print
        #[arg(long)]
        depth: Option<usize>,
    },

    /// List entries whose name contains QUERY (case-insensitive)
    Find {
        #[command(flatten)]
        project: ProjectArgs,

        query: String,
    },

    /// Rename an entry in place
    Rename {
        #[command(flatten)]
        project: ProjectArgs,

        /// Resource path of the entry
        path: String,

        /// New file name
        name: String,
    },

    /// Move an entry into another folder of the same root
    Move {
        #[command(flatten)]
        project: ProjectArgs,

        /// Resource path of the entry
        path: String,

        /// Resource path of the destination folder, empty for the root
        folder: String,
    },

    /// Delete an entry and everything below it
    Delete {
        #[command(flatten)]
        project: ProjectArgs,

        /// Resource path of the entry
        path: String,
    },

    /// Create an entry with one of the create-menu factories
    Create {
        #[command(flatten)]
        project: ProjectArgs,

        /// Resource path of the parent folder, empty for the root
        parent: String,

        /// Factory title, e.g. "Folder" or "Text File"
        factory: String,

        /// File name; defaults to the factory's template name
        name: Option<String>,
    },

    /// Watch the roots and report rebuilds until Ctrl+C
    Watch {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Print the hierarchy of a scene description
    Scene {
        /// Scene description (TOML)
        file: PathBuf,

        /// Only show nodes whose name contains this text
        #[arg(long)]
        find: Option<String>,

        /// Show components below their nodes
        #[arg(long)]
        components: bool,

        /// Show temporary objects
        #[arg(long)]
        temporary: bool,

        /// Collapse every node but the root
        #[arg(long)]
        collapsed: bool,
    },
}
