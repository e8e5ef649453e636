use clap::{ArgGroup, Parser, Subcommand};

/// Desktop - Workspace bookmarks for your shell
///
/// desktop remembers project directories by name, lets you tag them, and
/// activates them in a bash session configured by the directory's
/// `Desktopfile` (environment variables, aliases and startup commands).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the current directory as a workspace
    ///
    /// Writes a starter Desktopfile unless the directory already has one.
    New {
        /// Workspace name
        #[arg(value_name = "NAME")]
        name: String,

        /// Short description shown in listings
        #[arg(value_name = "DESCRIPTION")]
        description: String,
    },

    /// List workspaces, most recently used first
    List,

    /// Go to a workspace and start a shell configured by its Desktopfile
    Go {
        /// Workspace name
        #[arg(value_name = "WORKSPACE")]
        workspace: String,

        /// Configuration to activate (defaults to 'default')
        #[arg(value_name = "CONFIGURATION")]
        configuration: Option<String>,
    },

    /// Print the init script `go` would run, without starting a shell
    Script {
        /// Workspace name
        #[arg(value_name = "WORKSPACE")]
        workspace: String,

        /// Configuration to render (defaults to 'default')
        #[arg(value_name = "CONFIGURATION")]
        configuration: Option<String>,
    },

    /// Validate a workspace's Desktopfile and list its configurations
    Check {
        /// Workspace name
        #[arg(value_name = "WORKSPACE")]
        workspace: String,
    },

    /// Manage workspace tags
    #[command(subcommand)]
    Tags(TagsAction),
}

#[derive(Subcommand, Debug)]
pub enum TagsAction {
    /// Create a new tag
    New {
        /// Tag name
        #[arg(value_name = "TAG")]
        name: String,
    },

    /// List all tags and how many workspaces use them
    List,

    /// Add a tag to a workspace
    Add {
        /// Workspace name
        #[arg(value_name = "WORKSPACE")]
        workspace: String,

        /// Tag name
        #[arg(value_name = "TAG")]
        tag: String,
    },

    /// Show the workspaces with a tag, or the tags on a workspace
    #[command(group(ArgGroup::new("target").required(true).args(["tag", "workspace"])))]
    Show {
        /// Show every workspace carrying this tag
        #[arg(short, long, value_name = "TAG")]
        tag: Option<String>,

        /// Show every tag attached to this workspace
        #[arg(short, long, value_name = "WORKSPACE")]
        workspace: Option<String>,
    },
}
