//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

/// ysenv - Render host and container setup from one environment document
#[derive(Parser, Debug)]
#[command(name = "ysenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Environment document (default: <config dir>/ysenv/config.yaml)
    #[arg(long, global = true, env = "YSENV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Docker-compatible binary used to probe container homes
    #[arg(long, global = true, env = "YSENV_DOCKER", default_value = "docker")]
    pub docker: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the command that opens the environment document in an editor
    Edit {
        /// Editor command
        #[arg(long, env = "EDITOR", default_value = "vi")]
        editor: String,
    },

    /// Print symlink and rc-file commands for a host instance
    ///
    /// Examples:
    ///   ysenv host laptop           # Shell commands to set up "laptop"
    ///   ysenv host laptop --list    # Show resolved options with provenance
    ///   ysenv host --list           # Names of all host instances
    Host(TargetArgs),

    /// Print the `docker run` command for a docker instance
    ///
    /// Examples:
    ///   ysenv docker dev            # docker run ... for "dev"
    ///   ysenv docker dev --list     # Show resolved options with provenance
    ///   ysenv docker --list         # Names of all docker instances
    Docker(TargetArgs),
}

/// Instance selection shared by `host` and `docker`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .multiple(true)
        .args(["instance", "list"])
))]
pub struct TargetArgs {
    /// Instance name
    pub instance: Option<String>,

    /// List resolved options instead of printing commands
    #[arg(short, long)]
    pub list: bool,
}
