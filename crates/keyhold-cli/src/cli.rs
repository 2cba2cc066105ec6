//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

/// keyhold - store and retrieve passwords through the system keyring
#[derive(Parser)]
#[command(name = "keyhold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print backend selection details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this backend instead of automatic selection
    #[arg(short, long, global = true, value_name = "NAME")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the password for a service and username
    Get(EntryArgs),

    /// Store a password (read from stdin unless --password is given)
    Set(SetArgs),

    /// Delete the password for a service and username
    Del(EntryArgs),

    /// List registered backends and their viability scores
    Backends,

    /// Show config search paths, the loaded config and the active backend
    Diagnose,
}

#[derive(Args)]
pub struct EntryArgs {
    pub service: String,
    pub username: String,
}

#[derive(Args)]
pub struct SetArgs {
    pub service: String,
    pub username: String,

    /// Password to store
    #[arg(long, env = "KEYHOLD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
