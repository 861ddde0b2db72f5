//! CLI commands

use clap::{Parser, Subcommand};

/// Temporal-KV CLI
#[derive(Parser)]
#[command(name = "temporal-kv")]
#[command(about = "Minimal temporal key-value store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Directory for the durable ledger (in-memory when omitted;
        /// requires the `sled` feature)
        #[arg(long)]
        data_dir: Option<std::path::PathBuf>,
    },
}
