use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bingo",
    about = "Picture Bingo: shared picture cards for bingo games",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the effective server configuration as TOML
    Config(ConfigArgs),
    /// Render a thumbnail locally, the same way uploads are processed
    Thumbnail(ThumbnailArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Base URL picture links are built from
    #[arg(long)]
    pub public_base_url: Option<String>,
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,
    #[arg(long)]
    pub thumbnail_max_dim: Option<u32>,
    /// Update attempts before a contended card update is abandoned
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration file to load; defaults are printed when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ThumbnailArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    #[arg(long)]
    pub max_dim: Option<u32>,
}
