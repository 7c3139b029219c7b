use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};

#[derive(Debug, Parser)]
#[command(author, version, about = "Republishes camera uploads to live viewers")]
pub struct Arguments {
    /// Address to serve uploads and viewers on [default: 0.0.0.0:5000]
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bound each channel queue to this many items, dropping the oldest when full
    #[arg(short, long)]
    pub queue_capacity: Option<usize>,

    /// Largest accepted upload body in bytes
    #[arg(long)]
    pub max_body: Option<usize>,

    /// Log filter, e.g. `scanfeed=debug` (falls back to RUST_LOG, then `info`)
    #[arg(long)]
    pub log: Option<String>,
}
