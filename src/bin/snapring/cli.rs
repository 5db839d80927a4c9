use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snapring",
    version,
    about = "Embedded rolling snapshot store (fixed-capacity ring over KV storage)",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Initialize a ring store directory
    Init {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = 20)]
        capacity: u32,
        #[arg(long, default_value = "snapshot_")]
        key_prefix: String,
    },
    /// Append one payload (from file or stdin)
    Append {
        #[arg(long)]
        path: PathBuf,
        /// Payload file; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Wrap the payload into a base64 data:URL before storing
        #[arg(long)]
        data_url: bool,
        /// MIME type used with --data-url
        #[arg(long, default_value = "image/jpeg")]
        mime: String,
    },
    /// List stored payloads, newest first
    List {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Export payloads to files, newest first (data:URLs are decoded unless --raw)
    Export {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long)]
        raw: bool,
    },
    /// Remove all slots and reset the ring
    Clear {
        #[arg(long)]
        path: PathBuf,
    },
    /// Show capacity/count/cursor
    Status {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Read-only consistency check
    Doctor {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
}
