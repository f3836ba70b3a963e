use std::path::PathBuf;

use clap::Parser;

/// How the backing file is rewritten after each insertion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite in place.
    #[default]
    Overwrite,
    /// Write a sibling temp file, sync it, then rename over the target.
    Atomic,
}

/// Where and how the store persists its transactions.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub write_mode: WriteMode,
}

#[derive(Parser, Debug)]
#[command(name = "finance_tracker", version, about = "Record personal transactions to a CSV file")]
pub struct Args {
    /// CSV file holding the transactions, relative to the working directory
    #[arg(short, long, env = "FINANCE_TRACKER_FILE", default_value = "MOCK_DATA.csv")]
    pub file: PathBuf,

    /// Replace the file via temp file and rename instead of rewriting it in place
    #[arg(long)]
    pub atomic: bool,
}

impl Args {
    /// Resolves the file against the working directory once, at startup.
    pub fn into_store_config(self) -> std::io::Result<StoreConfig> {
        let path = std::env::current_dir()?.join(self.file);
        let write_mode = if self.atomic {
            WriteMode::Atomic
        } else {
            WriteMode::Overwrite
        };
        Ok(StoreConfig { path, write_mode })
    }
}
