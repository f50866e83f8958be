use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Review a single source file and print its analysis result as JSON
    Review { file: PathBuf },
    /// Review several source files in one batch
    Batch { files: Vec<PathBuf> },
    /// Review every code file inside a .zip archive
    Archive { file: PathBuf },
}
