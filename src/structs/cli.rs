use clap::Parser;

use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "codervet")]
#[clap(about = "AI-assisted code review combining static analysis and model review", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
