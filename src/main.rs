use clap::Parser;
use codervet::structs::cli::Cli;
use codervet::workers::command_runner::CommandRunner;
use env_logger::Env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let runner = CommandRunner::new()?;
    runner.run_command(cli.command).await?;
    Ok(())
}
