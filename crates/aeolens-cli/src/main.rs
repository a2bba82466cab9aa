use aeolens_cli::args::Cli;
use aeolens_cli::logging::init_logging;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = aeolens_cli::run(cli).await?;
    print!("{output}");
    Ok(())
}
