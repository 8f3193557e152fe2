use anyhow::Result;
use clap::Parser;
use log::{error, info};
use mailevent::cli::Cli;
use mailevent::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config_file {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    mailevent::init_logger(&config.logging.level);
    info!("Starting mailevent");

    if let Err(err) = mailevent::run(cli, config) {
        error!("Command failed: {:?}", err);
        return Err(err);
    }
    Ok(())
}
