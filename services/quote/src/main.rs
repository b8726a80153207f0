//! Quote tool entry point

use anyhow::Result;
use clap::Parser;
use sen_config::OutputFormat;
use sen_quote::logging::{init_tracing, load_config_logged};
use sen_quote::{execute, Cli};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config_logged(cli.config.as_deref(), cli.env.as_deref(), std::io::stderr)?;
    init_tracing(&config.logging);
    debug!("Configuration loaded: {:?}", config);

    let output = execute(&cli.command, &config)?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.quote.output
    };
    println!("{}", output.render(format)?);
    Ok(())
}
