//! AI Travel Designer: destinations, bookings and budgets.

use anyhow::Result;
use chatbots::chat::run_console;
use chatbots::config::{ModelArgs, Settings, load_dotenv};
use chatbots::logging;
use chatbots::travel::TravelDesigner;
use clap::Parser;
use std::io::{BufReader, stdin, stdout};

#[derive(Debug, Parser)]
#[command(name = "travel_designer", about = "AI Travel Designer: destinations, bookings and budgets.")]
struct Cli {
    #[command(flatten)]
    model: ModelArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();
    logging::init(cli.model.log.as_deref());

    let settings = Settings::from_env(&cli.model)?;
    tracing::debug!(?settings, "starting");

    let mut bot = TravelDesigner::new(settings.runner())?;
    run_console(&mut bot, BufReader::new(stdin()), stdout()).await?;
    Ok(())
}
