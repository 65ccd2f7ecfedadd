//! Fantasy Adventure Game run by an AI game master.

use anyhow::Result;
use chatbots::chat::run_console;
use chatbots::config::{ModelArgs, Settings, load_dotenv};
use chatbots::game::GameMaster;
use chatbots::logging;
use clap::Parser;
use std::io::{BufReader, stdin, stdout};

#[derive(Debug, Parser)]
#[command(name = "game_master", about = "Fantasy Adventure Game run by an AI game master.")]
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

    let mut bot = GameMaster::new(settings.runner())?;
    run_console(&mut bot, BufReader::new(stdin()), stdout()).await?;
    Ok(())
}
