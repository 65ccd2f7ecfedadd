//! Career Mentor: tech careers, skills and earning online.

use anyhow::Result;
use chatbots::career::CareerMentor;
use chatbots::chat::run_console;
use chatbots::config::{ModelArgs, Settings, load_dotenv};
use chatbots::logging;
use clap::Parser;
use std::io::{BufReader, stdin, stdout};

#[derive(Debug, Parser)]
#[command(name = "career_mentor", about = "Career Mentor: tech careers, skills and earning online.")]
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

    let mut bot = CareerMentor::new(settings.runner())?;
    run_console(&mut bot, BufReader::new(stdin()), stdout()).await?;
    Ok(())
}
