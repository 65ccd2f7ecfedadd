//! Smart Student assistant: answers one question and exits.

use anyhow::Result;
use chatbots::config::{ModelArgs, Settings, load_dotenv};
use chatbots::logging;
use chatbots::student::{self, DEFAULT_QUESTION};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "smart_student", about = "Ask the Smart Student assistant one question.")]
struct Cli {
    /// Question to ask
    question: Option<String>,

    #[command(flatten)]
    model: ModelArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();
    logging::init(cli.model.log.as_deref());

    let settings = Settings::from_env(&cli.model)?;
    let question = cli.question.as_deref().unwrap_or(DEFAULT_QUESTION);

    let answer = student::ask(&settings.runner(), question).await?;
    println!("{}", answer);
    Ok(())
}
