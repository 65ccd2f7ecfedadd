//! Console chat front end.
//!
//! Every chatbot implements [`ChatHandler`]; [`run_console`] owns the read /
//! reply loop. Handlers run one message at a time: the next line is not read
//! until the previous reply has been written.

use agentic::id::SessionId;
use agentic::runner::Runner;
use async_trait::async_trait;
use std::io::{self, BufRead, Write};

/// Session callbacks of a chatbot.
#[async_trait]
pub trait ChatHandler: Send {
    /// Called once when the session opens; returns the greeting.
    fn on_chat_start(&mut self) -> String;

    /// Shown while the model is working on a reply.
    fn placeholder(&self) -> Option<&str> {
        None
    }

    /// Handle one user message and return the text to display.
    ///
    /// Failures are rendered into the reply; the session always continues.
    async fn on_message(&mut self, text: &str) -> String;
}

/// Tag every run of `runner` with a fresh session id.
pub fn session_runner(runner: Runner) -> Runner {
    let config = runner.config().clone().with_session(SessionId::new());
    runner.with_config(config)
}

/// Shown when an input line cannot be decoded
const INVALID_INPUT: &str = "Sorry, that line could not be read as text. Please try again.";

/// Words that end the session
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Run a chat session over `input`/`output` until EOF or a quit word.
///
/// Returns the number of messages handled.
pub async fn run_console<H, R, W>(handler: &mut H, mut input: R, mut output: W) -> io::Result<usize>
where
    H: ChatHandler + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", handler.on_chat_start())?;
    writeln!(output, "(type 'quit' to exit)\n")?;

    let mut handled = 0;
    loop {
        write!(output, "You: ")?;
        output.flush()?;

        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(output)?;
            break;
        }
        let Ok(line) = std::str::from_utf8(&raw) else {
            tracing::warn!(bytes = raw.len(), "skipping input line that is not UTF-8");
            writeln!(output, "{}", INVALID_INPUT)?;
            continue;
        };
        let text = line.trim();

        if QUIT_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)) {
            writeln!(output, "Goodbye!")?;
            break;
        }
        if text.is_empty() {
            continue;
        }

        if let Some(placeholder) = handler.placeholder() {
            writeln!(output, "{}", placeholder)?;
            output.flush()?;
        }

        let reply = handler.on_message(text).await;
        writeln!(output, "\n{}\n", reply)?;
        handled += 1;
    }

    tracing::debug!(handled, "chat session closed");
    Ok(handled)
}
