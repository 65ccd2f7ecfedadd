//! Console chatbots built on the `agentic` framework and a Gemini model.
//!
//! - [`career`]: Career Mentor, routing between career, skill and job agents
//! - [`travel`]: AI Travel Designer with mock flights, hotels and bookings
//! - [`game`]: Fantasy Adventure Game with dice, events and player state
//! - [`student`]: one-shot study assistant
//!
//! Each chatbot has a binary under `src/bin/` that wires it to stdin/stdout
//! through [`chat::run_console`].

pub mod career;
pub mod chat;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod logging;
pub mod student;
pub mod travel;

pub use error::{Error, Result};
