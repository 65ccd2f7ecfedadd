//! Fantasy Adventure Game: a game master agent narrates, fights and hands
//! out loot while the session keeps score.

pub mod agents;
pub mod state;
pub mod tools;

use crate::chat::{ChatHandler, session_runner};
use crate::error::Result;
use agentic::agent::Agent;
use agentic::runner::Runner;
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use state::PlayerState;
use std::sync::Arc;

pub const WELCOME: &str =
    "Welcome to the Fantasy Adventure Game! Type 'explore', 'fight', or 'check inventory' to begin.";

/// Game session
///
/// Unlike the other bots the game keeps no chat history: each run sees only
/// the latest player message.
#[derive(Debug)]
pub struct GameMaster {
    runner: Runner,
    master: Arc<Agent>,
    player: Option<PlayerState>,
    rng: StdRng,
}

impl GameMaster {
    pub fn new(runner: Runner) -> Result<Self> {
        Self::with_rng(runner, StdRng::from_entropy())
    }

    /// Use `rng` for location changes
    pub fn with_rng(runner: Runner, rng: StdRng) -> Result<Self> {
        Ok(Self {
            runner: session_runner(runner),
            master: agents::build_game_master()?,
            player: None,
            rng,
        })
    }

    /// Current player state, if the game has started
    pub fn player(&self) -> Option<&PlayerState> {
        self.player.as_ref()
    }
}

#[async_trait]
impl ChatHandler for GameMaster {
    fn on_chat_start(&mut self) -> String {
        self.player = None;
        WELCOME.to_string()
    }

    async fn on_message(&mut self, text: &str) -> String {
        let player = self.player.get_or_insert_with(PlayerState::new);

        match self.runner.run(&self.master, text).await {
            Ok(result) => {
                tracing::debug!(agent = %result.last_agent, turns = result.turns, "game reply");
                let shown = player.take_turn(text, &result.final_output, &mut self.rng);
                tracing::debug!(health = player.health, location = %player.location, "player state");
                shown
            }
            Err(e) => {
                tracing::warn!(error = %e, "game run failed");
                format!("An error occurred: {}. Please check your API key or try again.", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentic::error::LlmError;
    use agentic::testing::ScriptedProvider;
    use serde_json::json;

    fn game(provider: ScriptedProvider) -> (GameMaster, Arc<ScriptedProvider>) {
        let provider = Arc::new(provider);
        let game = GameMaster::with_rng(Runner::new(provider.clone()), StdRng::seed_from_u64(5)).unwrap();
        (game, provider)
    }

    #[tokio::test]
    async fn test_state_starts_on_first_message() {
        let (mut game, _) = game(ScriptedProvider::new().then_text("A goblin appears."));
        assert_eq!(game.on_chat_start(), WELCOME);
        assert!(game.player().is_none());

        let shown = game.on_message("look around").await;
        assert_eq!(
            shown,
            "A goblin appears.\n\n**Player State**: Health: 20, Inventory: ['sword', 'shield'], Location: a dark forest"
        );
        assert_eq!(game.player().unwrap().health, 20);
    }

    #[tokio::test]
    async fn test_combat_turn_through_monster_agent() {
        let (mut game, provider) = game(
            ScriptedProvider::new()
                .then_tool_call("transfer_to_monsteragent", json!({}))
                .then_tool_call("roll_dice", json!({"sides": 20}))
                .then_text("The orc lands a hit for 5 damage!"),
        );

        let shown = game.on_message("fight").await;
        assert!(shown.starts_with("The orc lands a hit for 5 damage!\n\n"));
        assert_eq!(game.player().unwrap().health, 15);

        // Only the latest message is sent.
        let requests = provider.requests();
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].messages[0].text_content(), "fight");
    }

    #[tokio::test]
    async fn test_error_leaves_state_alone() {
        let (mut game, _) = game(
            ScriptedProvider::new().then_error(LlmError::AuthenticationFailed {
                reason: "API key not valid".into(),
            }),
        );

        let shown = game.on_message("explore").await;
        assert!(shown.starts_with("An error occurred: "));
        assert!(shown.ends_with(". Please check your API key or try again."));
        assert_eq!(game.player(), Some(&PlayerState::new()));
    }
}
