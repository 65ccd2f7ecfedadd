//! Player state and the rules that move it between turns.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Places the player can end up in
pub const LOCATIONS: [&str; 3] = ["a dark forest", "an ancient castle", "a mystical cave"];

/// Health a new player starts with
pub const STARTING_HEALTH: i32 = 20;

/// Health lost when a reply reports a damaging hit
pub const HIT_DAMAGE: i32 = 5;

/// Shown instead of an empty reply
pub const EMPTY_REPLY: &str = "Please try again with a valid action.";

const GAME_OVER: &str = "\nGame Over! Your health reached 0.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub health: i32,
    pub inventory: Vec<String>,
    pub location: String,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            health: STARTING_HEALTH,
            inventory: vec!["sword".to_string(), "shield".to_string()],
            location: LOCATIONS[0].to_string(),
        }
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the damage described by `reply` and return the reply to show.
    ///
    /// Damage is read from keywords only: a reply mentioning both "damage"
    /// and "hit" costs [`HIT_DAMAGE`], even when it says the hit missed.
    pub fn apply_reply(&mut self, reply: &str) -> String {
        let mut reply = reply.to_string();
        let lower = reply.to_lowercase();
        if lower.contains("damage") {
            let damage = if lower.contains("hit") { HIT_DAMAGE } else { 0 };
            self.health -= damage;
            if self.health <= 0 {
                reply.push_str(GAME_OVER);
            }
        }
        reply
    }

    /// Move the player when `input` asks to explore or move.
    pub fn apply_action<R: Rng + ?Sized>(&mut self, input: &str, rng: &mut R) {
        let input = input.trim().to_lowercase();
        if input.contains("explore") || input.contains("move") {
            if let Some(location) = LOCATIONS.choose(rng) {
                self.location = location.to_string();
            }
        }
    }

    /// One-line state summary appended to every reply
    pub fn summary(&self) -> String {
        let inventory: Vec<String> = self.inventory.iter().map(|item| format!("'{}'", item)).collect();
        format!(
            "**Player State**: Health: {}, Inventory: [{}], Location: {}",
            self.health,
            inventory.join(", "),
            self.location
        )
    }

    /// Fold a finished model turn into the state and render the message to show.
    pub fn take_turn<R: Rng + ?Sized>(&mut self, input: &str, reply: &str, rng: &mut R) -> String {
        let reply = if reply.is_empty() { EMPTY_REPLY } else { reply };
        let reply = self.apply_reply(reply);
        self.apply_action(input, rng);
        format!("{}\n\n{}", reply, self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_initial_state() {
        let state = PlayerState::new();
        assert_eq!(state.health, 20);
        assert_eq!(state.inventory, vec!["sword", "shield"]);
        assert_eq!(state.location, "a dark forest");
        assert_eq!(
            state.summary(),
            "**Player State**: Health: 20, Inventory: ['sword', 'shield'], Location: a dark forest"
        );
    }

    #[test]
    fn test_damage_needs_both_keywords() {
        let mut state = PlayerState::new();
        state.apply_reply("The goblin's HIT deals 5 Damage!");
        assert_eq!(state.health, 15);

        state.apply_reply("You take damage from the cold.");
        assert_eq!(state.health, 15);

        state.apply_reply("You hit the goblin.");
        assert_eq!(state.health, 15);
    }

    #[test]
    fn test_negated_hit_still_counts() {
        let mut state = PlayerState::new();
        state.apply_reply("No damage taken, the hit missed.");
        assert_eq!(state.health, 15);
    }

    #[test]
    fn test_game_over_is_announced_each_time() {
        let mut state = PlayerState {
            health: 5,
            ..PlayerState::new()
        };
        let reply = state.apply_reply("A hit! 5 damage.");
        assert_eq!(state.health, 0);
        assert!(reply.ends_with("\nGame Over! Your health reached 0."));

        let reply = state.apply_reply("Another hit for damage.");
        assert_eq!(state.health, -5);
        assert!(reply.ends_with("Game Over! Your health reached 0."));
    }

    #[test]
    fn test_health_never_increases() {
        let mut state = PlayerState::new();
        let mut rng = StdRng::seed_from_u64(3);
        let replies = ["You heal fully!", "hit for damage", "potion restores health", "damage"];
        let mut last = state.health;
        for reply in replies {
            state.take_turn("explore", reply, &mut rng);
            assert!(state.health <= last);
            last = state.health;
        }
    }

    #[test]
    fn test_moving_picks_a_known_location() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = PlayerState::new();
        for input in ["  Explore the ruins ", "MOVE north", "move"] {
            state.apply_action(input, &mut rng);
            assert!(LOCATIONS.contains(&state.location.as_str()));
        }
    }

    #[test]
    fn test_other_actions_stay_put() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = PlayerState {
            location: "an ancient castle".to_string(),
            ..PlayerState::new()
        };
        state.apply_action("fight", &mut rng);
        state.apply_action("check inventory", &mut rng);
        assert_eq!(state.location, "an ancient castle");
    }

    #[test]
    fn test_empty_reply_is_replaced() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = PlayerState::new();
        let shown = state.take_turn("fight", "", &mut rng);
        assert!(shown.starts_with("Please try again with a valid action.\n\n**Player State**"));
    }
}
