//! Dice and random events for the game agents.

use agentic::error::ToolError;
use agentic::tool::{Tool, ToolContext, ToolOutput, parse_params};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{Value, json};

pub const EVENTS: [&str; 4] = [
    "You find a hidden treasure chest with gold!",
    "A trap springs! Lose 5 health.",
    "You discover a mysterious potion.",
    "A friendly NPC offers you a map.",
];

/// Roll one die with `sides` faces.
pub fn roll<R: Rng + ?Sized>(sides: i64, rng: &mut R) -> Result<i64, ToolError> {
    if sides < 1 {
        return Err(ToolError::InvalidParameters {
            tool: "roll_dice".to_string(),
            reason: format!("a die needs at least one side, got {}", sides),
        });
    }
    Ok(rng.gen_range(1..=sides))
}

pub fn random_event<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    EVENTS.choose(rng).copied().unwrap_or(EVENTS[0])
}

#[derive(Deserialize)]
struct DiceParams {
    sides: i64,
}

pub struct RollDice;

#[async_trait]
impl Tool for RollDice {
    fn name(&self) -> &str {
        "roll_dice"
    }

    fn description(&self) -> &str {
        "Rolls a dice with the specified number of sides."
    }

    fn input_schema(&self) -> &Value {
        static SCHEMA: Lazy<Value> = Lazy::new(|| {
            json!({
                "type": "object",
                "properties": {
                    "sides": {
                        "type": "integer",
                        "description": "Number of sides, e.g. 20 for a D20"
                    }
                },
                "required": ["sides"]
            })
        });
        &SCHEMA
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        let params: DiceParams = parse_params(self.name(), params)?;
        let value = roll(params.sides, &mut rand::thread_rng())?;
        tracing::debug!(sides = params.sides, value, "dice rolled");
        Ok(ToolOutput::text(value.to_string()))
    }
}

pub struct GenerateEvent;

#[async_trait]
impl Tool for GenerateEvent {
    fn name(&self) -> &str {
        "generate_event"
    }

    fn description(&self) -> &str {
        "Generates a random game event."
    }

    fn input_schema(&self) -> &Value {
        static SCHEMA: Lazy<Value> = Lazy::new(|| {
            json!({
                "type": "object",
                "properties": {},
                "required": []
            })
        });
        &SCHEMA
    }

    async fn execute(&self, _params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::text(random_event(&mut rand::thread_rng())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let value = roll(20, &mut rng).unwrap();
            assert!((1..=20).contains(&value));
        }
        assert_eq!(roll(1, &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_roll_rejects_sideless_dice() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(roll(0, &mut rng), Err(ToolError::InvalidParameters { .. })));
        assert!(roll(-6, &mut rng).is_err());
    }

    #[test]
    fn test_events_come_from_the_list() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            assert!(EVENTS.contains(&random_event(&mut rng)));
        }
    }

    #[tokio::test]
    async fn test_tools_execute() {
        let context = ToolContext::new();
        let output = RollDice.execute(json!({"sides": 6}), &context).await.unwrap();
        let value: i64 = output.content.parse().unwrap();
        assert!((1..=6).contains(&value));

        let err = RollDice.execute(json!({"sides": 0}), &context).await.unwrap_err();
        assert!(err.to_string().contains("at least one side"));

        let output = GenerateEvent.execute(json!({}), &context).await.unwrap();
        assert!(EVENTS.contains(&output.content.as_str()));
    }
}
