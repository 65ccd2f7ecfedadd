//! The game master and its three helpers.

use super::tools::{GenerateEvent, RollDice};
use agentic::agent::Agent;
use agentic::error::AgentError;
use std::sync::Arc;

const NARRATOR_INSTRUCTIONS: &str = "\
You are the Narrator for a fantasy adventure game. \
Create immersive story descriptions based on player actions (e.g., 'explore', 'move forward'). \
Use the generate_event tool to add random events during exploration.";

const MONSTER_INSTRUCTIONS: &str = "\
You handle combat in a fantasy adventure game. \
When the player chooses to fight, describe a monster encounter and use roll_dice to determine outcomes. \
A roll of 10+ on a D20 is a hit, dealing 5 damage. Below 10 is a miss.";

const ITEM_INSTRUCTIONS: &str = "\
You manage the player's inventory and rewards in a fantasy adventure game. \
When the player checks inventory or receives a reward, describe their items or add new ones using generate_event.";

const GAME_MASTER_INSTRUCTIONS: &str = "\
You are the Game Master for a fantasy adventure game. \
Based on the player's input, decide whether to hand off to the NarratorAgent (for story progression), \
MonsterAgent (for combat), or ItemAgent (for inventory/rewards). \
If the input is unclear, ask the player to clarify. \
Use tools when appropriate (e.g., roll_dice for combat, generate_event for exploration).";

pub fn build_game_master() -> Result<Arc<Agent>, AgentError> {
    let narrator = Agent::builder("NarratorAgent")
        .instructions(NARRATOR_INSTRUCTIONS)
        .tool(RollDice)
        .tool(GenerateEvent)
        .build()?;

    let monster = Agent::builder("MonsterAgent")
        .instructions(MONSTER_INSTRUCTIONS)
        .tool(RollDice)
        .build()?;

    let item = Agent::builder("ItemAgent")
        .instructions(ITEM_INSTRUCTIONS)
        .tool(GenerateEvent)
        .build()?;

    let game_master = Agent::builder("GameMaster")
        .instructions(GAME_MASTER_INSTRUCTIONS)
        .handoff(Arc::new(narrator))
        .handoff(Arc::new(monster))
        .handoff(Arc::new(item))
        .build()?;

    Ok(Arc::new(game_master))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handoff_names_are_tool_safe() {
        let game_master = build_game_master().unwrap();
        let names: Vec<_> = game_master
            .tool_definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec!["transfer_to_narratoragent", "transfer_to_monsteragent", "transfer_to_itemagent"]
        );

        let monster = game_master.find_handoff("transfer_to_monsteragent").unwrap();
        assert!(monster.tools().contains("roll_dice"));
        assert!(!monster.tools().contains("generate_event"));
    }
}
