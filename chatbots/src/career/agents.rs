//! The career mentor's agents.

use super::roadmaps::GetCareerRoadmap;
use agentic::agent::Agent;
use agentic::error::AgentError;
use std::sync::Arc;

const CAREER_INSTRUCTIONS: &str = "\
Suggest 2-3 tech/freelancing careers matching user interests with brief reasons why they fit. \
Tailor for 2025 Pakistan/global demand. End with \u{201c}Want skills or job details?\u{201d} \
Use chat history to personalize. Keep answers short, friendly, and focused on USD/\u{20b9} earnings.";

const SKILL_INSTRUCTIONS: &str = "\
For skill queries (e.g., \u{201c}how to earn on Upwork\u{201d}), deliver a roadmap with skills, profile setup, \
courses, and success tips in a markdown table. Tailor for Pakistan beginners, emphasizing 2025 trends \
(e.g., Agentic AI). Use chat history for context. End with \u{201c}Want job details?\u{201d} \
Answer directly and concisely.";

const JOB_INSTRUCTIONS: &str = "\
For job queries (e.g., \u{201c}what\u{2019}s freelancing like\u{201d}), describe roles, responsibilities, \
work environment, and USD/\u{20b9} earnings for Pakistan in 2025. Suggest related tech jobs if unsupported. \
End with \u{201c}Need skills to start?\u{201d} Use chat history for context. Keep answers direct and friendly.";

const TRIAGE_INSTRUCTIONS: &str = "\
Route user queries to the right agent based on intent: CareerAgent for interests (e.g., \u{201c}tech\u{201d}), \
SkillAgent for skill queries (e.g., \u{201c}skills for freelancing\u{201d}), or JobAgent for job details \
(e.g., \u{201c}what\u{2019}s freelancing like\u{201d}). Extract key terms (e.g., \u{201c}Upwork,\u{201d} \
\u{201c}Agentic AI\u{201d}) and use chat history for follow-up context. If unclear, route to CareerAgent and \
ask for interests. Deliver answers seamlessly as one responder, focusing on Pakistan\u{2019}s 2025 job market \
with USD/\u{20b9} earnings.";

/// Build the triage agent and its three specialists.
pub fn build_triage() -> Result<Arc<Agent>, AgentError> {
    let career = Agent::builder("career_agent")
        .instructions(CAREER_INSTRUCTIONS)
        .handoff_description("Handles career exploration.")
        .build()?;

    let skill = Agent::builder("skill_agent")
        .instructions(SKILL_INSTRUCTIONS)
        .handoff_description("Handles skill queries.")
        .tool(GetCareerRoadmap)
        .build()?;

    let job = Agent::builder("job_agent")
        .instructions(JOB_INSTRUCTIONS)
        .handoff_description("Handles job role queries.")
        .build()?;

    let triage = Agent::builder("triage_agent")
        .instructions(TRIAGE_INSTRUCTIONS)
        .handoff(Arc::new(career))
        .handoff(Arc::new(skill))
        .handoff(Arc::new(job))
        .build()?;

    Ok(Arc::new(triage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triage_routes_to_three_specialists() {
        let triage = build_triage().unwrap();
        let names: Vec<_> = triage.handoffs().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["career_agent", "skill_agent", "job_agent"]);
        assert!(triage.tools().is_empty());
    }

    #[test]
    fn test_only_skill_agent_has_the_roadmap_tool() {
        let triage = build_triage().unwrap();
        let skill = triage.find_handoff("transfer_to_skill_agent").unwrap();
        assert!(skill.tools().contains("get_career_roadmap"));

        let career = triage.find_handoff("transfer_to_career_agent").unwrap();
        assert!(career.tools().is_empty());
    }
}
