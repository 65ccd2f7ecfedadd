//! The travel designer's agents.

use super::tools::{ConfirmBooking, GetFlights, GetTravelAlerts, IntegratePlatform, ManageBudget, SuggestHotels};
use agentic::agent::Agent;
use agentic::error::AgentError;
use std::sync::Arc;

const DESTINATION_INSTRUCTIONS: &str = "\
Suggest 2-3 destinations based on user mood, interests, or budget (e.g., \u{201c}50,000 PKR\u{201d}). \
Use chat history and session data (destination/budget) for personalization. Provide PKR/USD costs for \
Pakistani travelers in 2025. End with \u{201c}Want to book, explore attractions, or adjust budget?\u{201d} \
Deliver concise, friendly, actionable answers.";

const BOOKING_INSTRUCTIONS: &str = "\
You are the booking agent. You can use the following tools:
- get_flights(destination)
- suggest_hotels(destination)
- confirm_booking(flight, hotel, destination)
- manage_budget(flight_price, hotel_price, budget)
- integrate_platform(platform, destination)

Your goal is to:
1. Suggest realistic flights & hotels
2. Respect budget if provided
3. Call tools to simulate booking
4. Always respond with actionable info

ALWAYS use tools. NEVER say \u{201c}I cannot search\u{2026}\u{201d} or \u{201c}I cannot confirm\u{2026}\u{201d}";

const EXPLORE_INSTRUCTIONS: &str = "\
For attraction/food queries, suggest 2-3 attractions and food options using get_travel_alerts() for alerts. \
Use chat history and session data (destination). Tailor for Pakistani travelers in 2025. End with \
\u{201c}Need booking help, more destinations, or budget tracking?\u{201d} Deliver concise, friendly answers.";

const TRIAGE_INSTRUCTIONS: &str = "\
You are the triage agent for travel planning.

**Always** route messages based on these keywords:

- To `BookingAgent`: if input mentions flights, hotels, booking, Skyscanner, Booking.com, confirm, budget check.
- To `ExploreAgent`: if input mentions explore, food, attraction, alerts, or names of cities with \"explore\".
- To `DestinationAgent`: if input is vague or just mentions mood/interest (e.g. \u{201c}I want nature\u{201d}, \u{201c}Where should I go?\u{201d})

If unsure, prefer routing to BookingAgent.";

/// Build the triage agent and its three specialists.
pub fn build_triage() -> Result<Arc<Agent>, AgentError> {
    let destination = Agent::builder("destination_agent")
        .instructions(DESTINATION_INSTRUCTIONS)
        .handoff_description("Handles destination suggestions.")
        .build()?;

    let booking = Agent::builder("booking_agent")
        .instructions(BOOKING_INSTRUCTIONS)
        .handoff_description("Handles travel bookings.")
        .tool(GetFlights)
        .tool(SuggestHotels)
        .tool(ConfirmBooking)
        .tool(IntegratePlatform)
        .tool(ManageBudget)
        .build()?;

    let explore = Agent::builder("explore_agent")
        .instructions(EXPLORE_INSTRUCTIONS)
        .handoff_description("Handles attractions and food suggestions.")
        .tool(GetTravelAlerts)
        .build()?;

    let triage = Agent::builder("triage_agent")
        .instructions(TRIAGE_INSTRUCTIONS)
        .handoff(Arc::new(destination))
        .handoff(Arc::new(booking))
        .handoff(Arc::new(explore))
        .build()?;

    Ok(Arc::new(triage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_graph() {
        let triage = build_triage().unwrap();
        let names: Vec<_> = triage.handoffs().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["destination_agent", "booking_agent", "explore_agent"]);

        let booking = triage.find_handoff("transfer_to_booking_agent").unwrap();
        let tools: Vec<_> = booking.tools().names().collect();
        assert_eq!(
            tools,
            vec!["confirm_booking", "get_flights", "integrate_platform", "manage_budget", "suggest_hotels"]
        );

        let explore = triage.find_handoff("transfer_to_explore_agent").unwrap();
        assert!(explore.tools().contains("get_travel_alerts"));
        assert_eq!(explore.tools().len(), 1);
    }

    #[test]
    fn test_handoff_tools_carry_descriptions() {
        let triage = build_triage().unwrap();
        let definitions = triage.tool_definitions();
        assert_eq!(definitions.len(), 3);
        assert_eq!(
            definitions[1].description,
            "Handoff to the booking_agent agent to handle the request. Handles travel bookings."
        );
    }
}
