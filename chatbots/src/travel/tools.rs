//! Tools available to the travel agents.

use super::data::{alert_for, flights_for, hotels_for};
use agentic::error::ToolError;
use agentic::tool::{Tool, ToolContext, ToolOutput, parse_params};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Returned by [`check_budget`] when a price or the budget cannot be read
pub const BUDGET_ERROR: &str = "Error calculating budget. Please provide valid prices and budget.";

/// Read the rupee amount out of a price string such as `$350 (₹98,000 PKR)`.
pub fn parse_rupees(price: &str) -> Option<f64> {
    let (_, after) = price.split_once('\u{20b9}')?;
    let amount = after.split('\u{20b9}').next()?.split(' ').next()?;
    amount.replace(',', "").trim().parse().ok()
}

/// Render an amount with thousands separators, always with a fractional part.
pub fn format_pkr(amount: f64) -> String {
    let text = if amount.is_finite() && amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    };
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let mut out = String::from(sign);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Capitalise the first letter of every word and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if in_word {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        in_word = ch.is_alphabetic();
    }
    out
}

fn budget_amount(budget: &Value) -> Option<f64> {
    match budget {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Compare flight plus hotel against the budget.
pub fn check_budget(flight_price: &str, hotel_price: &str, budget: &Value) -> String {
    let (Some(flight), Some(hotel), Some(budget)) = (
        parse_rupees(flight_price),
        parse_rupees(hotel_price),
        budget_amount(budget),
    ) else {
        return BUDGET_ERROR.to_string();
    };

    let total = flight + hotel;
    if total > budget {
        format!(
            "Warning: Total cost (\u{20b9}{} PKR) exceeds budget (\u{20b9}{} PKR). Try Murree or Khanpur Dam for budget-friendly options.",
            format_pkr(total),
            format_pkr(budget)
        )
    } else {
        format!(
            "Total cost: \u{20b9}{} PKR (Flight: \u{20b9}{} PKR, Hotel: \u{20b9}{} PKR). Within budget (\u{20b9}{} PKR).",
            format_pkr(total),
            format_pkr(flight),
            format_pkr(hotel),
            format_pkr(budget)
        )
    }
}

/// Mock booking confirmation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingReceipt {
    pub confirmation: String,
    pub flight: Value,
    pub hotel: Value,
    pub receipt_id: String,
    pub message: &'static str,
}

pub fn booking_receipt<R: Rng + ?Sized>(flight: Value, hotel: Value, destination: &str, rng: &mut R) -> BookingReceipt {
    BookingReceipt {
        confirmation: format!("Booking confirmed for {}!", title_case(destination)),
        flight,
        hotel,
        receipt_id: format!(
            "TRV-{}-2025-{}",
            destination.to_uppercase(),
            rng.gen_range(1000..=9999)
        ),
        message: "You'll receive a confirmation email.",
    }
}

pub fn platform_status(platform: &str, destination: &str) -> String {
    match platform.to_lowercase().as_str() {
        "skyscanner" => format!(
            "Connected to Skyscanner: Fetched flight data for {}.",
            title_case(destination)
        ),
        "booking.com" => format!(
            "Connected to Booking.com: Fetched hotel data for {}.",
            title_case(destination)
        ),
        _ => format!("Platform {} not supported. Try Skyscanner or Booking.com.", platform),
    }
}

#[derive(Deserialize)]
struct DestinationParams {
    destination: String,
}

static DESTINATION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "destination": {
                "type": "string",
                "description": "Destination name, e.g. \"Dubai\" or \"Hunza\""
            }
        },
        "required": ["destination"]
    })
});

/// Flights to a destination
pub struct GetFlights;

#[async_trait]
impl Tool for GetFlights {
    fn name(&self) -> &str {
        "get_flights"
    }

    fn description(&self) -> &str {
        "Returns realistic flight data for 2025, tailored for Pakistani travelers."
    }

    fn input_schema(&self) -> &Value {
        &DESTINATION_SCHEMA
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        let params: DestinationParams = parse_params(self.name(), params)?;
        ToolOutput::json(&flights_for(&params.destination))
    }
}

/// Hotels at a destination
pub struct SuggestHotels;

#[async_trait]
impl Tool for SuggestHotels {
    fn name(&self) -> &str {
        "suggest_hotels"
    }

    fn description(&self) -> &str {
        "Returns realistic hotel suggestions for 2025, tailored for Pakistani travelers."
    }

    fn input_schema(&self) -> &Value {
        &DESTINATION_SCHEMA
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        let params: DestinationParams = parse_params(self.name(), params)?;
        ToolOutput::json(&hotels_for(&params.destination))
    }
}

/// Travel alerts for a destination
pub struct GetTravelAlerts;

#[async_trait]
impl Tool for GetTravelAlerts {
    fn name(&self) -> &str {
        "get_travel_alerts"
    }

    fn description(&self) -> &str {
        "Returns mock travel alerts for a destination in 2025."
    }

    fn input_schema(&self) -> &Value {
        &DESTINATION_SCHEMA
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        let params: DestinationParams = parse_params(self.name(), params)?;
        Ok(ToolOutput::text(alert_for(&params.destination)))
    }
}

#[derive(Deserialize)]
struct BookingParams {
    flight: Value,
    hotel: Value,
    destination: String,
}

/// Simulated booking
pub struct ConfirmBooking;

#[async_trait]
impl Tool for ConfirmBooking {
    fn name(&self) -> &str {
        "confirm_booking"
    }

    fn description(&self) -> &str {
        "Simulates booking confirmation with a mock receipt."
    }

    fn input_schema(&self) -> &Value {
        static SCHEMA: Lazy<Value> = Lazy::new(|| {
            json!({
                "type": "object",
                "properties": {
                    "flight": {"type": "string", "description": "The chosen flight"},
                    "hotel": {"type": "string", "description": "The chosen hotel"},
                    "destination": {"type": "string", "description": "Destination name"}
                },
                "required": ["flight", "hotel", "destination"]
            })
        });
        &SCHEMA
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> Result<ToolOutput, ToolError> {
        let params: BookingParams = parse_params(self.name(), params)?;
        let receipt = booking_receipt(
            params.flight,
            params.hotel,
            &params.destination,
            &mut rand::thread_rng(),
        );
        tracing::info!(receipt = %receipt.receipt_id, session = ?context.session_id, "booking confirmed");
        ToolOutput::json(&receipt)
    }
}

#[derive(Deserialize)]
struct PlatformParams {
    platform: String,
    destination: String,
}

/// Simulated third-party platform connection
pub struct IntegratePlatform;

#[async_trait]
impl Tool for IntegratePlatform {
    fn name(&self) -> &str {
        "integrate_platform"
    }

    fn description(&self) -> &str {
        "Simulates integration with travel platforms."
    }

    fn input_schema(&self) -> &Value {
        static SCHEMA: Lazy<Value> = Lazy::new(|| {
            json!({
                "type": "object",
                "properties": {
                    "platform": {"type": "string", "description": "Skyscanner or Booking.com"},
                    "destination": {"type": "string", "description": "Destination name"}
                },
                "required": ["platform", "destination"]
            })
        });
        &SCHEMA
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        let params: PlatformParams = parse_params(self.name(), params)?;
        Ok(ToolOutput::text(platform_status(&params.platform, &params.destination)))
    }
}

#[derive(Deserialize)]
struct BudgetParams {
    flight_price: Value,
    hotel_price: Value,
    budget: Value,
}

/// Trip cost against the budget
pub struct ManageBudget;

#[async_trait]
impl Tool for ManageBudget {
    fn name(&self) -> &str {
        "manage_budget"
    }

    fn description(&self) -> &str {
        "Tracks trip costs against budget and suggests alternatives if over budget."
    }

    fn input_schema(&self) -> &Value {
        static SCHEMA: Lazy<Value> = Lazy::new(|| {
            json!({
                "type": "object",
                "properties": {
                    "flight_price": {"type": "string", "description": "Flight price as listed, e.g. \"$350 (\u{20b9}98,000 PKR)\""},
                    "hotel_price": {"type": "string", "description": "Hotel price as listed, e.g. \"\u{20b9}18,000 PKR/night\""},
                    "budget": {"type": "number", "description": "Budget in PKR"}
                },
                "required": ["flight_price", "hotel_price", "budget"]
            })
        });
        &SCHEMA
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        let params: BudgetParams = parse_params(self.name(), params)?;
        let verdict = match (params.flight_price.as_str(), params.hotel_price.as_str()) {
            (Some(flight), Some(hotel)) => check_budget(flight, hotel, &params.budget),
            _ => BUDGET_ERROR.to_string(),
        };
        Ok(ToolOutput::text(verdict))
    }
}
