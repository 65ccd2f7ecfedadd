//! Flight, hotel and alert tables for the travel designer.
//!
//! Prices are 2025 estimates for travellers leaving from Pakistan. Every
//! lookup lowercases the destination and falls back to a default entry, so
//! callers always get something to show.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Destinations with dedicated entries in every table
pub const DESTINATIONS: [&str; 8] = [
    "dubai",
    "istanbul",
    "maldives",
    "hunza",
    "murree",
    "skardu",
    "neelum valley",
    "khanpur dam",
];

/// One way of getting to a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRecord {
    #[serde(rename = "from")]
    pub origin: &'static str,
    pub airline: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
}

/// A place to stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelRecord {
    pub name: &'static str,
    pub price: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

const fn flight(
    origin: &'static str,
    airline: &'static str,
    price: &'static str,
    duration: &'static str,
) -> FlightRecord {
    FlightRecord {
        origin,
        airline,
        price,
        duration,
    }
}

const fn hotel(name: &'static str, price: &'static str, kind: &'static str) -> HotelRecord {
    HotelRecord { name, price, kind }
}

pub static DEFAULT_FLIGHTS: [FlightRecord; 1] = [flight("N/A", "N/A", "Research flights", "N/A")];

pub static DEFAULT_HOTELS: [HotelRecord; 1] = [hotel("Research hotels", "N/A", "N/A")];

pub const DEFAULT_ALERT: &str = "No specific alerts. Check local conditions before travel.";

static FLIGHTS: Lazy<HashMap<&'static str, Vec<FlightRecord>>> = Lazy::new(|| {
    HashMap::from([
        (
            "dubai",
            vec![
                flight("Karachi", "Emirates", "$350 (\u{20b9}98,000 PKR)", "2h 15m"),
                flight("Lahore", "Flydubai", "$300 (\u{20b9}84,000 PKR)", "2h 30m"),
            ],
        ),
        (
            "istanbul",
            vec![
                flight("Karachi", "Turkish Airlines", "$450 (\u{20b9}126,000 PKR)", "5h 45m"),
                flight("Islamabad", "PIA", "$400 (\u{20b9}112,000 PKR)", "6h"),
            ],
        ),
        (
            "maldives",
            vec![
                flight("Karachi", "Qatar Airways", "$600 (\u{20b9}168,000 PKR)", "5h via Doha"),
                flight("Lahore", "Emirates", "$650 (\u{20b9}182,000 PKR)", "5h 30m"),
            ],
        ),
        (
            "hunza",
            vec![
                flight("Islamabad", "Bus (NATCO)", "\u{20b9}6,000 PKR", "14h"),
                flight("Karachi", "PIA (to Gilgit)", "\u{20b9}25,000 PKR", "2h + 3h road"),
            ],
        ),
        (
            "murree",
            vec![
                flight("Islamabad", "Bus (Daewoo)", "\u{20b9}5,000 PKR", "2h"),
                flight("Lahore", "Bus", "\u{20b9}7,000 PKR", "5h"),
            ],
        ),
        (
            "skardu",
            vec![
                flight("Islamabad", "PIA", "\u{20b9}20,000 PKR", "1h"),
                flight("Karachi", "Serene Air", "\u{20b9}30,000 PKR", "2h"),
            ],
        ),
        (
            "neelum valley",
            vec![
                flight("Islamabad", "Bus", "\u{20b9}3,000 PKR", "5h"),
                flight("Lahore", "Bus", "\u{20b9}6,000 PKR", "8h"),
            ],
        ),
        (
            "khanpur dam",
            vec![
                flight("Islamabad", "Bus", "\u{20b9}2,000 PKR", "1h"),
                flight("Rawalpindi", "Bus", "\u{20b9}2,000 PKR", "1h"),
            ],
        ),
    ])
});

static HOTELS: Lazy<HashMap<&'static str, Vec<HotelRecord>>> = Lazy::new(|| {
    HashMap::from([
        (
            "dubai",
            vec![
                hotel("Burj Al Arab", "$500/night (\u{20b9}140,000 PKR)", "Luxury"),
                hotel("Premier Inn", "$80/night (\u{20b9}22,400 PKR)", "Budget"),
            ],
        ),
        (
            "istanbul",
            vec![
                hotel("Pera Palace", "$120/night (\u{20b9}33,600 PKR)", "Historic"),
                hotel("Ibis Istanbul", "$60/night (\u{20b9}16,800 PKR)", "Budget"),
            ],
        ),
        (
            "maldives",
            vec![
                hotel("Sun Siyam Resort", "$250/night (\u{20b9}70,000 PKR)", "Beachfront"),
                hotel("Guesthouse Male", "$100/night (\u{20b9}28,000 PKR)", "Budget"),
            ],
        ),
        (
            "hunza",
            vec![
                hotel("Serena Hotel", "\u{20b9}18,000 PKR/night", "Luxury"),
                hotel("Local Guesthouse", "\u{20b9}5,000 PKR/night", "Budget"),
            ],
        ),
        (
            "murree",
            vec![
                hotel("PC Bhurban", "\u{20b9}15,000 PKR/night", "Luxury"),
                hotel("Hilltop Hotel", "\u{20b9}6,000 PKR/night", "Budget"),
            ],
        ),
        (
            "skardu",
            vec![
                hotel("Shangrila Resort", "\u{20b9}20,000 PKR/night", "Luxury"),
                hotel("Skardu Inn", "\u{20b9}7,000 PKR/night", "Budget"),
            ],
        ),
        (
            "neelum valley",
            vec![
                hotel("Neelum View Hotel", "\u{20b9}4,000 PKR/night", "Budget"),
                hotel("Keran Resort", "\u{20b9}6,000 PKR/night", "Mid-range"),
            ],
        ),
        (
            "khanpur dam",
            vec![
                hotel("Khanpur Lake Resort", "\u{20b9}3,000 PKR/night", "Budget"),
                hotel("Local Campsite", "\u{20b9}2,000 PKR/night", "Budget"),
            ],
        ),
    ])
});

static ALERTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dubai", "Weather: Sunny, 35\u{b0}C. No disruptions expected."),
        (
            "istanbul",
            "Flight delays possible due to high traffic. Check status before departure.",
        ),
        ("maldives", "Monsoon season alert: Expect occasional rain."),
        ("hunza", "Road conditions: Clear. Book buses early for peak season."),
        ("murree", "Fog alert: Drive cautiously in early mornings."),
        (
            "skardu",
            "Flight cancellations possible due to weather. Confirm with airline.",
        ),
        ("neelum valley", "Road access good. Book early for peak season."),
        ("khanpur dam", "Safe for boating. Check local safety guidelines."),
    ])
});

pub fn flights_for(destination: &str) -> &'static [FlightRecord] {
    FLIGHTS
        .get(destination.to_lowercase().as_str())
        .map(Vec::as_slice)
        .unwrap_or(&DEFAULT_FLIGHTS)
}

pub fn hotels_for(destination: &str) -> &'static [HotelRecord] {
    HOTELS
        .get(destination.to_lowercase().as_str())
        .map(Vec::as_slice)
        .unwrap_or(&DEFAULT_HOTELS)
}

pub fn alert_for(destination: &str) -> &'static str {
    ALERTS
        .get(destination.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_ALERT)
}

/// Known destination mentioned earliest in `text` (already lowercased).
pub fn detect_destination(text: &str) -> Option<&'static str> {
    DESTINATIONS
        .iter()
        .filter_map(|d| text.find(d).map(|at| (at, *d)))
        .min_by_key(|(at, _)| *at)
        .map(|(_, d)| d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_destination_has_every_record() {
        for destination in DESTINATIONS {
            assert_eq!(flights_for(destination).len(), 2, "{destination}");
            assert_eq!(hotels_for(destination).len(), 2, "{destination}");
            assert_ne!(alert_for(destination), DEFAULT_ALERT, "{destination}");
        }
    }

    #[test]
    fn test_lookups_ignore_case() {
        assert_eq!(flights_for("Dubai")[0].airline, "Emirates");
        assert_eq!(hotels_for("NEELUM VALLEY")[1].name, "Keran Resort");
        assert_eq!(alert_for("Skardu"), alert_for("skardu"));
    }

    #[test]
    fn test_unknown_destination_gets_defaults() {
        assert_eq!(flights_for("paris"), &DEFAULT_FLIGHTS);
        assert_eq!(hotels_for("paris")[0].name, "Research hotels");
        assert_eq!(alert_for("paris"), DEFAULT_ALERT);
    }

    #[test]
    fn test_records_serialize_with_wire_names() {
        let json = serde_json::to_value(&flights_for("murree")[0]).unwrap();
        assert_eq!(json["from"], "Islamabad");
        let json = serde_json::to_value(&hotels_for("murree")[0]).unwrap();
        assert_eq!(json["type"], "Luxury");
    }

    #[test]
    fn test_detect_destination() {
        assert_eq!(detect_destination("plan a trip to neelum valley"), Some("neelum valley"));
        assert_eq!(detect_destination("i want nature"), None);
        assert_eq!(detect_destination("hunza or dubai?"), Some("hunza"));
        assert_eq!(detect_destination("dubai, then skardu"), Some("dubai"));
    }
}
