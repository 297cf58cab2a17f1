use serde::{Deserialize, Serialize};
use std::fmt;

/// Request payload for the packing-suggestions endpoint
///
/// Every field is optional at the wire level; [`TripRequest::is_valid`]
/// decides whether the trip is complete enough to prompt with.
#[derive(Debug, Default, Deserialize)]
pub struct TripRequest {
    pub destination: Option<String>,
    pub dates: Option<String>,
    pub nights: Option<Nights>,
    pub activities: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Trip length as sent by the caller, either `5` or `"5"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Nights {
    Count(serde_json::Number),
    Text(String),
}

impl Nights {
    /// Zero and the empty string count as "not given"
    pub fn is_present(&self) -> bool {
        match self {
            Nights::Count(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Nights::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Nights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nights::Count(n) => write!(f, "{}", n),
            Nights::Text(s) => f.write_str(s),
        }
    }
}

impl TripRequest {
    /// Requires a non-empty destination and a non-zero, non-empty nights value
    pub fn is_valid(&self) -> bool {
        let has_destination = self.destination.as_deref().is_some_and(|d| !d.is_empty());
        let has_nights = self.nights.as_ref().is_some_and(Nights::is_present);
        has_destination && has_nights
    }

    pub fn activities(&self) -> &[String] {
        self.activities.as_deref().unwrap_or_default()
    }
}

/// Shape requested from the model. Replies are relayed as-is, so this is
/// only used to describe and inspect well-formed answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<serde_json::Number>,
    pub reason: String,
}
