use axum::{body::Bytes, extract::State, response::Json};
use serde_json::Value;
use tracing::{debug, info};

use crate::app::AppState;
use crate::config::API_KEY_VAR;
use crate::error::{AppError, AppResult};
use crate::models::TripRequest;
use crate::prompt::build_prompt;

/// Liveness probe
pub async fn health_check() -> &'static str {
    debug!("Health check endpoint called");
    "OK"
}

/// Builds a packing prompt from the trip, asks the model, and relays its
/// JSON reply unchanged
pub async fn packing_suggestions(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let trip = parse_trip(&body)?;

    if !trip.is_valid() {
        return Err(AppError::MissingTripFields);
    }

    info!(
        destination = trip.destination.as_deref().unwrap_or_default(),
        activities = trip.activities().len(),
        "Packing suggestions requested"
    );

    let prompt = build_prompt(&trip);

    let generator = state
        .generator
        .as_ref()
        .ok_or(AppError::MissingCredential(API_KEY_VAR))?;

    let text = generator.generate(&prompt).await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(parsed) => {
            info!("Relaying model reply");
            Ok(Json(parsed))
        }
        Err(e) => {
            debug!("Model reply failed to parse: {}", e);
            Err(AppError::InvalidModelJson { raw: text })
        }
    }
}

/// An empty body counts as an empty trip
fn parse_trip(body: &[u8]) -> AppResult<TripRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TripRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))
}
