use crate::models::TripRequest;

/// Render the fixed packing prompt for a trip. Optional fields render empty.
pub fn build_prompt(trip: &TripRequest) -> String {
    let nights = trip
        .nights
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();

    format!(
        r#"Return JSON only.

Create packing suggestions for a trip with:
Destination: {destination}
Dates: {dates}
Nights: {nights}
Activities: {activities}
Notes: {notes}

Return JSON in this exact format:
{{
  "suggestions": [
    {{ "category": "Clothing", "item": "Socks", "qty": 5, "reason": "..." }},
    ...
  ]
}}

Rules:
- Include quantities when it makes sense
- Group into practical categories (Clothing, Toiletries, Tech, Outdoors, Misc)
- Keep it concise (max 40 items)
- No markdown, no extra keys, JSON only"#,
        destination = trip.destination.as_deref().unwrap_or_default(),
        dates = trip.dates.as_deref().unwrap_or_default(),
        nights = nights,
        activities = trip.activities().join(", "),
        notes = trip.notes.as_deref().unwrap_or_default(),
    )
}
