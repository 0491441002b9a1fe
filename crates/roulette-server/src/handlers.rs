//! Request handlers for the three item endpoints.
//!
//! Handlers are deliberately thin: one store round trip each, plus a
//! single draw for select. The select handler computes the draw over the
//! exact list it just read and echoes that list back, so the client's
//! wheel layout and the server's pick always agree on item positions.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use roulette_core::{Item, selector};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Confirmation body for a successful replacement.
#[derive(Debug, Serialize)]
pub struct ReplaceResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Response body for a selection: the pick plus the list it was drawn
/// from.
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    /// Label of the selected item.
    pub selected: String,
    /// The full list the draw was computed over, in stored order.
    pub items: Vec<Item>,
}

/// `GET /items` - returns the stored list in stable order.
///
/// # Errors
///
/// Returns 500 if the backing store is unreachable.
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.get_all()?;
    debug!(count = items.len(), "listed items");
    Ok(Json(items))
}

/// `POST /items/replace` - atomically replaces the stored list.
///
/// The extractor result is taken as a `Result` so that a body that is
/// not a JSON array of items (axum's stock rejection would be a 422
/// with a plain-text body) surfaces as a 400 with the same
/// `{"error": ...}` shape as every other client error.
///
/// # Errors
///
/// Returns 400 if the body is not a non-empty array of valid items
/// (nothing is written), 500 if the transaction fails (rolled back).
pub async fn replace_items(
    State(state): State<AppState>,
    body: Result<Json<Vec<Item>>, JsonRejection>,
) -> Result<Json<ReplaceResponse>, ApiError> {
    let Json(new_items) = body.map_err(|rejection| {
        warn!(error = %rejection, "replace body rejected");
        ApiError::InvalidPayload(rejection.body_text())
    })?;

    if let Err(err) = state.store.replace_all(&new_items) {
        warn!(error = %err, "replace rejected");
        return Err(err.into());
    }

    info!(count = new_items.len(), "items replaced");
    Ok(Json(ReplaceResponse {
        message: "items replaced".to_string(),
    }))
}

/// `POST /items/select` - draws one weighted pick from the current list.
///
/// # Errors
///
/// Returns 500 if the list is empty or the store fails.
pub async fn select_item(State(state): State<AppState>) -> Result<Json<SelectResponse>, ApiError> {
    let items = state.store.get_all()?;

    let selected = selector::spin(&items, &mut rand::thread_rng())?
        .label
        .clone();
    debug!(selected = %selected, "item selected");

    Ok(Json(SelectResponse { selected, items }))
}
