//! roulette-server - HTTP surface for the weighted food roulette.
//!
//! Exposes the item store and selector from `roulette-core` over three
//! endpoints:
//!
//! - `GET /items` - the stored list in stable order
//! - `POST /items/replace` - transactional wholesale replacement
//! - `POST /items/select` - one weighted pick plus the list it was
//!   drawn from
//!
//! The browser-side wheel consumes these endpoints only; no rendering
//! concerns live in this crate.
//!
//! # Modules
//!
//! - [`error`]: HTTP error taxonomy and status-code mapping
//! - [`handlers`]: the endpoint handlers and their wire DTOs
//! - [`state`]: shared application state

pub mod error;
pub mod handlers;
pub mod state;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Builds the service router with all routes wired to `state`.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/items", get(handlers::list_items))
        .route("/items/replace", post(handlers::replace_items))
        .route("/items/select", post(handlers::select_item))
        .with_state(state)
}
