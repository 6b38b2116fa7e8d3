//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Product routes at the root plus `/health` and `/ready`.
pub fn routes(state: &AppState) -> Router {
    products::router(state).merge(health::router(state.clone()))
}
