//! Route handlers for the dashboard.

pub mod api;
pub mod dashboard;
pub mod health;
pub mod webhook;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(dashboard::dashboard_page).post(dashboard::send_form))
        .route("/sync", post(dashboard::sync_form))
        // Gateway push
        .route("/webhook/green", post(webhook::green_webhook))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/messages", get(api::messages_api))
        .route("/api/send", post(api::send_api))
        .route("/api/sync", post(api::sync_api))
}
