use std::sync::Arc;

use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use gurudev_enquiry::{InFlight, SubmitEnquiry};
use sqlx::SqlitePool;

use crate::template::{NotFoundTemplate, Template};

mod contact;
mod health;

pub use contact::{ContactFormView, FieldView};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub submitter: Arc<dyn SubmitEnquiry>,
    pub in_flight: InFlight,
    pub pool: SqlitePool,
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, template.render(NotFoundTemplate))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(contact::page))
        .route("/contact", get(contact::page).post(contact::action))
        .fallback(fallback)
        .nest_service("/static", crate::assets::AssetsService::new())
        .with_state(app_state)
}
