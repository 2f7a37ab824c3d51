use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{iniciar_sesion, registro};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(iniciar_sesion))
        .route("/registro", post(registro))
}
