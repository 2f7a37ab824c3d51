use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::validar_token;
use crate::state::AppState;

use super::controller::{
    actualizar_alumno, crear_alumno, eliminar_alumno, obtener_alumno_por_id, obtener_alumnos,
};

pub fn init_alumnos_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_alumno).get(obtener_alumnos))
        .route(
            "/{id}",
            get(obtener_alumno_por_id)
                .put(actualizar_alumno)
                .delete(eliminar_alumno),
        )
        .route_layer(middleware::from_fn(validar_token))
}
