use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::instrument;

use crate::modules::auth::model::{LoginDto, RegistroDto};
use crate::state::AppState;
use crate::utils::errors::{AppError, errores_a_json};

/// POST /api/autenticacion/login
#[instrument(skip(state, dto))]
pub async fn iniciar_sesion(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let sesion = state.auth.iniciar_sesion(dto).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "mensaje": "Autenticación exitosa",
            "data": { "token": sesion.token, "ruta": sesion.ruta },
        })),
    ))
}

/// POST /api/autenticacion/registro
#[instrument(skip(state, dto))]
pub async fn registro(
    State(state): State<AppState>,
    Json(dto): Json<RegistroDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    match state.auth.registrar(dto).await {
        Ok(usuario) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "mensaje": "Usuario registrado correctamente",
                "data": usuario,
            })),
        )),
        Err(AppError::Validacion(errores)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "mensaje": "No se pudo registrar el usuario",
                "error": errores_a_json(&errores),
            })),
        )),
        Err(e) => Err(e),
    }
}
