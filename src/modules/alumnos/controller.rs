use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::RolExtraido;
use crate::middleware::role::validar_rol;
use crate::modules::alumnos::model::{ActualizarAlumnoDto, CrearAlumnoDto};
use crate::modules::auth::model::Rol;
use crate::state::AppState;
use crate::utils::errors::{AppError, errores_a_json};

/// POST /api/alumnos
#[instrument(skip(state, dto))]
pub async fn crear_alumno(
    State(state): State<AppState>,
    rol: RolExtraido,
    Json(dto): Json<CrearAlumnoDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validar_rol(&rol, &[Rol::Admin, Rol::Coordinador])?;

    match state.alumnos.crear_alumno(dto).await {
        Ok(alumno) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "mensaje": "Alumno creado correctamente",
                "data": alumno,
            })),
        )),
        Err(AppError::Validacion(errores)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "mensaje": "Ocurrio un error al crear el alumno",
                "error": errores_a_json(&errores),
            })),
        )),
        Err(e) => Err(e),
    }
}

/// GET /api/alumnos
#[instrument(skip(state))]
pub async fn obtener_alumnos(
    State(state): State<AppState>,
    rol: RolExtraido,
) -> Result<Json<Value>, AppError> {
    validar_rol(&rol, &[Rol::Coordinador])?;

    let alumnos = state.alumnos.obtener_todos().await;

    if alumnos.is_empty() {
        return Ok(Json(json!({
            "msg": "No se encontraron alumnos registrados",
            "data": [],
        })));
    }

    Ok(Json(json!({
        "msg": "Operacion exitosa",
        "data": alumnos,
    })))
}

/// GET /api/alumnos/{id}
#[instrument(skip(state))]
pub async fn obtener_alumno_por_id(
    State(state): State<AppState>,
    rol: RolExtraido,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    validar_rol(&rol, &[Rol::Coordinador, Rol::Alumno])?;

    let alumno = state.alumnos.obtener_alumno(id).await.ok_or_else(|| {
        AppError::no_encontrado(format!("No se encontro el alumno con el {} solicitado.", id))
    })?;

    Ok(Json(json!({
        "mensaje": "Alumno encontrado",
        "data": alumno,
    })))
}

/// PUT /api/alumnos/{id}
#[instrument(skip(state, dto))]
pub async fn actualizar_alumno(
    State(state): State<AppState>,
    rol: RolExtraido,
    Path(id): Path<Uuid>,
    Json(dto): Json<ActualizarAlumnoDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validar_rol(&rol, &[Rol::Alumno, Rol::Coordinador])?;

    match state.alumnos.actualizar_alumno(id, dto).await {
        Ok(alumno) => Ok((
            StatusCode::OK,
            Json(json!({
                "mensaje": "Informacion del alumno actualizada con exito",
                "data": alumno,
            })),
        )),
        Err(AppError::Validacion(errores)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "mensaje": "Error al actualizar al alumno",
                "error": errores_a_json(&errores),
            })),
        )),
        Err(e) => Err(e),
    }
}

/// DELETE /api/alumnos/{id}
#[instrument(skip(state))]
pub async fn eliminar_alumno(
    State(state): State<AppState>,
    rol: RolExtraido,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    validar_rol(&rol, &[Rol::Coordinador])?;

    let eliminado = state.alumnos.eliminar_alumno(id).await?;

    Ok(Json(json!({
        "mensaje": "Alumno eliminado correctamente",
        "data": eliminado,
    })))
}
