use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

/// Aplana los errores del derive de `validator` a una lista de mensajes.
pub fn formatear_errores(errores: &ValidationErrors) -> Vec<String> {
    errores
        .field_errors()
        .iter()
        .flat_map(|(campo, errores)| {
            errores.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|mensaje| mensaje.to_string())
                    .unwrap_or_else(|| format!("El campo {} es invalido", campo))
            })
        })
        .collect()
}

/// Los errores de validacion se reportan como cadena cuando hay uno solo y
/// como lista cuando hay varios.
pub fn errores_a_json(errores: &[String]) -> serde_json::Value {
    if errores.len() == 1 {
        json!(errores[0])
    } else {
        json!(errores)
    }
}

/// Taxonomia de errores de la aplicacion. Cada variante corresponde a uno
/// de los sobres JSON `{mensaje, error}` que expone la API.
#[derive(Debug)]
pub enum AppError {
    /// Fallas de validacion por campo, acumuladas en lote.
    Validacion(Vec<String>),
    /// Recurso inexistente o ya eliminado logicamente.
    NoEncontrado(String),
    /// Credenciales invalidas durante el login.
    Autenticacion(String),
    /// Token de autorizacion malformado o no reconocido.
    TokenInvalido(String),
    /// La solicitud llego sin etiqueta de rol.
    RolAusente,
    /// Autenticado pero el rol no esta permitido en la ruta.
    NoAutorizado,
    /// Falla de almacenamiento u otra infraestructura. Se loguea y sale como 500.
    Interno(anyhow::Error),
}

impl AppError {
    pub fn validacion(errores: Vec<String>) -> Self {
        Self::Validacion(errores)
    }

    pub fn no_encontrado(mensaje: impl Into<String>) -> Self {
        Self::NoEncontrado(mensaje.into())
    }

    pub fn autenticacion(error: impl Into<String>) -> Self {
        Self::Autenticacion(error.into())
    }

    pub fn token_invalido(error: impl Into<String>) -> Self {
        Self::TokenInvalido(error.into())
    }

    pub fn interno<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Interno(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validacion(errores) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "mensaje": "La solicitud contiene datos invalidos",
                    "error": errores_a_json(&errores),
                })),
            )
                .into_response(),
            Self::NoEncontrado(mensaje) => {
                (StatusCode::NOT_FOUND, Json(json!({ "mensaje": mensaje }))).into_response()
            }
            Self::Autenticacion(error) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "mensaje": "No se logro completar la autenticación",
                    "error": error,
                })),
            )
                .into_response(),
            Self::TokenInvalido(error) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "mensaje": "Token invalido",
                    "error": error,
                })),
            )
                .into_response(),
            Self::RolAusente => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "mensaje": "No se logro obtener el tipo-usuario" })),
            )
                .into_response(),
            Self::NoAutorizado => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "mensaje": "Acceso no autorizado. Tipo de usuario no permitido."
                })),
            )
                .into_response(),
            Self::Interno(error) => {
                tracing::error!(error = %error, "Error interno del servidor");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "mensaje": "Error interno del servidor",
                        "error": error.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<crate::storage::StorageError> for AppError {
    fn from(err: crate::storage::StorageError) -> Self {
        Self::interno(err)
    }
}
