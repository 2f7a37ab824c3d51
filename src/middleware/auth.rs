use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::modules::auth::model::Rol;
use crate::utils::errors::AppError;

/// Valida el header `Authorization` y deriva el rol del usuario a partir del
/// contenido del token, por convencion de nombres:
///
/// - contiene `tipo1` → ADMIN
/// - contiene `tipo2` → COORDINADOR
/// - contiene `tipo3` → ALUMNO
///
/// Cualquier otro contenido se rechaza con 401. El rol derivado se adjunta a
/// la solicitud como extension para que las rutas apliquen su propio filtro.
pub async fn validar_token(mut req: Request, next: Next) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|valor| valor.to_str().ok())
        .ok_or_else(|| AppError::token_invalido("Falta el header authorization"))?;

    let rol = derivar_rol(authorization)
        .ok_or_else(|| AppError::token_invalido("El token ha sido manipulado"))?;

    req.extensions_mut().insert(rol);
    Ok(next.run(req).await)
}

pub fn derivar_rol(token: &str) -> Option<Rol> {
    if token.contains("tipo1") {
        Some(Rol::Admin)
    } else if token.contains("tipo2") {
        Some(Rol::Coordinador)
    } else if token.contains("tipo3") {
        Some(Rol::Alumno)
    } else {
        None
    }
}

/// Rol adjuntado a la solicitud por [`validar_token`]. `None` cuando la ruta
/// no paso por el middleware de token.
#[derive(Debug, Clone)]
pub struct RolExtraido(pub Option<Rol>);

impl<S> FromRequestParts<S> for RolExtraido
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Rol>().copied()))
    }
}
