use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::utils::errors::AppError;

/// Emite un token de sesion para un usuario autenticado. Los claims llevan
/// el id, email, nombre de rol y momento de emision.
pub fn crear_token(
    usuario_id: Uuid,
    email: &str,
    rol: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let ahora = Utc::now().timestamp() as usize;
    let exp = ahora + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: usuario_id.to_string(),
        email: email.to_string(),
        rol: rol.to_string(),
        iat: ahora,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::interno(anyhow::anyhow!("No se pudo generar el token: {}", e)))
}

pub fn verificar_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::token_invalido("Token invalido o expirado"))
}
