use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::interno(anyhow::anyhow!("No se pudo hashear la contraseña: {}", e)))
}

pub fn verificar_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::interno(anyhow::anyhow!("No se pudo verificar la contraseña: {}", e)))
}
