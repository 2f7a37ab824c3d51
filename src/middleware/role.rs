use tracing::info;

use crate::middleware::auth::RolExtraido;
use crate::modules::auth::model::Rol;
use crate::utils::errors::AppError;

/// Filtro de rol por ruta: 400 si el rol nunca se adjunto a la solicitud,
/// 403 si el rol no esta en el conjunto permitido.
pub fn validar_rol(rol: &RolExtraido, permitidos: &[Rol]) -> Result<(), AppError> {
    let Some(rol) = rol.0 else {
        return Err(AppError::RolAusente);
    };

    info!(rol = %rol, permitidos = ?permitidos, "Intento de acceso");

    if permitidos.contains(&rol) {
        return Ok(());
    }

    Err(AppError::NoAutorizado)
}
