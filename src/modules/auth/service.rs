use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{LoginDto, LoginExitoso, RegistroDto, Rol, Usuario, UsuarioPublico};
use crate::modules::auth::repository::{RolRepository, UsuarioRepository};
use crate::utils::errors::{AppError, formatear_errores};
use crate::utils::jwt::crear_token;
use crate::utils::password::{hash_password, verificar_password};

/// Reglas de negocio de autenticacion y registro de usuarios.
#[derive(Clone)]
pub struct AuthService {
    usuarios: UsuarioRepository,
    roles: RolRepository,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(usuarios: UsuarioRepository, roles: RolRepository, jwt_config: JwtConfig) -> Self {
        Self {
            usuarios,
            roles,
            jwt_config,
        }
    }

    /// Verifica credenciales y emite un token de sesion junto con la ruta
    /// de aterrizaje que corresponde al rol.
    #[instrument(skip(self, dto))]
    pub async fn iniciar_sesion(&self, dto: LoginDto) -> Result<LoginExitoso, AppError> {
        let (email, password) = match (no_vacio(dto.email), no_vacio(dto.password)) {
            (Some(email), Some(password)) => (email, password),
            _ => {
                return Err(AppError::autenticacion(
                    "Correo y contraseña son requeridos",
                ));
            }
        };

        let usuario = self
            .usuarios
            .buscar_por_email(&email)
            .await
            .ok_or_else(|| {
                AppError::autenticacion(format!(
                    "No se encontro una cuenta asociada al email proporcionado {}",
                    email
                ))
            })?;

        if !verificar_password(&password, &usuario.password)? {
            return Err(AppError::autenticacion("Contraseña incorrecta"));
        }

        let rol_nombre = self
            .roles
            .buscar_por_id(usuario.rol)
            .map(|rol| rol.nombre)
            .unwrap_or_default();

        let token = crear_token(usuario.id, &usuario.email, &rol_nombre, &self.jwt_config)?;
        let ruta = ruta_home(&rol_nombre);

        Ok(LoginExitoso { token, ruta })
    }

    /// Registra un usuario nuevo. Los errores de validacion se acumulan y se
    /// devuelven como lote; el password se hashea antes de persistir.
    #[instrument(skip(self, dto))]
    pub async fn registrar(&self, dto: RegistroDto) -> Result<UsuarioPublico, AppError> {
        let mut errores = match dto.validate() {
            Ok(()) => Vec::new(),
            Err(e) => formatear_errores(&e),
        };

        if dto.nombre.as_deref().is_none_or(|n| n.trim().is_empty()) {
            errores.push("El campo nombre es obligatorio".to_string());
        }
        if dto.email.as_deref().is_none_or(|e| e.trim().is_empty()) {
            errores.push("El campo email es obligatorio".to_string());
        }
        if dto.password.is_none() {
            errores.push(
                "La contraseña no puede ser mayor a 16 ni menor a 8 caracteres".to_string(),
            );
        }
        match dto.rol.as_deref() {
            None => errores.push("El rol es obligatorio".to_string()),
            // El registro solo admite cuentas administrativas.
            Some(rol) => match rol.parse::<Rol>() {
                Ok(Rol::Admin) | Ok(Rol::Coordinador) => {}
                _ => errores.push("Rol invalido".to_string()),
            },
        }

        if !errores.is_empty() {
            return Err(AppError::validacion(errores));
        }

        // Despues de la validacion los campos estan presentes.
        let nombre = dto.nombre.unwrap_or_default();
        let email = dto.email.unwrap_or_default().to_lowercase();
        let password = dto.password.unwrap_or_default();
        let rol = dto.rol.unwrap_or_default();

        if self.usuarios.buscar_por_email(&email).await.is_some() {
            return Err(AppError::validacion(vec![
                "El email ya esta registrado.".to_string(),
            ]));
        }

        let rol_registro = self.roles.buscar_por_nombre(&rol).ok_or_else(|| {
            AppError::validacion(vec![format!("El rol {} no es un rol valido.", rol)])
        })?;

        let usuario = Usuario {
            id: Uuid::new_v4(),
            email,
            nombre,
            password: hash_password(&password)?,
            rol: rol_registro.id,
            created_at: Utc::now(),
        };

        let guardado = self.usuarios.agregar(usuario).await?;
        Ok(guardado.publico(&rol_registro.nombre))
    }
}

fn no_vacio(valor: Option<String>) -> Option<String> {
    valor.filter(|v| !v.trim().is_empty())
}

/// Ruta de aterrizaje post-login por rol. Los roles sin vista administrativa
/// no tienen ruta.
pub fn ruta_home(rol: &str) -> Option<&'static str> {
    match rol {
        "ADMIN" => Some("/admin/home"),
        "COORDINADOR" => Some("/coordinador/home"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruta_home_por_rol() {
        assert_eq!(ruta_home("ADMIN"), Some("/admin/home"));
        assert_eq!(ruta_home("COORDINADOR"), Some("/coordinador/home"));
        assert_eq!(ruta_home("ALUMNO"), None);
        assert_eq!(ruta_home(""), None);
    }
}
