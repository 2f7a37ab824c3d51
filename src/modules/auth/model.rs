use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::email::EMAIL_REGEX;

/// Niveles de acceso de la aplicacion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rol {
    Admin,
    Coordinador,
    Alumno,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Coordinador => "COORDINADOR",
            Self::Alumno => "ALUMNO",
        }
    }
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "COORDINADOR" => Ok(Self::Coordinador),
            "ALUMNO" => Ok(Self::Alumno),
            otro => Err(format!("El rol {} no es un rol valido.", otro)),
        }
    }
}

/// Fila de la tabla de consulta de roles. El conjunto es fijo; los ids son
/// conocidos para que las referencias sobrevivan reinicios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolRegistro {
    pub id: Uuid,
    pub nombre: String,
}

pub mod roles_conocidos {
    use uuid::Uuid;

    pub const ADMIN: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000001);
    pub const COORDINADOR: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000002);
    pub const ALUMNO: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000003);
}

/// Usuario del sistema tal como se persiste. El campo `password` guarda el
/// hash bcrypt y nunca sale por la API (ver [`UsuarioPublico`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub email: String,
    pub nombre: String,
    pub password: String,
    pub rol: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Usuario {
    pub fn publico(&self, rol_nombre: &str) -> UsuarioPublico {
        UsuarioPublico {
            id: self.id,
            email: self.email.clone(),
            nombre: self.nombre.clone(),
            rol: rol_nombre.to_string(),
            created_at: self.created_at,
        }
    }
}

/// Representacion de un usuario en las respuestas de la API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPublico {
    pub id: Uuid,
    pub email: String,
    pub nombre: String,
    pub rol: String,
    pub created_at: DateTime<Utc>,
}

/// Claims del token de sesion.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Id del usuario.
    pub sub: String,
    pub email: String,
    pub rol: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoginDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegistroDto {
    pub nombre: Option<String>,
    #[validate(regex(path = *EMAIL_REGEX, message = "El email no es valido"))]
    pub email: Option<String>,
    #[validate(length(
        min = 8,
        max = 16,
        message = "La contraseña no puede ser mayor a 16 ni menor a 8 caracteres"
    ))]
    pub password: Option<String>,
    pub rol: Option<String>,
}

/// Resultado de un login exitoso: token de sesion y ruta de aterrizaje
/// segun el rol.
#[derive(Debug)]
pub struct LoginExitoso {
    pub token: String,
    pub ruta: Option<&'static str>,
}
