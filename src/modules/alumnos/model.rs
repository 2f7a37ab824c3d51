use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::email::EMAIL_REGEX;

/// Estado academico de un alumno. Todas las transiciones entre estados estan
/// permitidas; solo se rechazan nombres de estado desconocidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estado {
    #[serde(rename = "activo")]
    Activo,
    #[serde(rename = "inactivo")]
    Inactivo,
    #[serde(rename = "graduado")]
    Graduado,
    #[serde(rename = "bajaTemporal")]
    BajaTemporal,
}

impl Estado {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activo => "activo",
            Self::Inactivo => "inactivo",
            Self::Graduado => "graduado",
            Self::BajaTemporal => "bajaTemporal",
        }
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Estado {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activo" => Ok(Self::Activo),
            "inactivo" => Ok(Self::Inactivo),
            "graduado" => Ok(Self::Graduado),
            "bajaTemporal" => Ok(Self::BajaTemporal),
            otro => Err(format!("Estado invalido: {}", otro)),
        }
    }
}

/// Registro de un alumno tal como se persiste y se expone por la API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alumno {
    pub id: Uuid,
    pub matricula: String,
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub fecha_nacimiento: NaiveDate,
    pub email: String,
    pub carrera_programa: String,
    pub semestre: u32,
    pub fecha_ingreso: NaiveDate,
    pub telefono: Option<String>,
    pub perfil: Option<String>,
    pub estado: Estado,
    pub materias_inscritas: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Alumno {
    /// Cambia el estado del alumno. Un nombre de estado desconocido se
    /// rechaza y el estado actual se conserva.
    pub fn cambiar_estado(&mut self, nuevo: &str) -> Result<(), String> {
        match nuevo.parse::<Estado>() {
            Ok(estado) => {
                self.estado = estado;
                Ok(())
            }
            Err(mensaje) => {
                tracing::warn!(estado = nuevo, "Estado invalido. El estado no fue cambiado.");
                Err(mensaje)
            }
        }
    }

    /// Inscribe una materia. Una materia ya inscrita se ignora.
    pub fn inscribir_materia(&mut self, materia: &str) {
        if self.materias_inscritas.iter().any(|m| m == materia) {
            tracing::warn!(materia, "La materia ya esta inscrita");
            return;
        }
        self.materias_inscritas.push(materia.to_string());
    }
}

/// Campos de entrada para crear un alumno. Todos opcionales a nivel de
/// deserializacion para poder reportar de una vez cada campo faltante.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearAlumnoDto {
    pub nombre: Option<String>,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
    pub fecha_nacimiento: Option<String>,
    #[validate(regex(path = *EMAIL_REGEX, message = "El email no es un email valido"))]
    pub email: Option<String>,
    pub carrera_programa: Option<String>,
    #[validate(range(min = 1, message = "El valor del semestre no es valido."))]
    pub semestre: Option<u32>,
    pub fecha_ingreso: Option<String>,
    pub telefono: Option<String>,
    pub perfil: Option<String>,
}

/// Parche explicito para actualizar un alumno: solo los campos presentes se
/// aplican sobre el registro actual. La matricula, la fecha de ingreso y el
/// id no son modificables.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarAlumnoDto {
    pub nombre: Option<String>,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
    pub fecha_nacimiento: Option<String>,
    #[validate(regex(path = *EMAIL_REGEX, message = "El email no es un email valido"))]
    pub email: Option<String>,
    pub carrera_programa: Option<String>,
    #[validate(range(min = 1, message = "El valor del semestre no es valido."))]
    pub semestre: Option<u32>,
    pub telefono: Option<String>,
    pub perfil: Option<String>,
    pub estado: Option<String>,
    pub materias_inscritas: Option<Vec<String>>,
}

/// Fecha en formato ISO `YYYY-MM-DD`.
pub fn parsear_fecha(valor: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(valor.trim(), "%Y-%m-%d").ok()
}
