//! Almacenamiento JSON respaldado en archivo.
//!
//! Cada coleccion es un solo arreglo JSON en disco. El arreglo se carga una
//! vez en el arranque, se sirve desde memoria detras de un candado de
//! lectura-escritura y se reescribe completo tras cada mutacion exitosa.

mod json_store;

pub use json_store::JsonStore;

use std::fmt;

/// Errores de las operaciones de almacenamiento.
#[derive(Debug)]
pub enum StorageError {
    /// Error de E/S del sistema de archivos.
    Io(std::io::Error),

    /// El arreglo en disco no se pudo parsear o serializar.
    Serde(serde_json::Error),

    /// Un handle posicional ya no resuelve al registro esperado.
    HandleInvalido { indice: usize },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Error de E/S en el almacenamiento: {}", e),
            Self::Serde(e) => write!(f, "Error al (de)serializar la coleccion: {}", e),
            Self::HandleInvalido { indice } => {
                write!(f, "El handle de almacenamiento {} ya no es valido", indice)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e)
    }
}
