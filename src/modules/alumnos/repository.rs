use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::modules::alumnos::model::Alumno;
use crate::storage::{JsonStore, StorageError};

/// Resultado de una busqueda por id: el registro y su handle posicional
/// dentro de la coleccion, necesario para actualizar o eliminar.
#[derive(Debug, Clone)]
pub struct RegistroAlumno {
    pub indice: usize,
    pub alumno: Alumno,
}

/// Persistencia de alumnos sobre la coleccion `alumnos.json`.
///
/// El filtro de soft-delete se aplica en cada ruta de lectura: un registro
/// marcado como eliminado no es visible salvo que se pida explicitamente.
#[derive(Clone)]
pub struct AlumnoRepository {
    store: Arc<JsonStore<Alumno>>,
}

impl AlumnoRepository {
    pub async fn abrir(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let store = JsonStore::abrir(data_dir.as_ref().join("alumnos.json")).await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    pub async fn guardar(&self, alumno: Alumno) -> Result<Alumno, StorageError> {
        self.store
            .escribir(|alumnos| {
                alumnos.push(alumno.clone());
                Ok(alumno)
            })
            .await
    }

    /// Todos los alumnos no eliminados. Una coleccion vacia no es un error.
    pub async fn obtener_todos(&self) -> Vec<Alumno> {
        self.store
            .leer(|alumnos| {
                alumnos
                    .iter()
                    .filter(|a| !a.is_deleted)
                    .cloned()
                    .collect()
            })
            .await
    }

    pub async fn obtener_por_id(&self, id: Uuid) -> Option<RegistroAlumno> {
        self.store
            .leer(|alumnos| {
                alumnos
                    .iter()
                    .enumerate()
                    .find(|(_, a)| a.id == id && !a.is_deleted)
                    .map(|(indice, alumno)| RegistroAlumno {
                        indice,
                        alumno: alumno.clone(),
                    })
            })
            .await
    }

    /// Busqueda por email sin distinguir mayusculas, solo entre no eliminados.
    pub async fn buscar_por_email(&self, email: &str) -> Option<Alumno> {
        let buscado = email.to_lowercase();
        self.store
            .leer(|alumnos| {
                alumnos
                    .iter()
                    .find(|a| !a.is_deleted && a.email.to_lowercase() == buscado)
                    .cloned()
            })
            .await
    }

    pub async fn buscar_por_matricula(&self, matricula: &str) -> Option<Alumno> {
        self.store
            .leer(|alumnos| {
                alumnos
                    .iter()
                    .find(|a| !a.is_deleted && a.matricula == matricula)
                    .cloned()
            })
            .await
    }

    /// Reemplaza el registro en la posicion dada. El handle es invalido si la
    /// posicion no existe o si el registro que contiene ya no es el mismo.
    pub async fn actualizar(&self, indice: usize, alumno: Alumno) -> Result<Alumno, StorageError> {
        self.store
            .escribir(|alumnos| {
                match alumnos.get_mut(indice) {
                    Some(actual) if actual.id == alumno.id => {
                        *actual = alumno.clone();
                        Ok(alumno)
                    }
                    _ => Err(StorageError::HandleInvalido { indice }),
                }
            })
            .await
    }

    /// Marca el registro como eliminado con su marca de tiempo, sin borrarlo
    /// fisicamente. Devuelve el registro tal como estaba antes de marcarlo,
    /// o `None` si el handle no resuelve.
    pub async fn eliminar(&self, indice: usize) -> Result<Option<Alumno>, StorageError> {
        self.store
            .escribir(|alumnos| {
                let Some(actual) = alumnos.get_mut(indice) else {
                    return Ok(None);
                };
                if actual.is_deleted {
                    return Ok(None);
                }

                let previo = actual.clone();
                actual.is_deleted = true;
                actual.deleted_at = Some(Utc::now());
                Ok(Some(previo))
            })
            .await
    }

    /// Numero total de registros, incluidos los eliminados.
    #[cfg(test)]
    pub async fn total_incluyendo_eliminados(&self) -> usize {
        self.store.leer(<[Alumno]>::len).await
    }
}
