use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::RwLock;

use super::StorageError;

/// Coleccion respaldada por un solo archivo con un arreglo JSON.
///
/// Las lecturas se sirven desde memoria. Las mutaciones corren sobre una
/// copia del arreglo, se escriben a disco y solo entonces reemplazan el
/// estado en memoria; una escritura fallida no desincroniza memoria y disco.
pub struct JsonStore<T> {
    path: PathBuf,
    registros: RwLock<Vec<T>>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Abre (o crea) la coleccion en `path`. Un archivo inexistente es una
    /// coleccion vacia, nunca un error.
    pub async fn abrir(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(padre) = path.parent() {
            fs::create_dir_all(padre).await?;
        }

        let registros = match fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => serde_json::from_slice(&bytes)?,
            Ok(_) => Vec::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            registros: RwLock::new(registros),
        })
    }

    /// Ejecuta una clausura de solo lectura sobre los registros actuales.
    pub async fn leer<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let registros = self.registros.read().await;
        f(&registros)
    }

    /// Ejecuta una clausura mutante y reescribe el archivo completo.
    pub async fn escribir<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> Result<R, StorageError>,
    ) -> Result<R, StorageError> {
        let mut registros = self.registros.write().await;

        let mut copia = registros.clone();
        let resultado = f(&mut copia)?;

        let bytes = serde_json::to_vec_pretty(&copia)?;
        fs::write(&self.path, bytes).await?;

        *registros = copia;
        Ok(resultado)
    }
}
