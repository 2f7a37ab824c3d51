use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directorio de las colecciones JSON (alumnos.json, usuarios.json).
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("KARDEX_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/data")),
        }
    }
}
