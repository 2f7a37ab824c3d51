use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::modules::auth::model::{RolRegistro, Usuario, roles_conocidos};
use crate::storage::{JsonStore, StorageError};

/// Persistencia de usuarios sobre la coleccion `usuarios.json`.
#[derive(Clone)]
pub struct UsuarioRepository {
    store: Arc<JsonStore<Usuario>>,
}

impl UsuarioRepository {
    pub async fn abrir(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let store = JsonStore::abrir(data_dir.as_ref().join("usuarios.json")).await?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    pub async fn agregar(&self, usuario: Usuario) -> Result<Usuario, StorageError> {
        self.store
            .escribir(|usuarios| {
                usuarios.push(usuario.clone());
                Ok(usuario)
            })
            .await
    }

    /// Busqueda por email sin distinguir mayusculas; el email se normaliza a
    /// minusculas al escribir.
    pub async fn buscar_por_email(&self, email: &str) -> Option<Usuario> {
        let buscado = email.to_lowercase();
        self.store
            .leer(|usuarios| {
                usuarios
                    .iter()
                    .find(|u| u.email.to_lowercase() == buscado)
                    .cloned()
            })
            .await
    }
}

/// Tabla de consulta de roles. El conjunto es una constante global del
/// sistema; no se muta en tiempo de ejecucion.
#[derive(Clone)]
pub struct RolRepository {
    roles: Arc<Vec<RolRegistro>>,
}

impl RolRepository {
    pub fn new() -> Self {
        let roles = vec![
            RolRegistro {
                id: roles_conocidos::ADMIN,
                nombre: "ADMIN".to_string(),
            },
            RolRegistro {
                id: roles_conocidos::COORDINADOR,
                nombre: "COORDINADOR".to_string(),
            },
            RolRegistro {
                id: roles_conocidos::ALUMNO,
                nombre: "ALUMNO".to_string(),
            },
        ];

        Self {
            roles: Arc::new(roles),
        }
    }

    pub fn buscar_por_nombre(&self, nombre: &str) -> Option<RolRegistro> {
        let buscado = nombre.to_uppercase();
        self.roles.iter().find(|r| r.nombre == buscado).cloned()
    }

    pub fn buscar_por_id(&self, id: Uuid) -> Option<RolRegistro> {
        self.roles.iter().find(|r| r.id == id).cloned()
    }
}

impl Default for RolRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_conocidos_resuelven() {
        let repo = RolRepository::new();

        let admin = repo.buscar_por_nombre("admin").unwrap();
        assert_eq!(admin.id, roles_conocidos::ADMIN);
        assert_eq!(repo.buscar_por_id(admin.id).unwrap().nombre, "ADMIN");
        assert!(repo.buscar_por_nombre("PROFESOR").is_none());
    }
}
