use crate::config::cors::CorsConfig;
use crate::config::jwt::JwtConfig;
use crate::config::storage::StorageConfig;
use crate::modules::alumnos::repository::AlumnoRepository;
use crate::modules::alumnos::service::AlumnoService;
use crate::modules::auth::repository::{RolRepository, UsuarioRepository};
use crate::modules::auth::service::AuthService;

/// Estado compartido de la aplicacion. Los servicios se construyen una sola
/// vez en el arranque y se inyectan a los handlers por referencia; no hay
/// estado global mutable.
#[derive(Clone)]
pub struct AppState {
    pub alumnos: AlumnoService,
    pub auth: AuthService,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub async fn desde_configuracion(
        storage: &StorageConfig,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
    ) -> anyhow::Result<Self> {
        let alumnos = AlumnoRepository::abrir(&storage.data_dir).await?;
        let usuarios = UsuarioRepository::abrir(&storage.data_dir).await?;
        let roles = RolRepository::new();

        Ok(Self {
            alumnos: AlumnoService::new(alumnos),
            auth: AuthService::new(usuarios, roles, jwt_config),
            cors_config,
        })
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    AppState::desde_configuracion(
        &StorageConfig::from_env(),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    )
    .await
}
