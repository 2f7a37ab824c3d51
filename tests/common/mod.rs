#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use kardex::config::cors::CorsConfig;
use kardex::config::jwt::JwtConfig;
use kardex::config::storage::StorageConfig;
use kardex::router::init_router;
use kardex::state::AppState;

// Tokens simulados: el contenido determina el rol por convencion de nombres.
pub const TOKEN_ADMIN: &str = "Bearer token-tipo1";
pub const TOKEN_COORDINADOR: &str = "Bearer token-tipo2";
pub const TOKEN_ALUMNO: &str = "Bearer token-tipo3";

pub fn storage_config_temporal() -> StorageConfig {
    StorageConfig {
        data_dir: std::env::temp_dir().join(format!("kardex-test-{}", Uuid::new_v4())),
    }
}

pub async fn setup_app() -> Router {
    let state = AppState::desde_configuracion(
        &storage_config_temporal(),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    )
    .await
    .unwrap();

    init_router(state)
}

pub fn email_unico() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Ejecuta una peticion JSON contra el router y devuelve status + cuerpo.
pub async fn peticion(
    app: &Router,
    metodo: &str,
    uri: &str,
    token: Option<&str>,
    cuerpo: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(metodo)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }

    let body = match cuerpo {
        Some(valor) => Body::from(serde_json::to_string(&valor).unwrap()),
        None => Body::empty(),
    };

    let respuesta = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = respuesta.status();
    let bytes = respuesta.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
