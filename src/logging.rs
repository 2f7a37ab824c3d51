use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Registra cada solicitud con id propio, metodo, ruta, status y latencia.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let inicio = Instant::now();
    let metodo = req.method().clone();
    let uri = req.uri().clone();
    let ruta = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        metodo = %metodo,
        ruta = %ruta,
        "Solicitud entrante"
    );

    let respuesta = next.run(req).await;
    let latencia = inicio.elapsed();
    let status = respuesta.status();

    match status.as_u16() {
        400..=499 => {
            warn!(
                request_id = %request_id,
                metodo = %metodo,
                ruta = %ruta,
                status = %status.as_u16(),
                latencia_ms = %latencia.as_millis(),
                "Error del cliente"
            );
        }
        500..=599 => {
            error!(
                request_id = %request_id,
                metodo = %metodo,
                ruta = %ruta,
                status = %status.as_u16(),
                latencia_ms = %latencia.as_millis(),
                "Error del servidor"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                metodo = %metodo,
                ruta = %ruta,
                status = %status.as_u16(),
                latencia_ms = %latencia.as_millis(),
                "Solicitud completada"
            );
        }
    }

    respuesta
}

/// Inicializa tracing: consola con filtro por entorno y archivo rotado por
/// dia para errores.
pub fn init_tracing() {
    use std::fs;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let log_dir = "storage/logs";
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("No se pudo crear el directorio de logs: {}", e);
    }

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,tower_http=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "kardex.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
