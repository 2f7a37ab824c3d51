use dotenvy::dotenv;

use kardex::config::server::ServerConfig;
use kardex::logging::init_tracing;
use kardex::router::init_router;
use kardex::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await?;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.direccion()).await?;
    tracing::info!("Servidor escuchando en http://{}", server_config.direccion());
    axum::serve(listener, app).await?;

    Ok(())
}
