use std::sync::Arc;

use das_api_proxy::{build_app, config::Config, logging, rpc::HttpRpcClient, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;

    let rpc = Arc::new(HttpRpcClient::new(config.rpc_url.clone()));
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(rpc);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        rpc_url = %config.rpc_url,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
