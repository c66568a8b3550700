use crud_server::{logging, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::setup_tracing();

    let config = ServerConfig::from_env()?;
    let state = AppState::load(&config);
    let listener = TcpListener::bind(config.addr()).await?;
    info!(addr = %listener.local_addr()?, "listening");
    crud_server::run(listener, state).await?;
    Ok(())
}
