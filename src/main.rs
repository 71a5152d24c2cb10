use fleet_ledger::{print_banner, setup_environment, Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    print_banner();

    // 2. Configuration
    let config = Config::from_env();

    tracing::info!(environment = %config.environment, "Fleet Ledger starting...");

    // 3. Server state (store backends)
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
