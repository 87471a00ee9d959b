use anyhow::Context;
use rentals_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    init_tracing(&config).context("failed to initialize logging")?;

    let state = AppState::connect(config.clone())
        .await
        .context("failed to connect to the rentals database")?;

    Server::new(config)
        .serve(router(state))
        .await
        .context("server terminated with an error")?;

    Ok(())
}
