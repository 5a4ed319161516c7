use anyhow::Result;
use translator_configuration::{load_config, setup_logging};
use translator_setup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    setup_logging(&config);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "voice translator starting"
    );
    let app = Application::new(config).await?;
    app.run().await?;
    Ok(())
}
