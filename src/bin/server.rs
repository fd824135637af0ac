use std::sync::Arc;

use questions_api::{config, run, setup_store};

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    dotenv::dotenv().ok();
    let config = config::Config::new()?;
    let store = setup_store(&config).await?;
    tracing::info!("Questions service build ID {}", env!("QUESTIONS_API_VERSION"));
    run(config, Arc::new(store)).await;
    Ok(())
}
