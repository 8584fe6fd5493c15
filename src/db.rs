use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use std::time::Duration;

use crate::config::AppConfig;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_DATABASE: &str = "galleria";

/// Connects to MongoDB and pings it so an unreachable server fails at startup
/// rather than on the first request.
pub async fn connect(config: &AppConfig) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    options.app_name = Some("galleria".to_string());

    let client = Client::with_options(options)?;

    let database = match config.mongodb_database.as_deref() {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    };

    database.run_command(doc! { "ping": 1 }).await?;

    Ok(database)
}
