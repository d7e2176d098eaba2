use tracing::info;

use batepapo::web::WebServer;
use batepapo::{logging, Config, Store};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    logging::init(&config.logging);

    info!("batepapo - chat room and recipe catalog API");

    // Connect to the document store
    let store = match Store::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to connect to MongoDB: {e}");
            std::process::exit(1);
        }
    };
    info!("Connected to MongoDB database '{}'", config.database.name);

    let server = match WebServer::new(&config.server, store) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to configure server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
