//! Web server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::chat::PresenceSweeper;
use crate::config::ServerConfig;
use crate::store::Store;
use crate::{ChatError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

/// Parse the configured bind address.
fn parse_addr(config: &ServerConfig) -> Result<SocketAddr> {
    format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| {
            ChatError::Config(format!(
                "invalid server address {}:{}",
                config.host, config.port
            ))
        })
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &ServerConfig, store: Store) -> Result<Self> {
        Ok(Self {
            addr: parse_addr(config)?,
            app_state: Arc::new(AppState::new(store)),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> std::io::Result<()> {
        let store = self.app_state.store.clone();
        let router = create_router(self.app_state).merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start the presence sweeper after a successful bind
        PresenceSweeper::new(store).spawn();
        tracing::info!("Presence sweeper started (runs every 15 seconds)");

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let store = self.app_state.store.clone();
        let router = create_router(self.app_state).merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        PresenceSweeper::new(store).spawn();
        tracing::info!("Presence sweeper started (runs every 15 seconds)");

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addr_valid() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        };
        let addr = parse_addr(&config).unwrap();
        assert_eq!(addr.port(), 5000);
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
    }

    #[test]
    fn test_parse_addr_invalid_host() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 5000,
        };
        assert!(matches!(
            parse_addr(&config),
            Err(ChatError::Config(_))
        ));
    }
}
