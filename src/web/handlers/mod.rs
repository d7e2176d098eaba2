//! API handlers.

pub mod chat;
pub mod recipes;

use crate::store::Store;

pub use chat::*;
pub use recipes::*;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle.
    pub store: Store,
}

impl AppState {
    /// Create the application state.
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}
