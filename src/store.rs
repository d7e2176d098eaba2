//! MongoDB store handle.
//!
//! The [`Store`] is opened once at process start and cloned into every
//! handler and background task; the driver manages its own connection pool.
//! The store exclusively owns all persisted state, so repositories re-query
//! it on every operation rather than caching.

use mongodb::{Client, Collection};

use crate::chat::{Message, Participant};
use crate::config::DatabaseConfig;
use crate::recipes::Recipe;
use crate::Result;

/// Collection name for chat participants.
pub const PARTICIPANTS_COLLECTION: &str = "participants";
/// Collection name for chat messages.
pub const MESSAGES_COLLECTION: &str = "messages";
/// Collection name for recipes.
pub const RECIPES_COLLECTION: &str = "receitas";

/// Shared handle to the document store.
#[derive(Clone)]
pub struct Store {
    db: mongodb::Database,
}

impl Store {
    /// Connect to MongoDB using the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.url).await?;
        Ok(Self {
            db: client.database(&config.name),
        })
    }

    /// Build a store over an already-opened database handle.
    pub fn new(db: mongodb::Database) -> Self {
        Self { db }
    }

    /// The `participants` collection.
    pub fn participants(&self) -> Collection<Participant> {
        self.db.collection(PARTICIPANTS_COLLECTION)
    }

    /// The `messages` collection.
    pub fn messages(&self) -> Collection<Message> {
        self.db.collection(MESSAGES_COLLECTION)
    }

    /// The `receitas` collection.
    pub fn recipes(&self) -> Collection<Recipe> {
        self.db.collection(RECIPES_COLLECTION)
    }
}
