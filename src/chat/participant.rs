//! Participant directory.

use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::store::Store;
use crate::Result;

/// An active chat participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Display name, unique within the room.
    pub name: String,
    /// Last heartbeat, in milliseconds since the Unix epoch.
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

/// Repository for the `participants` collection.
pub struct ParticipantRepository {
    collection: Collection<Participant>,
}

impl ParticipantRepository {
    /// Create a new repository over the shared store.
    pub fn new(store: &Store) -> Self {
        Self {
            collection: store.participants(),
        }
    }

    /// Find a participant by name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Participant>> {
        let participant = self.collection.find_one(doc! { "name": name }).await?;
        Ok(participant)
    }

    /// Insert a new participant.
    ///
    /// Name uniqueness is enforced by the caller's pre-insert lookup only;
    /// concurrent joins with the same name can both succeed.
    pub async fn create(&self, name: &str, last_status: i64) -> Result<()> {
        let participant = Participant {
            name: name.to_string(),
            last_status,
        };
        self.collection.insert_one(&participant).await?;
        Ok(())
    }

    /// List all participants in store order.
    pub async fn list(&self) -> Result<Vec<Participant>> {
        let cursor = self.collection.find(doc! {}).await?;
        let participants = cursor.try_collect().await?;
        Ok(participants)
    }

    /// Refresh a participant's `lastStatus`.
    ///
    /// Returns `false` when no participant matched the name.
    pub async fn heartbeat(&self, name: &str, last_status: i64) -> Result<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "name": name },
                doc! { "$set": { "lastStatus": last_status } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Fetch all participants whose `lastStatus` is older than `cutoff`.
    pub async fn find_stale(&self, cutoff: i64) -> Result<Vec<Participant>> {
        let cursor = self
            .collection
            .find(doc! { "lastStatus": { "$lt": cutoff } })
            .await?;
        let stale = cursor.try_collect().await?;
        Ok(stale)
    }

    /// Delete all participants whose `lastStatus` is older than `cutoff`.
    ///
    /// The predicate is re-evaluated against the store; a participant that
    /// heartbeats between a `find_stale` snapshot and this call survives.
    pub async fn delete_stale(&self, cutoff: i64) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! { "lastStatus": { "$lt": cutoff } })
            .await?;
        Ok(result.deleted_count)
    }
}
