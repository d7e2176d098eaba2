//! Chat room domain: participants, messages and presence expiry.

mod message;
mod participant;
mod sweeper;

pub use message::{visibility_filter, Message, MessageRepository, MessageType, BROADCAST_RECIPIENT};
pub use participant::{Participant, ParticipantRepository};
pub use sweeper::{PresenceSweeper, PRESENCE_TIMEOUT_MS, SWEEP_INTERVAL};
