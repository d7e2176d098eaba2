//! batepapo - chat room and recipe catalog HTTP API.
//!
//! A small MongoDB-backed service exposing a chat-room API (participants,
//! messages, presence expiry) and an independent recipe catalog.

pub mod chat;
pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod recipes;
pub mod store;
pub mod web;

pub use chat::{
    Message, MessageRepository, MessageType, Participant, ParticipantRepository, PresenceSweeper,
    BROADCAST_RECIPIENT,
};
pub use config::Config;
pub use error::{ChatError, Result};
pub use recipes::{Recipe, RecipeRepository, RecipeUpdate};
pub use store::Store;
