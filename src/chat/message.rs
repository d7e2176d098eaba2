//! Message store and visibility filter.

use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::store::Store;
use crate::Result;

/// Recipient name that makes a message visible to everyone.
pub const BROADCAST_RECIPIENT: &str = "Todos";

/// Message audience category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Public message, visible to all participants.
    Message,
    /// Private message, visible to sender and recipient only.
    PrivateMessage,
    /// System-generated join/leave event.
    Status,
}

impl MessageType {
    /// Wire representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Message => "message",
            MessageType::PrivateMessage => "private_message",
            MessageType::Status => "status",
        }
    }

    /// Parse a wire representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "message" => Some(MessageType::Message),
            "private_message" => Some(MessageType::PrivateMessage),
            "status" => Some(MessageType::Status),
            _ => None,
        }
    }
}

/// A chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// MongoDB document ID.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Sender name. For user messages this is always the authenticated
    /// author, never client-supplied.
    pub from: String,
    /// Recipient name, or [`BROADCAST_RECIPIENT`].
    pub to: String,
    /// Message body.
    pub text: String,
    /// Audience category.
    #[serde(rename = "type")]
    pub kind: MessageType,
    /// Wall-clock insertion time, formatted HH:MM:SS.
    pub time: String,
}

impl Message {
    /// Build a user message.
    pub fn new(from: &str, to: &str, text: &str, kind: MessageType, time: String) -> Self {
        Self {
            id: None,
            from: from.to_string(),
            to: to.to_string(),
            text: text.to_string(),
            kind,
            time,
        }
    }

    /// System event recording a participant joining the room.
    pub fn joined(name: &str, time: String) -> Self {
        Self::new(
            name,
            BROADCAST_RECIPIENT,
            "entra na sala...",
            MessageType::Status,
            time,
        )
    }

    /// System event recording a participant leaving the room.
    pub fn left(name: &str, time: String) -> Self {
        Self::new(
            name,
            BROADCAST_RECIPIENT,
            "sai da sala...",
            MessageType::Status,
            time,
        )
    }
}

/// Filter matching every message `requester` may read.
///
/// A message is visible iff it is public, broadcast to everyone, or a private
/// message with the requester as sender or recipient.
pub fn visibility_filter(requester: &str) -> Document {
    doc! {
        "$or": [
            { "type": MessageType::Message.as_str() },
            { "to": BROADCAST_RECIPIENT },
            { "$and": [
                { "type": MessageType::PrivateMessage.as_str() },
                { "$or": [ { "to": requester }, { "from": requester } ] },
            ]},
        ]
    }
}

/// Repository for the `messages` collection.
pub struct MessageRepository {
    collection: Collection<Message>,
}

impl MessageRepository {
    /// Create a new repository over the shared store.
    pub fn new(store: &Store) -> Self {
        Self {
            collection: store.messages(),
        }
    }

    /// Insert a message.
    pub async fn insert(&self, message: &Message) -> Result<()> {
        self.collection.insert_one(message).await?;
        Ok(())
    }

    /// List messages visible to `requester`, most recent first.
    ///
    /// `limit`, when present, caps the result to the most recent messages.
    pub async fn visible_to(&self, requester: &str, limit: Option<i64>) -> Result<Vec<Message>> {
        let mut find = self
            .collection
            .find(visibility_filter(requester))
            .sort(doc! { "_id": -1 });
        if let Some(limit) = limit {
            find = find.limit(limit);
        }
        let messages = find.await?.try_collect().await?;
        Ok(messages)
    }

    /// Find a message by ID.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Message>> {
        let message = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(message)
    }

    /// Delete a message by ID.
    pub async fn delete(&self, id: ObjectId) -> Result<()> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }

    /// Replace the mutable fields of a message in place.
    ///
    /// `from` is never touched; ownership checks happen at the handler level
    /// before this is called.
    pub async fn update(&self, id: ObjectId, to: &str, text: &str, kind: MessageType) -> Result<()> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "to": to, "text": text, "type": kind.as_str() } },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn test_message_type_round_trip() {
        for kind in [
            MessageType::Message,
            MessageType::PrivateMessage,
            MessageType::Status,
        ] {
            assert_eq!(MessageType::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_message_type_rejects_unknown() {
        assert_eq!(MessageType::from_str("shout"), None);
        assert_eq!(MessageType::from_str(""), None);
        assert_eq!(MessageType::from_str("Message"), None);
    }

    #[test]
    fn test_message_type_serde_matches_wire_format() {
        let json = serde_json::to_string(&MessageType::PrivateMessage).unwrap();
        assert_eq!(json, "\"private_message\"");
        let kind: MessageType = serde_json::from_str("\"status\"").unwrap();
        assert_eq!(kind, MessageType::Status);
    }

    #[test]
    fn test_joined_message_shape() {
        let msg = Message::joined("Ana", "12:00:00".to_string());
        assert_eq!(msg.from, "Ana");
        assert_eq!(msg.to, BROADCAST_RECIPIENT);
        assert_eq!(msg.text, "entra na sala...");
        assert_eq!(msg.kind, MessageType::Status);
        assert_eq!(msg.time, "12:00:00");
    }

    #[test]
    fn test_left_message_shape() {
        let msg = Message::left("Bia", "12:00:15".to_string());
        assert_eq!(msg.to, BROADCAST_RECIPIENT);
        assert_eq!(msg.text, "sai da sala...");
        assert_eq!(msg.kind, MessageType::Status);
    }

    #[test]
    fn test_message_id_skipped_when_absent() {
        let msg = Message::new("a", "b", "hi", MessageType::Message, "01:02:03".to_string());
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["type"], "message");
    }

    #[test]
    fn test_visibility_filter_clauses() {
        let filter = visibility_filter("Ana");
        let clauses = match filter.get("$or") {
            Some(Bson::Array(clauses)) => clauses,
            other => panic!("expected $or array, got {:?}", other),
        };
        assert_eq!(clauses.len(), 3);

        // public clause
        let public = clauses[0].as_document().unwrap();
        assert_eq!(public.get_str("type").unwrap(), "message");

        // broadcast clause
        let broadcast = clauses[1].as_document().unwrap();
        assert_eq!(broadcast.get_str("to").unwrap(), BROADCAST_RECIPIENT);

        // private clause ties type and endpoints together
        let private = clauses[2].as_document().unwrap();
        let and = private.get_array("$and").unwrap();
        assert_eq!(
            and[0].as_document().unwrap().get_str("type").unwrap(),
            "private_message"
        );
        let endpoints = and[1].as_document().unwrap().get_array("$or").unwrap();
        assert_eq!(
            endpoints[0].as_document().unwrap().get_str("to").unwrap(),
            "Ana"
        );
        assert_eq!(
            endpoints[1].as_document().unwrap().get_str("from").unwrap(),
            "Ana"
        );
    }
}
