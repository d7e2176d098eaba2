//! Response DTOs for the web API.

use serde::Serialize;

use crate::chat::{Message, Participant};
use crate::recipes::Recipe;

/// Participant entry in listings.
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    /// Display name.
    pub name: String,
    /// Last heartbeat in epoch milliseconds.
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            name: p.name,
            last_status: p.last_status,
        }
    }
}

/// Message entry in listings.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Document ID as a hex string.
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id.map(|id| id.to_hex()).unwrap_or_default(),
            from: m.from,
            to: m.to,
            text: m.text,
            kind: m.kind.as_str().to_string(),
            time: m.time,
        }
    }
}

/// Recipe entry in listings and single-recipe reads.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    /// Document ID as a hex string.
    pub id: String,
    pub titulo: Option<String>,
    pub preparo: Option<String>,
    pub ingredientes: Option<String>,
}

impl From<Recipe> for RecipeResponse {
    fn from(r: Recipe) -> Self {
        Self {
            id: r.id.map(|id| id.to_hex()).unwrap_or_default(),
            titulo: r.titulo,
            preparo: r.preparo,
            ingredientes: r.ingredientes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageType;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_message_response_serialization() {
        let id = ObjectId::new();
        let message = Message {
            id: Some(id),
            from: "Ana".to_string(),
            to: "Todos".to_string(),
            text: "oi".to_string(),
            kind: MessageType::Message,
            time: "10:00:00".to_string(),
        };
        let json = serde_json::to_value(MessageResponse::from(message)).unwrap();
        assert_eq!(json["id"], id.to_hex());
        assert_eq!(json["type"], "message");
        assert_eq!(json["time"], "10:00:00");
    }

    #[test]
    fn test_participant_response_field_names() {
        let participant = Participant {
            name: "Ana".to_string(),
            last_status: 42,
        };
        let json = serde_json::to_value(ParticipantResponse::from(participant)).unwrap();
        assert_eq!(json["lastStatus"], 42);
    }

    #[test]
    fn test_recipe_response_keeps_nulls() {
        let recipe = Recipe {
            id: Some(ObjectId::new()),
            titulo: Some("Bolo".to_string()),
            preparo: None,
            ingredientes: None,
        };
        let json = serde_json::to_value(RecipeResponse::from(recipe)).unwrap();
        assert_eq!(json["titulo"], "Bolo");
        assert!(json["preparo"].is_null());
    }
}
