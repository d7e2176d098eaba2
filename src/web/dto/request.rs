//! Request DTOs for the web API.

use serde::Deserialize;
use validator::Validate;

/// Participant join request.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinRequest {
    /// Participant name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

/// Message post/update request body.
///
/// `from` is never accepted from the client; the sender comes from the
/// `user` header.
#[derive(Debug, Deserialize, Validate)]
pub struct MessageRequest {
    /// Recipient name, or "Todos".
    #[validate(length(min = 1, message = "to must not be empty"))]
    pub to: String,
    /// Message body.
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    /// Message type: "message" or "private_message".
    #[serde(rename = "type")]
    pub kind: String,
}

/// Message listing query parameters.
///
/// `limit` is kept as a raw string so a non-numeric value can be rejected
/// with 422 instead of a framework-level 400.
#[derive(Debug, Default, Deserialize)]
pub struct ListMessagesQuery {
    pub limit: Option<String>,
}

/// Recipe creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, message = "titulo must not be empty"))]
    pub titulo: String,
    #[validate(length(min = 1, message = "preparo must not be empty"))]
    pub preparo: String,
    #[validate(length(min = 1, message = "ingredientes must not be empty"))]
    pub ingredientes: String,
}

/// Full-overwrite recipe update request.
///
/// Every field is optional; omitted fields are still written (as null) by
/// the update, preserving the original service's behavior.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub preparo: Option<String>,
    #[serde(default)]
    pub ingredientes: Option<String>,
}

/// Bulk title update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeTitlesRequest {
    #[serde(default)]
    pub titulo: Option<String>,
}
