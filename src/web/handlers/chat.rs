//! Chat handlers: participants, messages and presence heartbeat.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

use crate::chat::{Message, MessageRepository, MessageType, ParticipantRepository};
use crate::datetime::{format_message_time, now_millis};
use crate::web::dto::{
    sanitize, JoinRequest, ListMessagesQuery, MessageRequest, MessageResponse,
    ParticipantResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Extract the requester name from the `user` header.
fn requester(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validated payload of a message post or update.
struct MessagePayload {
    to: String,
    text: String,
    kind: MessageType,
}

/// Sanitize and validate a message body.
///
/// Clients may only produce `message` and `private_message`; `status` is
/// reserved for system events.
fn message_payload(req: &MessageRequest) -> Result<MessagePayload, ApiError> {
    let to = sanitize(&req.to);
    let text = sanitize(&req.text);
    if to.is_empty() || text.is_empty() {
        return Err(ApiError::unprocessable("to and text must not be empty"));
    }

    let kind = MessageType::from_str(sanitize(&req.kind).as_str())
        .filter(|kind| *kind != MessageType::Status)
        .ok_or_else(|| {
            ApiError::unprocessable("type must be \"message\" or \"private_message\"")
        })?;

    Ok(MessagePayload { to, text, kind })
}

/// POST /participants - Join the chat room.
pub async fn join(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<JoinRequest>,
) -> Result<StatusCode, ApiError> {
    let name = sanitize(&req.name);
    if name.is_empty() {
        return Err(ApiError::unprocessable("name must not be empty"));
    }

    let participants = ParticipantRepository::new(&state.store);

    // Pre-insert lookup only; concurrent duplicate joins are not guarded.
    if participants.find_by_name(&name).await?.is_some() {
        return Err(ApiError::conflict("Participant already exists"));
    }

    let now = Utc::now();
    participants.create(&name, now.timestamp_millis()).await?;

    let messages = MessageRepository::new(&state.store);
    messages
        .insert(&Message::joined(&name, format_message_time(&now)))
        .await?;

    Ok(StatusCode::CREATED)
}

/// GET /participants - List all participants.
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantResponse>>, ApiError> {
    let participants = ParticipantRepository::new(&state.store).list().await?;
    Ok(Json(
        participants
            .into_iter()
            .map(ParticipantResponse::from)
            .collect(),
    ))
}

/// POST /messages - Post a message as the `user` header's participant.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<MessageRequest>,
) -> Result<StatusCode, ApiError> {
    let author =
        requester(&headers).ok_or_else(|| ApiError::unprocessable("user header is required"))?;
    let payload = message_payload(&req)?;

    let participants = ParticipantRepository::new(&state.store);
    if participants.find_by_name(&author).await?.is_none() {
        return Err(ApiError::unprocessable("Unknown participant"));
    }

    let now = Utc::now();
    let message = Message::new(
        &author,
        &payload.to,
        &payload.text,
        payload.kind,
        format_message_time(&now),
    );
    MessageRepository::new(&state.store).insert(&message).await?;

    Ok(StatusCode::CREATED)
}

/// GET /messages - List messages visible to the `user` header's participant.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let user =
        requester(&headers).ok_or_else(|| ApiError::unprocessable("user header is required"))?;

    let limit = match query.limit {
        Some(raw) => {
            let limit = raw
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ApiError::unprocessable("limit must be a positive integer"))?;
            Some(limit)
        }
        None => None,
    };

    let participants = ParticipantRepository::new(&state.store);
    if participants.find_by_name(&user).await?.is_none() {
        // 409 here, unlike POST /messages' 422 for the same condition; the
        // asymmetry is inherited from the original service.
        return Err(ApiError::conflict("Unknown participant"));
    }

    let messages = MessageRepository::new(&state.store)
        .visible_to(&user, limit)
        .await?;
    Ok(Json(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

/// POST /status - Refresh the `user` header's participant liveness.
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let user =
        requester(&headers).ok_or_else(|| ApiError::not_found("Participant not found"))?;

    let refreshed = ParticipantRepository::new(&state.store)
        .heartbeat(&user, now_millis())
        .await?;
    if !refreshed {
        return Err(ApiError::not_found("Participant not found"));
    }

    Ok(StatusCode::OK)
}

/// DELETE /messages/:id - Delete an owned message.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user =
        requester(&headers).ok_or_else(|| ApiError::unprocessable("user header is required"))?;
    let id =
        ObjectId::parse_str(&id).map_err(|_| ApiError::not_found("Message not found"))?;

    let messages = MessageRepository::new(&state.store);
    let message = messages
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    if message.from != user {
        return Err(ApiError::unauthorized("Not the message author"));
    }

    messages.delete(id).await?;
    Ok(StatusCode::OK)
}

/// PUT /messages/:id - Update an owned message in place.
pub async fn update_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<MessageRequest>,
) -> Result<StatusCode, ApiError> {
    let user =
        requester(&headers).ok_or_else(|| ApiError::unprocessable("user header is required"))?;
    let payload = message_payload(&req)?;

    let id =
        ObjectId::parse_str(&id).map_err(|_| ApiError::not_found("Message not found"))?;

    let messages = MessageRepository::new(&state.store);
    let message = messages
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    if message.from != user {
        return Err(ApiError::unauthorized("Not the message author"));
    }

    messages
        .update(id, &payload.to, &payload.text, payload.kind)
        .await?;
    Ok(StatusCode::OK)
}
