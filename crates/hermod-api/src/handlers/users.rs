//! User registration and messaging handlers.
//!
//! These are the business operations that feed the notification trigger:
//! registering a user fires `user_registered`, sending a message fires
//! `user_send_message`. The trigger is invoked after the store mutation
//! commits and never affects the response.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use hermod_core::events;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::ApiError,
    state::{AppState, Message, User},
};

/// User registration request body.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    /// Username to register. Stored lowercased.
    pub username: String,
}

/// Message sending request body.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    /// Username of the sender.
    pub sender: String,
    /// Username of the recipient.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

/// Recipient filter for the message listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientParams {
    /// Username of the recipient.
    pub recipient: String,
}

/// `POST /users` — register a new user and notify subscribers.
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<UserRequest>,
) -> Result<Json<User>, ApiError> {
    let username = request.username.to_lowercase();

    let mut users = state.users.write().await;
    if users.iter().any(|user| user.username == username) {
        return Err(ApiError::UsernameTaken(username));
    }

    let user = User { username, registered_at: Utc::now() };
    users.push(user.clone());
    drop(users);

    tracing::info!(username = %user.username, "user registered");

    // Fire-and-forget: the registration response does not depend on
    // delivery outcome.
    let _ = state.trigger.trigger(events::USER_REGISTERED, json!(user));

    Ok(Json(user))
}

/// `GET /users` — list all registered users.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.read().await.clone())
}

/// `POST /users/messages` — send a message and notify subscribers.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Message>, ApiError> {
    let sender = request.sender.to_lowercase();
    let recipient = request.recipient.to_lowercase();

    {
        let users = state.users.read().await;
        if !users.iter().any(|user| user.username == sender) {
            return Err(ApiError::validation("Sender does not exist"));
        }
        if !users.iter().any(|user| user.username == recipient) {
            return Err(ApiError::validation("Recipient does not exist"));
        }
    }
    if sender == recipient {
        return Err(ApiError::validation("Sender and recipient cannot be the same"));
    }

    let message = Message {
        sender,
        recipient,
        subject: request.subject,
        message: request.message,
        received_at: Utc::now(),
    };
    state.messages.write().await.push(message.clone());

    tracing::info!(
        sender = %message.sender,
        recipient = %message.recipient,
        "message sent"
    );

    let _ = state.trigger.trigger(events::USER_SEND_MESSAGE, json!(message));

    Ok(Json(message))
}

/// `GET /users/messages` — list messages sent to a recipient.
pub async fn list_messages(
    State(state): State<AppState>,
    Query(params): Query<RecipientParams>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let recipient = params.recipient.to_lowercase();

    let users = state.users.read().await;
    if !users.iter().any(|user| user.username == recipient) {
        return Err(ApiError::validation("Recipient does not exist"));
    }
    drop(users);

    let messages = state
        .messages
        .read()
        .await
        .iter()
        .filter(|message| message.recipient == recipient)
        .cloned()
        .collect();

    Ok(Json(messages))
}
