// ABOUTME: Coach route handlers for the AI conversation
// ABOUTME: Send a message, list the conversation, surface prompts, clear history

//! Coach routes
//!
//! Sending a message builds the conversation history from the stored
//! exchanges, asks the configured provider for a reply, and persists the new
//! exchange before answering.

use crate::{
    coach::ChatMessage,
    errors::AppError,
    resources::ServerResources,
    routes::{authenticate, clamp_limit},
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request to send a message to the coach
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Message content
    pub content: String,
}

/// Response carrying the stored exchange
#[derive(Debug, Serialize, Deserialize)]
pub struct ExchangeResponse {
    /// Exchange identifier
    pub id: String,
    /// What the user asked
    pub message: String,
    /// What the coach answered
    pub reply: String,
    /// Creation timestamp, RFC 3339
    pub created_at: String,
}

/// Suggested conversation starters
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestedPromptsResponse {
    /// Prompts the client can offer
    pub prompts: Vec<String>,
}

/// Optional limit for conversation listings
#[derive(Debug, Deserialize, Default)]
struct ListQuery {
    limit: Option<i64>,
}

/// Coach routes
pub struct CoachRoutes;

impl CoachRoutes {
    /// Create all coach routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/coach/messages", post(Self::handle_send))
            .route("/api/coach/messages", get(Self::handle_history))
            .route("/api/coach/messages", delete(Self::handle_clear))
            .route("/api/coach/prompts", get(Self::handle_prompts))
            .with_state(resources)
    }

    /// Send a message and receive the coach's reply
    async fn handle_send(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SendMessageRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let content = request.content.trim();
        if content.is_empty() {
            return Err(AppError::invalid_input("Message cannot be empty"));
        }

        // Rebuild the running conversation for the provider
        let past = resources
            .database
            .coach_history(auth.user_id, clamp_limit(None))
            .await?;
        let mut history: Vec<ChatMessage> = Vec::with_capacity(past.len() * 2 + 1);
        for exchange in &past {
            history.push(ChatMessage::user(exchange.message.clone()));
            history.push(ChatMessage::assistant(exchange.reply.clone()));
        }
        history.push(ChatMessage::user(content));

        let profile = resources.health_data.profile(auth.user_id).await?;
        let reply = resources
            .coach
            .reply(profile.as_ref(), &history)
            .await?;

        let exchange = resources
            .database
            .record_coach_exchange(auth.user_id, content, &reply.content)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(ExchangeResponse {
                id: exchange.id.to_string(),
                message: exchange.message,
                reply: exchange.reply,
                created_at: exchange.created_at.to_rfc3339(),
            }),
        )
            .into_response())
    }

    /// List the caller's conversation in chronological order
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;

        let exchanges = resources
            .database
            .coach_history(auth.user_id, clamp_limit(query.limit))
            .await?;

        let body: Vec<ExchangeResponse> = exchanges
            .into_iter()
            .map(|e| ExchangeResponse {
                id: e.id.to_string(),
                message: e.message,
                reply: e.reply,
                created_at: e.created_at.to_rfc3339(),
            })
            .collect();

        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Clear the caller's conversation
    async fn handle_clear(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        resources.database.clear_coach_history(auth.user_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Surface the provider's suggested prompts
    async fn handle_prompts(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;

        let response = SuggestedPromptsResponse {
            prompts: resources.coach.suggested_prompts(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
