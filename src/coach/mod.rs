// ABOUTME: AI coach abstraction behind a narrow conversation interface
// ABOUTME: Defines the provider trait, message types, and provider selection
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! # Coach Providers
//!
//! The coach is an external collaborator: given the user's profile and the
//! conversation so far, produce a reply. The default [`ScriptedCoach`] is an
//! explicit placeholder; a real LLM-backed provider slots in behind the same
//! trait without touching the routes.

/// Canned-response placeholder implementation
pub mod scripted;

pub use scripted::ScriptedCoach;

use crate::errors::AppResult;
use crate::models::UserProfile;
use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Sent by the user
    User,
    /// Sent by the coach
    Assistant,
}

/// One message in the running conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent it
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Build a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Build a coach message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A reply produced by a coach provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachReply {
    /// Reply text
    pub content: String,
}

/// Conversation interface every coach implementation satisfies
#[async_trait::async_trait]
pub trait CoachProvider: Send + Sync {
    /// Produce a reply to the latest user message
    ///
    /// `history` is the conversation in chronological order, ending with the
    /// message being answered. The profile, when present, personalizes the
    /// reply.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying provider fails
    async fn reply(
        &self,
        profile: Option<&UserProfile>,
        history: &[ChatMessage],
    ) -> AppResult<CoachReply>;

    /// Conversation starters surfaced by the client
    fn suggested_prompts(&self) -> Vec<String>;
}
