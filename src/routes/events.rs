// ABOUTME: Session change notification stream over Server-Sent Events
// ABOUTME: Subscribes the caller to sign-in/sign-out events as they happen

//! Session event routes
//!
//! `GET /api/auth/events` holds the connection open and streams session
//! lifecycle changes. Subscribers that fall behind skip the missed events
//! rather than erroring out.

use crate::{errors::AppError, resources::ServerResources, routes::authenticate};
use axum::{
    extract::State,
    http::HeaderMap,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::stream::Stream;
use futures_util::StreamExt;
use std::{convert::Infallible, sync::Arc};
use tokio_stream::wrappers::BroadcastStream;

/// Session event routes
pub struct EventRoutes;

impl EventRoutes {
    /// Create the event stream route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/events", get(Self::handle_events))
            .with_state(resources)
    }

    /// Stream session lifecycle events to an authenticated caller
    async fn handle_events(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
        authenticate(&headers, &resources).await?;

        let receiver = resources.session_events.subscribe();
        let stream = BroadcastStream::new(receiver).filter_map(|item| async move {
            match item {
                Ok(event) => match Event::default().json_data(&event) {
                    Ok(sse_event) => Some(Ok(sse_event)),
                    Err(e) => {
                        tracing::warn!("failed to serialize session event: {e}");
                        None
                    }
                },
                // Lagged receivers skip missed events
                Err(_) => None,
            }
        });

        Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
    }
}
