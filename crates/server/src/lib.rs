//! HTTP front end for the chatbot.
//!
//! Every `POST /chat` request is answered by a fresh single-turn session
//! built from state shared by all requests. `GET /health` reports liveness.
//! Both routes are also served under `/api`.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

use std::sync::Arc;

use ai_chatbot_core::{KnowledgeBase, ModelClient, ModelOptions, SessionBuilder};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

const DEFAULT_CONVERSATION_ID: &str = "default";
const SERVICE_NAME: &str = "ai-chatbot";

/// State shared by all requests.
#[derive(Clone)]
pub struct AppState {
    knowledge: Arc<KnowledgeBase>,
    model_client: Option<ModelClient>,
    system_prompt: Arc<str>,
    options: ModelOptions,
}

impl AppState {
    /// Creates a state without a model client. Chat requests fail with
    /// status 500 until one is set.
    #[inline]
    pub fn new(
        knowledge: impl Into<Arc<KnowledgeBase>>,
        system_prompt: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            knowledge: knowledge.into(),
            model_client: None,
            system_prompt: system_prompt.into(),
            options: ModelOptions::default(),
        }
    }

    /// Sets the client used to answer chat requests.
    #[inline]
    pub fn with_model_client(mut self, model_client: ModelClient) -> Self {
        self.model_client = Some(model_client);
        self
    }

    /// Sets the model, temperature and token limit.
    #[inline]
    pub fn with_model_options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health_check));
    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
    conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
    conversation_id: String,
    model: String,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

// The `Content-Type` header is not checked, any body that parses as JSON
// is accepted.
async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!("rejected chat request: {err}");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON body: {err}"),
            );
        }
    };
    let Some(message) = request.message else {
        return error_response(StatusCode::BAD_REQUEST, "Message field required");
    };
    let conversation_id = request
        .conversation_id
        .unwrap_or_else(|| DEFAULT_CONVERSATION_ID.to_owned());
    debug!("processing chat request for conversation {conversation_id}");

    let Some(model_client) = state.model_client.clone() else {
        error!("chat request received but OPENAI_API_KEY is not configured");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "OPENAI_API_KEY environment variable is not set",
        );
    };

    let mut session = SessionBuilder::with_model_client(model_client)
        .with_system_prompt(&*state.system_prompt)
        .with_knowledge(state.knowledge.clone())
        .with_model_options(state.options.clone())
        .build();

    match session.try_respond(&message).await {
        Ok(response) => Json(ChatResponse {
            response,
            conversation_id,
            model: state.options.model,
            status: "success",
        })
        .into_response(),
        Err(err) => {
            error!("chat request failed: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}

#[inline]
fn error_response<S: Into<String>>(status: StatusCode, error: S) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}
