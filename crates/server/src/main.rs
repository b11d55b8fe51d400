//! Serves the chatbot over HTTP.

#[macro_use]
extern crate tracing;

use std::process::ExitCode;

use ai_chatbot::Settings;
use ai_chatbot_core::ModelClient;
use ai_chatbot_server::{AppState, router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    let knowledge = match settings.knowledge() {
        Ok(knowledge) => knowledge,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut state = AppState::new(knowledge, settings.system_prompt())
        .with_model_options(settings.model_options().clone());
    match settings.openai_provider() {
        Ok(provider) => state = state.with_model_client(ModelClient::new(provider)),
        // Keep serving health checks, chat requests will report the problem.
        Err(err) => warn!("{err}, chat requests will fail"),
    }

    let listener = match TcpListener::bind(settings.addr()).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {}: {err}", settings.addr());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "serving {} knowledge on http://{}",
        settings.preset(),
        settings.addr()
    );

    if let Err(err) = axum::serve(listener, router(state)).await {
        error!("server error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
