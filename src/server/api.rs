use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::AppState;
use crate::error::PerfScriptError;
use crate::models::{LoadRequest, ScenarioRequest};
use crate::service::GeneratedScript;

/// Message returned for every server-side failure
const GENERIC_FAILURE: &str = "Failed to generate script";

/// Response for a successful generation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub message: String,
    pub output_path: String,
}

impl From<GeneratedScript> for GenerateResponse {
    fn from(script: GeneratedScript) -> Self {
        Self {
            message: "Script generated successfully".to_string(),
            output_path: script.output_path.display().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error side of every handler
///
/// Client errors carry their message; server errors are logged and
/// replaced by a generic message.
#[derive(Debug)]
pub struct ApiError(PerfScriptError);

impl From<PerfScriptError> for ApiError {
    fn from(err: PerfScriptError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PerfScriptError::InvalidRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = if self.0.is_client_error() {
            tracing::warn!(error = %self.0, "Rejected generation request");
            (StatusCode::BAD_REQUEST, self.0.to_string())
        } else {
            tracing::error!(error = %self.0, "Script generation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// POST /api/scenarios/ - Generate a multi-scenario script
pub async fn generate_scenarios(
    State(service): State<AppState>,
    payload: Result<Json<ScenarioRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateResponse>), ApiError> {
    let Json(request) = payload?;

    let script = service.generate_scenarios(&request).await?;
    tracing::info!(path = %script.output_path.display(), "Scenario script generated");

    Ok((StatusCode::CREATED, Json(script.into())))
}

/// POST /api/scenarios/load - Generate a load-test script
pub async fn generate_load(
    State(service): State<AppState>,
    payload: Result<Json<LoadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateResponse>), ApiError> {
    let Json(request) = payload?;

    let script = service.generate_load(&request).await?;
    tracing::info!(path = %script.output_path.display(), "Load script generated");

    Ok((StatusCode::CREATED, Json(script.into())))
}

/// GET /health
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Server is running.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let response = ApiError(PerfScriptError::UnsupportedTool("gatling".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("gatling"));
    }

    #[tokio::test]
    async fn test_server_error_is_generic() {
        let response = ApiError(PerfScriptError::LlmError("401: invalid api key sk-123".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, serde_json::json!({"error": GENERIC_FAILURE}));
    }
}
