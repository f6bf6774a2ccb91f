//! Doc Generation Handler
//!
//! POST /api/generate

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::application::{mock_data, DocSet, GeneratorError};
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateDocsRequest {
    pub api_data: Map<String, Value>,
    pub audience_focus: String,
}

/// 文档集响应
#[derive(Debug, Serialize)]
pub struct DocSetResponse {
    #[serde(flatten)]
    pub doc_set: DocSet,
    #[serde(rename = "usedMock")]
    pub used_mock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn mock_response(message: impl Into<String>) -> DocSetResponse {
    DocSetResponse {
        doc_set: mock_data::mock_doc_set(),
        used_mock: true,
        message: Some(message.into()),
    }
}

/// 生成文档集
pub async fn generate_docs(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    let request = match serde_json::from_slice::<GenerateDocsRequest>(&body) {
        Ok(request) if !request.audience_focus.trim().is_empty() => request,
        Ok(_) | Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(mock_response("Invalid request body.")),
            );
        }
    };

    match state
        .docs
        .generate(&request.api_data, &request.audience_focus)
        .await
    {
        Ok(doc_set) => (
            StatusCode::OK,
            Json(DocSetResponse {
                doc_set,
                used_mock: false,
                message: None,
            }),
        ),
        Err(GeneratorError::NotConfigured) => (
            StatusCode::OK,
            Json(mock_response(
                "GEMINI_API_KEY missing. Served mock response.",
            )),
        ),
        Err(e) if e.is_rate_limited() => {
            tracing::warn!(error = %e, "Doc generation rate limited");
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(mock_response(
                    "Gemini rate limit detected - serving mock data while it recovers.",
                )),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Doc generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(mock_response("Fallback response applied after API failure.")),
            )
        }
    }
}

/// 非 POST 方法：405 + mock 响应体
pub async fn generate_method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(mock_response("Method not allowed")),
    )
}
