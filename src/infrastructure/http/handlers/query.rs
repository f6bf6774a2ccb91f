//! Query Handler
//!
//! POST /api/query

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{mock_data, Answer, GeneratorError};
use crate::infrastructure::http::state::AppState;

/// question 的最小长度
const MIN_QUESTION: usize = 5;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub persona: Option<String>,
}

/// 问答响应
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    #[serde(rename = "followUps")]
    pub follow_ups: Vec<String>,
    #[serde(rename = "usedMock")]
    pub used_mock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnswerResponse {
    fn real(answer: Answer) -> Self {
        Self {
            answer: answer.answer,
            follow_ups: answer.follow_ups,
            used_mock: false,
            message: None,
        }
    }

    fn mock(message: impl Into<String>) -> Self {
        let fallback = mock_data::mock_answer();
        Self {
            answer: fallback.answer,
            follow_ups: fallback.follow_ups,
            used_mock: true,
            message: Some(message.into()),
        }
    }
}

/// 回答问题
pub async fn answer_query(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    let request = match serde_json::from_slice::<QueryRequest>(&body) {
        Ok(request) if request.question.chars().count() >= MIN_QUESTION => request,
        Ok(_) | Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AnswerResponse::mock("Invalid question payload.")),
            );
        }
    };

    match state
        .answers
        .answer(
            &request.question,
            request.context.as_deref(),
            request.persona.as_deref(),
        )
        .await
    {
        Ok(answer) => (StatusCode::OK, Json(AnswerResponse::real(answer))),
        Err(GeneratorError::NotConfigured) => (
            StatusCode::OK,
            Json(AnswerResponse::mock(
                "GEMINI_API_KEY missing. Served mock answer.",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Query answering failed");
            (
                StatusCode::OK,
                Json(AnswerResponse::mock("Served mock answer after query failure.")),
            )
        }
    }
}

/// 非 POST 方法：405 + mock 响应体
pub async fn query_method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(AnswerResponse::mock("Method not allowed")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_question_is_invalid() {
        let request = serde_json::from_slice::<QueryRequest>(br#"{"question": "Hi?"}"#).unwrap();
        assert!(request.question.chars().count() < MIN_QUESTION);
    }

    #[test]
    fn test_response_field_names() {
        let json = serde_json::to_value(AnswerResponse::mock("m")).unwrap();
        assert!(json.get("answer").is_some());
        assert!(json.get("followUps").is_some());
        assert_eq!(json["usedMock"], true);
    }
}
