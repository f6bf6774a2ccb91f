//! Flowchart Handler
//!
//! POST /api/flowchart

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{mock_data, Flowchart};
use crate::infrastructure::http::state::AppState;

/// doc_content 的最小长度；更短的内容画不出有意义的路线图
const MIN_DOC_CONTENT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct FlowchartRequest {
    pub doc_content: String,
    pub audience_focus: String,
}

/// 路线图响应
#[derive(Debug, Serialize)]
pub struct FlowchartResponse {
    #[serde(flatten)]
    pub flowchart: Flowchart,
    #[serde(rename = "usedMock")]
    pub used_mock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn mock_response(message: impl Into<String>) -> FlowchartResponse {
    FlowchartResponse {
        flowchart: mock_data::mock_flowchart(),
        used_mock: true,
        message: Some(message.into()),
    }
}

/// 生成路线图
pub async fn generate_flowchart(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    let request = match serde_json::from_slice::<FlowchartRequest>(&body) {
        Ok(request)
            if request.doc_content.chars().count() >= MIN_DOC_CONTENT
                && !request.audience_focus.trim().is_empty() =>
        {
            request
        }
        Ok(_) | Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(mock_response("Invalid request body")),
            );
        }
    };

    match state
        .flowchart
        .generate(&request.doc_content, &request.audience_focus)
        .await
    {
        Ok(flowchart) => (
            StatusCode::OK,
            Json(FlowchartResponse {
                flowchart,
                used_mock: false,
                message: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Flowchart generation failed");
            (
                StatusCode::OK,
                Json(mock_response("Served mock flowchart while generation failed.")),
            )
        }
    }
}

/// 非 POST 方法：405 + mock 响应体
pub async fn flowchart_method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(mock_response("Method not allowed")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_flattens_flowchart() {
        let response = mock_response("m");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("summary").is_some());
        assert!(json["nodes"].is_array());
        assert!(json["edges"].is_array());
        assert_eq!(json["usedMock"], true);
    }

    #[test]
    fn test_edge_optional_fields_omitted() {
        let json = serde_json::to_value(mock_response("m")).unwrap();
        // mock 边没有 id，序列化时应省略
        assert!(json["edges"][0].get("id").is_none());
        assert!(json["edges"][0].get("label").is_some());
    }
}
