//! Narration Handler
//!
//! POST /api/audio
//!
//! 请求体按宽容模式解析：畸形 JSON 视为空对象；字段类型不符才算
//! 形状错误。除方法违规外所有路径都返回 200。

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::application::{NarrationOutcome, NarrationRequest};
use crate::infrastructure::http::state::AppState;

/// 旁白响应
#[derive(Debug, Serialize)]
pub struct NarrationResponse {
    #[serde(rename = "audioPath")]
    pub audio_path: String,
    #[serde(rename = "usedMock")]
    pub used_mock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<NarrationOutcome> for NarrationResponse {
    fn from(outcome: NarrationOutcome) -> Self {
        Self {
            audio_path: outcome.audio_path,
            used_mock: outcome.used_mock,
            message: outcome.message,
        }
    }
}

/// 生成旁白音频
pub async fn narrate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Json<NarrationResponse> {
    let value = lenient_json(&body);

    let outcome = match serde_json::from_value::<NarrationRequest>(value) {
        Ok(request) => state.narration.narrate(request).await,
        Err(e) => {
            tracing::warn!(error = %e, "Narration payload failed validation");
            state.narration.invalid_payload().await
        }
    };

    Json(outcome.into())
}

/// 非 POST 方法：405 + mock 响应体
pub async fn narrate_method_not_allowed(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let outcome = state.narration.method_not_allowed();
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(NarrationResponse::from(outcome)),
    )
}

/// 畸形 JSON 容忍为 `{}`
fn lenient_json(body: &Bytes) -> Value {
    if body.is_empty() {
        return Value::Object(Default::default());
    }
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed JSON body treated as empty object");
            Value::Object(Default::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_json_on_garbage() {
        let value = lenient_json(&Bytes::from_static(b"not json at all"));
        assert_eq!(value, Value::Object(Default::default()));
    }

    #[test]
    fn test_lenient_json_on_empty_body() {
        let value = lenient_json(&Bytes::new());
        assert_eq!(value, Value::Object(Default::default()));
    }

    #[test]
    fn test_lenient_json_keeps_valid_object() {
        let value = lenient_json(&Bytes::from_static(b"{\"dialogue_script\":\"Alex: hi\"}"));
        assert_eq!(value["dialogue_script"], "Alex: hi");
    }

    #[test]
    fn test_wrongly_typed_field_fails_shape_check() {
        let value = lenient_json(&Bytes::from_static(b"{\"dialogue_script\":42}"));
        assert!(serde_json::from_value::<NarrationRequest>(value).is_err());
    }

    #[test]
    fn test_unknown_variant_key_fails_shape_check() {
        let value = lenient_json(&Bytes::from_static(b"{\"variant_key\":\"version_9\"}"));
        assert!(serde_json::from_value::<NarrationRequest>(value).is_err());
    }

    #[test]
    fn test_message_omitted_when_none() {
        let response = NarrationResponse {
            audio_path: "/audio/output.mp3".to_string(),
            used_mock: false,
            message: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"audioPath": "/audio/output.mp3", "usedMock": false})
        );
    }
}
