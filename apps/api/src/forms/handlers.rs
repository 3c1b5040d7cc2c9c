use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::forms::image_check::{check_image, ImageCheck, ImageUpload};
use crate::forms::password::{evaluate_password, PasswordReport};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ImageCheckResponse {
    #[serde(flatten)]
    pub check: ImageCheck,
    pub accepted: bool,
    pub message: String,
}

/// POST /api/uploads/image/check
///
/// Validates a profile picture or company logo without storing it.
pub async fn handle_image_check(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageCheckResponse>, AppError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        // A cleared picker still submits an empty, unnamed part.
        if file_name.is_empty() && data.is_empty() {
            continue;
        }
        upload = Some(ImageUpload {
            file_name,
            content_type,
            data,
        });
    }

    let check = check_image(upload.as_ref(), state.config.upload_max_bytes);
    info!(accepted = check.accepted(), "image check");

    Ok(Json(ImageCheckResponse {
        accepted: check.accepted(),
        message: check.message(),
        check,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PasswordCheckRequest {
    pub password: String,
    #[serde(default)]
    pub confirm: String,
}

/// POST /api/signup/password-check
pub async fn handle_password_check(Json(req): Json<PasswordCheckRequest>) -> Json<PasswordReport> {
    Json(evaluate_password(&req.password, &req.confirm))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::catalog::InMemoryCatalog;
    use crate::config::Config;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "talentlinkboundary";

    fn state() -> AppState {
        AppState {
            config: Config::for_tests(),
            catalog: Arc::new(InMemoryCatalog::new()),
        }
    }

    fn multipart_body(file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        let resp = build_router(state()).oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn image_request(body: Vec<u8>) -> Request<Body> {
        Request::post("/api/uploads/image/check")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_image_check_accepts_jpeg() {
        let (status, body) = send(image_request(multipart_body("me.jpg", "image/jpeg", b"\xff\xd8\xff"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["accepted"], true);
        assert_eq!(body["message"], "Selected: me.jpg");
    }

    #[tokio::test]
    async fn test_image_check_rejects_oversize() {
        let data = vec![0u8; 2 * 1024 * 1024 + 1];
        let (status, body) = send(image_request(multipart_body("big.png", "image/png", &data))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "too_large");
        assert_eq!(body["accepted"], false);
    }

    #[tokio::test]
    async fn test_password_check() {
        let req = Request::post("/api/signup/password-check")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"password": "Abcdef1!", "confirm": "Abcdef1?"}).to_string(),
            ))
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 5);
        assert_eq!(body["match_status"], "mismatch");
        assert_eq!(body["submit_enabled"], false);
    }
}
