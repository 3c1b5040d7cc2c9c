pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::forms::handlers as forms;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

/// Room for multipart framing around the largest accepted image, so oversize
/// files reach the check and get a readable answer instead of a bare 413.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = upload_body_limit(state.config.upload_max_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/get-suggestions",
            get(suggestions::handle_get_suggestions),
        )
        .route(
            "/api/uploads/image/check",
            post(forms::handle_image_check).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/signup/password-check",
            post(forms::handle_password_check),
        )
        .with_state(state)
}

/// Twice the image cap: anything above it is certainly rejected by the check.
fn upload_body_limit(upload_max_bytes: usize) -> usize {
    upload_max_bytes
        .saturating_mul(2)
        .saturating_add(MULTIPART_OVERHEAD)
}
