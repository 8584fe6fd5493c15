use crate::error::{AppError, Result, IMAGES_UNAVAILABLE};
use crate::models::ImagesResponse;
use crate::AppState;
use axum::{extract::State, Json};

/// GET /api/images
pub async fn list_images_handler(State(app_state): State<AppState>) -> Result<Json<ImagesResponse>> {
    let images = app_state.gallery_service.list_images().await.map_err(|e| {
        tracing::error!(
            dir = %app_state.gallery_service.images_dir().display(),
            "Failed to read image directory: {}",
            e
        );
        AppError::Internal(IMAGES_UNAVAILABLE)
    })?;

    Ok(Json(ImagesResponse { images }))
}
