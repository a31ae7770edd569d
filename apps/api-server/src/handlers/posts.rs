//! Posts handlers.

use actix_web::{HttpResponse, web};

use blog_shared::dto::{PostSaveRequest, PostUpdateRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// POST /api/v1/posts - responds with the new id.
pub async fn save(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<PostSaveRequest>,
) -> AppResult<HttpResponse> {
    tracing::debug!(request_id = %request_id.as_str(), "Saving post");

    let id = state
        .posts
        .save(body.into_inner())
        .await
        .map_err(|e| AppError::from(e).with_request_id(&request_id))?;

    Ok(HttpResponse::Ok().json(id))
}

/// PUT /api/v1/posts/{id} - responds with the id of the updated post.
pub async fn update(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<i64>,
    body: web::Json<PostUpdateRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    tracing::debug!(request_id = %request_id.as_str(), post_id = id, "Updating post");

    let id = state
        .posts
        .update(id, body.into_inner())
        .await
        .map_err(|e| AppError::from(e).with_request_id(&request_id))?;

    Ok(HttpResponse::Ok().json(id))
}

/// GET /api/v1/posts/{id}
pub async fn find_by_id(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    tracing::debug!(request_id = %request_id.as_str(), post_id = id, "Fetching post");

    let post = state
        .posts
        .find_by_id(id)
        .await
        .map_err(|e| AppError::from(e).with_request_id(&request_id))?;

    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/v1/posts - newest first.
pub async fn list(state: web::Data<AppState>, request_id: RequestId) -> AppResult<HttpResponse> {
    tracing::debug!(request_id = %request_id.as_str(), "Listing posts");

    let posts = state
        .posts
        .find_all_desc()
        .await
        .map_err(|e| AppError::from(e).with_request_id(&request_id))?;

    Ok(HttpResponse::Ok().json(posts))
}
