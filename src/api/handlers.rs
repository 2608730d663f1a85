use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::extract::{JsonBody, QueryParams};
use crate::error::{ErrorKind, ServiceError};
use crate::logic::{ItemOperations, UserOperations};
use crate::model::{
    CreateItemRequest, CreateUserRequest, Id, Item, ListUserResponse, PageFilter,
    UpdateItemRequest, UpdateUserRequest, User,
};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InconsistentRequest => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn api_error(err: ServiceError) -> ApiError {
    if let ServiceError::Storage(cause) = &err {
        log::error!("Storage failure: {:#}", cause);
    }
    (status_for(err.kind()), Json(ErrorResponse::from(&err)))
}

pub async fn create_user<S: Store>(
    State(store): State<AppState<S>>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    UserOperations::create_user(&*store, request)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn list_users<S: Store>(
    State(store): State<AppState<S>>,
    QueryParams(page): QueryParams<PageFilter>,
) -> Result<Json<ListUserResponse>, ApiError> {
    let users = UserOperations::list_users(&*store, page)
        .await
        .map_err(api_error)?;
    Ok(Json(ListUserResponse { users }))
}

pub async fn get_user<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<User>, ApiError> {
    UserOperations::get_user(&*store, &id)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn update_user<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    UserOperations::update_user(&*store, &id, request)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn delete_user<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    UserOperations::delete_user(&*store, &id)
        .await
        .map_err(api_error)?;
    Ok(Json(serde_json::json!({})))
}

pub async fn create_item<S: Store>(
    State(store): State<AppState<S>>,
    JsonBody(request): JsonBody<CreateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    ItemOperations::create_item(&*store, request)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn get_item<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Item>, ApiError> {
    ItemOperations::get_item(&*store, &id)
        .await
        .map(Json)
        .map_err(api_error)
}

/// The item id comes from the path; an id in the body is ignored
pub async fn update_item<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    JsonBody(request): JsonBody<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    ItemOperations::update_item(&*store, &id, request)
        .await
        .map(Json)
        .map_err(api_error)
}
