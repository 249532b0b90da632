//! Value endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::http::controller::ValueRequest;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /values - list all values
async fn list_values(State(state): State<Arc<AppState>>) -> Response {
    state.controller.get_all().await
}

/// POST /values - create a value
async fn create_value(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ValueRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(req)) => state.controller.create(&req).await,
        Err(rejection) => ApiError::from(rejection).into_response(),
    }
}

/// GET /values/{id} - get a single value
async fn get_value(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    state.controller.get_one(&id).await
}

/// PUT /values/{id} - replace name and value
async fn update_value(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ValueRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(req)) => state.controller.update(&id, &req).await,
        Err(rejection) => ApiError::from(rejection).into_response(),
    }
}

/// DELETE /values/{id} - delete a value
async fn delete_value(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    state.controller.delete(&id).await
}

/// Value routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/values", get(list_values).post(create_value))
        .route(
            "/values/{id}",
            get(get_value).put(update_value).delete(delete_value),
        )
}
