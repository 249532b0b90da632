//! Value controller - envelopes in, HTTP responses out
//!
//! No business rules live here. Success maps to 200 with the data as body,
//! failure maps through [`ApiError`].

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::error::ApiError;
use crate::usecases::{
    CreateValueUseCase, DeleteValueUseCase, Envelope, GetAllValuesUseCase, GetHealthUseCase,
    GetValueUseCase, UpdateValueUseCase,
};

/// Create/update request body
#[derive(Debug, Default, Deserialize)]
pub struct ValueRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl ValueRequest {
    /// Both fields present and non-empty, or the 400 the client expects.
    fn fields(&self) -> Result<(&str, &str), ApiError> {
        match (self.name.as_deref(), self.value.as_deref()) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => Ok((name, value)),
            _ => Err(ApiError::Validation("Name and Value are required".to_string())),
        }
    }
}

pub struct ValueController {
    get_all: GetAllValuesUseCase,
    get_one: GetValueUseCase,
    create: CreateValueUseCase,
    update: UpdateValueUseCase,
    delete: DeleteValueUseCase,
    health: GetHealthUseCase,
}

impl ValueController {
    pub fn new(
        get_all: GetAllValuesUseCase,
        get_one: GetValueUseCase,
        create: CreateValueUseCase,
        update: UpdateValueUseCase,
        delete: DeleteValueUseCase,
        health: GetHealthUseCase,
    ) -> Self {
        Self {
            get_all,
            get_one,
            create,
            update,
            delete,
            health,
        }
    }

    /// GET /api/values
    pub async fn get_all(&self) -> Response {
        match self.get_all.execute().await {
            Envelope::Success { data, .. } => Json(data).into_response(),
            Envelope::Failure(e) => ApiError::from(e).into_response(),
        }
    }

    /// GET /api/values/{id}
    pub async fn get_one(&self, id: &str) -> Response {
        match self.get_one.execute(id).await {
            Envelope::Success { data, .. } => Json(data).into_response(),
            Envelope::Failure(e) => ApiError::from(e).into_response(),
        }
    }

    /// POST /api/values
    pub async fn create(&self, req: &ValueRequest) -> Response {
        let (name, value) = match req.fields() {
            Ok(fields) => fields,
            Err(e) => return e.into_response(),
        };

        match self.create.execute(name, value).await {
            Envelope::Success { data, message } => Json(json!({
                "success": true,
                "ID": data.id(),
                "message": message
            }))
            .into_response(),
            Envelope::Failure(e) => ApiError::from(e).into_response(),
        }
    }

    /// PUT /api/values/{id}
    pub async fn update(&self, id: &str, req: &ValueRequest) -> Response {
        let (name, value) = match req.fields() {
            Ok(fields) => fields,
            Err(e) => return e.into_response(),
        };

        match self.update.execute(id, name, value).await {
            Envelope::Success { data, .. } => Json(data).into_response(),
            Envelope::Failure(e) => ApiError::from(e).into_response(),
        }
    }

    /// DELETE /api/values/{id}
    pub async fn delete(&self, id: &str) -> Response {
        match self.delete.execute(id).await {
            Envelope::Success { message, .. } => Json(json!({
                "success": true,
                "message": message
            }))
            .into_response(),
            Envelope::Failure(e) => ApiError::from(e).into_response(),
        }
    }

    /// GET /api/health
    pub async fn health(&self) -> Response {
        match self.health.execute().await {
            Envelope::Success { data, .. } => Json(data).into_response(),
            Envelope::Failure(e) => ApiError::from(e).into_response(),
        }
    }
}
