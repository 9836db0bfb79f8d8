use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{FormError, FormResult};
use crate::logic::{Mutator, RequestValidator, Resolver};
use crate::model::{
    FormOperation, FormRequest, FormResponse, RequestContext, RequestEnvelope, ResolutionQuery,
    ResolvedForm,
};
use crate::store::traits::Store;
use crate::telemetry;

pub type AppState<S> = Arc<S>;

type ApiResponse = (StatusCode, Json<FormResponse>);

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
pub struct ReadResult {
    pub form: ResolvedForm,
}

pub async fn create_form<S: Store>(
    State(store): State<AppState<S>>,
    ctx: RequestContext,
    body: Result<RequestJson<RequestEnvelope>, JsonRejection>,
) -> ApiResponse {
    let operation = FormOperation::Create;
    let outcome = match parse(body, operation) {
        Ok(request) => {
            let payload = request.data.unwrap_or_default();
            Mutator::create(&*store, &request.identity, &payload).await
        }
        Err(e) => Err(e),
    };
    respond(operation, &ctx, outcome)
}

pub async fn update_form<S: Store>(
    State(store): State<AppState<S>>,
    ctx: RequestContext,
    body: Result<RequestJson<RequestEnvelope>, JsonRejection>,
) -> ApiResponse {
    let operation = FormOperation::Update;
    let outcome = match parse(body, operation) {
        Ok(request) => {
            let payload = request.data.unwrap_or_default();
            Mutator::update(&*store, &request.identity, &payload).await
        }
        Err(e) => Err(e),
    };
    respond(operation, &ctx, outcome)
}

pub async fn read_form<S: Store>(
    State(store): State<AppState<S>>,
    ctx: RequestContext,
    body: Result<RequestJson<RequestEnvelope>, JsonRejection>,
) -> ApiResponse {
    let operation = FormOperation::Read;
    let outcome = match parse(body, operation) {
        Ok(request) => {
            let query = ResolutionQuery::from_identity(&request.identity);
            Resolver::resolve(&*store, &query)
                .await
                .map(|form| ReadResult { form })
                .map_err(FormError::from)
        }
        Err(e) => Err(e),
    };
    respond(operation, &ctx, outcome)
}

fn parse(
    body: Result<RequestJson<RequestEnvelope>, JsonRejection>,
    operation: FormOperation,
) -> FormResult<FormRequest> {
    let RequestJson(envelope) = body.map_err(|e| FormError::MalformedBody(e.body_text()))?;
    RequestValidator::validate(envelope.request.as_ref(), operation)
}

fn respond<T: Serialize>(
    operation: FormOperation,
    ctx: &RequestContext,
    outcome: FormResult<T>,
) -> ApiResponse {
    let msg_id = ctx.msg_id_or_generate();
    let result = outcome.and_then(|value| {
        serde_json::to_value(value).map_err(|e| FormError::Storage(anyhow::Error::from(e)))
    });

    match result {
        Ok(result) => {
            telemetry::log_success(operation, ctx);
            (
                StatusCode::OK,
                Json(FormResponse::success(operation, msg_id, result)),
            )
        }
        Err(e) => {
            telemetry::log_error(operation, ctx, &e);
            (
                e.status(),
                Json(FormResponse::failure(
                    operation,
                    msg_id,
                    e.response_code(),
                    e.message(),
                )),
            )
        }
    }
}
