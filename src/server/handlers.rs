use super::types::{AnalysisResponse, ErrorResponse, HealthResponse};
use crate::analysis::{AnalysisRequest, ImageAnalysisProxy, RequestContext};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ImageAnalysisProxy>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub async fn analyze(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        // A body that is not a JSON object, or not declared as JSON, carries no
        // image; it goes through the same validation as an empty object.
        Err(
            rejection @ (JsonRejection::MissingJsonContentType(_)
            | JsonRejection::JsonDataError(_)),
        ) => {
            debug!(
                request_id = %ctx.request_id,
                "Reading analyze body as empty: {}",
                rejection.body_text()
            );
            AnalysisRequest::default()
        }
        Err(rejection) => {
            let status = rejection.status();
            let message = rejection.body_text();
            warn!(
                request_id = %ctx.request_id,
                status = status.as_u16(),
                "Rejected analyze request body: {}",
                message
            );
            return Err((status, Json(ErrorResponse::new(message, &ctx))));
        }
    };

    debug!(request_id = %ctx.request_id, mode = ?request.mode(), "Received analyze request");

    match state.proxy.analyze(&request).await {
        Ok(analysis) => {
            info!(
                request_id = %ctx.request_id,
                upstream_status = analysis.upstream_status,
                "Image analysis completed"
            );
            Ok(Json(AnalysisResponse::new(analysis.outcome, &ctx)))
        }
        Err(e) => {
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            error!(
                request_id = %ctx.request_id,
                status = status.as_u16(),
                upstream_status = ?e.upstream_status(),
                "Image analysis failed: {}",
                e
            );
            Err((status, Json(ErrorResponse::from_error(&e, &ctx))))
        }
    }
}

pub async fn not_found(ctx: RequestContext) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Not found", &ctx)),
    )
}
