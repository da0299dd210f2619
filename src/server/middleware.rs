use crate::analysis::RequestContext;
use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{HeaderValue, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static CURRENT_REQUEST: RequestContext;
}

/// Context of the request being served on this task, if any.
pub fn current_request() -> Option<RequestContext> {
    CURRENT_REQUEST.try_with(RequestContext::clone).ok()
}

/// Makes sure every request carries an `x-request-id` and echoes it back.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let ctx = context_from_headers(req.headers());

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let mut response = CURRENT_REQUEST.scope(ctx.clone(), next.run(req)).await;

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(context_from_headers(&parts.headers))
    }
}

fn context_from_headers(headers: &axum::http::HeaderMap) -> RequestContext {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::generate)
}
