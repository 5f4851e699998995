//! Extractors whose rejections use the JSON error body

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::WebServerError;

/// `axum::Json` with malformed bodies reported as validation errors
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(WebServerError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Query` with bad parameters reported as validation errors
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(WebServerError))]
pub struct QueryParams<T>(pub T);
