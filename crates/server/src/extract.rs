//! Extractors whose rejections render as `ApiError` bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::ApiError;

/// `axum::Json` with malformed bodies reported as 400 `{"error": ...}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path`; ids that fail to parse are reported as 404.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// `axum::extract::Query`; malformed query strings are reported as 400 `{"error": ...}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
