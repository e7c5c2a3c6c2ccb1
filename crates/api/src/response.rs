//! Shared response envelope types for API handlers.
//!
//! Every response carries a top-level `success` flag. Single records go in
//! [`DataResponse`]; endpoints whose payload fields sit next to `success`
//! (listings, grading results) use [`Envelope`]; bare confirmations use
//! [`MessageResponse`]. Errors are produced by `AppError`.

use serde::Serialize;

/// `{ "success": true, "message"?: ..., "data": T }` envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(question)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// `{ "success": true, ...T }` envelope with the payload's fields inlined.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

/// `{ "success": true, "message": ... }` confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
