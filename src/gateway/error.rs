use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::verify::VerifyError;

use super::{MASTHEAD_STATUS_ERROR, MASTHEAD_STATUS_HEADER};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("verification failed: {0}")]
    VerificationFailed(#[from] VerifyError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, masthead_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::VerificationFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "verification_error")
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            MASTHEAD_STATUS_HEADER,
            HeaderValue::from_str(masthead_status)
                .unwrap_or(HeaderValue::from_static(MASTHEAD_STATUS_ERROR)),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
