use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::embedding::Embedder;
use crate::store::TitleStore;
use crate::verify::TitleStatus;

use super::MASTHEAD_STATUS_HEADER;
use super::error::GatewayError;
use super::payload::VerifyRequest;
use super::state::HandlerState;

#[instrument(skip(state, request), fields(title_len = request.title.len()))]
pub async fn verify_handler<E, S>(
    State(state): State<HandlerState<E, S>>,
    Json(request): Json<VerifyRequest>,
) -> Result<Response, GatewayError>
where
    E: Embedder + 'static,
    S: TitleStore + 'static,
{
    let title = request.title.trim();
    if title.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "title must not be empty".to_string(),
        ));
    }

    debug!("processing verification request");
    let decision = state.engine.verify(title).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        MASTHEAD_STATUS_HEADER,
        HeaderValue::from_static(match decision.status {
            TitleStatus::Approved => "approved",
            TitleStatus::Rejected => "rejected",
        }),
    );

    Ok((StatusCode::OK, headers, Json(decision)).into_response())
}
