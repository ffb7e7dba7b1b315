use axum::http::StatusCode;

use crate::error::Result;
use crate::forward;
use crate::state::AppState;

/// `action=ipn`: verify the notification with PayPal, then relay the
/// fields to the internal processing endpoint.
///
/// Replies `200 OK` once the notification has been handled, whether or not
/// it verified; errors from verification propagate as responses via
/// [`crate::error::IpnError`].
pub async fn handle_ipn(state: &AppState, client: &str, body: &[u8]) -> Result<StatusCode> {
    let raw = String::from_utf8_lossy(body);

    let (verified, data) = state.verifier.verify(&state.log, client, &raw).await?;

    forward::forward(
        &state.http,
        &state.config.processing_url,
        &data,
        verified,
    )
    .await;

    Ok(StatusCode::OK)
}
