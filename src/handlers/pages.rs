use axum::response::Html;
use indexmap::IndexMap;

use crate::logger::{Tag, Verbosity};
use crate::pages;
use crate::state::AppState;

/// `action=complete`: PayPal returned the buyer here after checkout. The
/// remaining query parameters are the transaction fields it sent back.
pub fn display_completed(
    state: &AppState,
    client: &str,
    data: &IndexMap<String, String>,
) -> Html<String> {
    if state.log.enabled(Verbosity::Medium) {
        state
            .log
            .write(Tag::Info, client, "The PayPal checkout has been completed.");
    }

    // The dump follows the verbosity alone; the mode only routes log output
    let dump = state.config.log_level == Verbosity::Debug;
    if dump && state.log.enabled(Verbosity::Debug) {
        state.log.write(Tag::Debug, client, "Dumping fields.");
    }

    pages::completed_page(
        data,
        &state.config.orders_url,
        state.config.load_time_secs,
        dump,
    )
}

/// `action=cancel`: the buyer backed out at PayPal.
pub fn display_cancelled(state: &AppState, client: &str) -> Html<String> {
    if state.log.enabled(Verbosity::Medium) {
        state
            .log
            .write(Tag::Info, client, "The transaction was cancelled by the user.");
    }

    pages::cancelled_page(&state.config.cart_url, state.config.load_time_secs)
}
