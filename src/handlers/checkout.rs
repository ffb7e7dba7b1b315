use axum::response::Html;

use crate::fields::FieldMap;
use crate::ipn;
use crate::logger::{Tag, Verbosity};
use crate::pages;
use crate::state::AppState;

/// `action=process`: collect the inbound form fields and render the
/// auto-submitting checkout form targeting PayPal.
pub fn process_checkout(state: &AppState, client: &str, body: &[u8]) -> Html<String> {
    let raw = String::from_utf8_lossy(body);

    let mut fields = FieldMap::new();
    for (name, value) in ipn::parse_pairs(&raw) {
        fields.set(name, value);
    }

    if state.log.enabled(Verbosity::High) {
        state
            .log
            .write(Tag::Info, client, "Submitting transaction to PayPal");
    }

    // The dump follows the verbosity alone; the mode only routes log output
    let dump = state.config.log_level == Verbosity::Debug;
    if dump && state.log.enabled(Verbosity::Debug) {
        state.log.write(Tag::Debug, client, "Dumping fields.");
    }
    if state.log.enabled(Verbosity::Medium) {
        state.log.submitted_transaction(client, &fields);
    }

    pages::checkout_page(
        &fields,
        state.config.paypal_url(),
        state.config.load_time_secs,
        dump,
    )
}
