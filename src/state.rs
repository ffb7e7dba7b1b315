use std::sync::Arc;

use crate::config::Config;
use crate::ipn::{self, IpnVerifier};
use crate::logger::EventLog;

/// Shared per-process state: the immutable configuration, the transaction
/// log, and the outbound HTTP client (reused for verification and relay).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub log: Arc<EventLog>,
    pub http: reqwest::Client,
    pub verifier: IpnVerifier,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = ipn::http_client();
        let log = Arc::new(EventLog::new(
            config.log_mode,
            config.log_level,
            config.log_file.clone(),
        ));
        let verifier = IpnVerifier::with_client(http.clone(), config.paypal_url());

        Self {
            config: Arc::new(config),
            log,
            http,
            verifier,
        }
    }
}
