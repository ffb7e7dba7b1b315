use std::time::Duration;

use indexmap::IndexMap;
use reqwest::{header, StatusCode};

use crate::error::{IpnError, Result};
use crate::logger::{EventLog, Tag, Verbosity};

/// Command token PayPal expects at the front of the echo-verification body.
pub const VERIFY_COMMAND: &str = "cmd=_notify-validate";

/// Reply PayPal sends for an authentic notification. Anything else,
/// `INVALID` included, means the notification is not trusted.
pub const VERIFIED_TOKEN: &str = "VERIFIED";

pub const USER_AGENT: &str = "PayPal-IPN-Integration";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Decode one form-encoded value: `+` as space, then percent-decoding.
/// Invalid UTF-8 escapes are left as the raw text rather than dropped.
fn decode_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Parse a form-encoded body or query string into an ordered map.
///
/// Candidates are split on `&`, then on `=`; anything that does not yield
/// exactly one key and one value is silently dropped. Keys are kept raw,
/// values are decoded once.
pub fn parse_pairs(raw: &str) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    for candidate in raw.split('&') {
        let parts: Vec<&str> = candidate.split('=').collect();
        if parts.len() != 2 {
            continue;
        }
        map.insert(parts[0].to_string(), decode_value(parts[1]));
    }
    map
}

/// Parse an IPN body.
///
/// Same rules as [`parse_pairs`], plus the `payment_date` fix-up: a raw
/// value containing exactly one literal `+` has it re-escaped to `%2B`
/// before decoding, so a timezone offset survives instead of turning into
/// a space. Zero or two-or-more pluses are left alone.
pub fn parse_notification(raw: &str) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    for candidate in raw.split('&') {
        let parts: Vec<&str> = candidate.split('=').collect();
        if parts.len() != 2 {
            continue;
        }
        let (key, mut value) = (parts[0], parts[1].to_string());
        if key == "payment_date" && value.matches('+').count() == 1 {
            value = value.replace('+', "%2B");
        }
        map.insert(key.to_string(), decode_value(&value));
    }
    map
}

/// Build the echo-verification body: the validate command followed by every
/// parsed pair with its value re-encoded, in parse order.
pub fn encode_verification_body(data: &IndexMap<String, String>) -> String {
    let mut body = String::from(VERIFY_COMMAND);
    for (key, value) in data {
        body.push('&');
        body.push_str(key);
        body.push('=');
        body.push_str(&urlencoding::encode(value));
    }
    body
}

/// Outbound HTTP client for PayPal calls: HTTP/1.1 only, certificate and
/// hostname verification on, bounded connect timeout, no connection reuse.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .http1_only()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(0)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Verifies Instant Payment Notifications against PayPal's echo endpoint.
#[derive(Debug, Clone)]
pub struct IpnVerifier {
    client: reqwest::Client,
    endpoint: String,
}

impl IpnVerifier {
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(http_client(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Verify one raw IPN body.
    ///
    /// Parses the body, POSTs it back to PayPal prefixed with the validate
    /// command, and interprets the single-token reply. Returns the outcome
    /// together with the parsed notification data. Any `Err` means the
    /// notification must not be trusted.
    pub async fn verify(
        &self,
        log: &EventLog,
        client_addr: &str,
        raw_body: &str,
    ) -> Result<(bool, IndexMap<String, String>)> {
        if raw_body.is_empty() {
            log.write(Tag::Error, client_addr, "No data received in IPN POST.");
            return Err(IpnError::MissingPayload);
        }

        if log.enabled(Verbosity::High) {
            log.write(Tag::Trace, client_addr, "Processing PayPal IPN POST data.");
        }

        let data = parse_notification(raw_body);

        if log.enabled(Verbosity::High) {
            log.write(Tag::Trace, client_addr, "Building IPN Verification POST.");
        }

        let body = encode_verification_body(&data);

        if log.enabled(Verbosity::High) {
            log.write(Tag::Trace, client_addr, "Submitting the IPN Verification POST.");
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONNECTION, "close")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                log.write(
                    Tag::Error,
                    client_addr,
                    "An error occurred while submitting the IPN Validation POST.",
                );
                IpnError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            log.write(
                Tag::Error,
                client_addr,
                &format!(
                    "PayPal replied with a {} code to the IPN Validation POST.",
                    status.as_u16()
                ),
            );
            return Err(IpnError::UnexpectedStatus(status.as_u16()));
        }

        if log.enabled(Verbosity::High) {
            log.write(Tag::Trace, client_addr, "Processing the validation response.");
        }

        let reply = response.text().await.map_err(|e| {
            log.write(
                Tag::Error,
                client_addr,
                "An error occurred while reading the IPN Validation response.",
            );
            IpnError::Transport(e.to_string())
        })?;

        let verified = reply == VERIFIED_TOKEN;
        log.ipn_results(client_addr, verified, &reply, &data);
        if verified {
            log.write(
                Tag::Info,
                client_addr,
                "The transaction was verified and completed.",
            );
        } else {
            log.write(
                Tag::Info,
                client_addr,
                "The transaction was not verified and could not be completed.",
            );
        }

        Ok((verified, data))
    }
}
