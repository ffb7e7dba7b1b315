use indexmap::IndexMap;
use reqwest::header;

/// Relay the notification fields to the internal processing endpoint.
///
/// When the notification did not verify, `payment_status` is overwritten
/// with `Failed` so order processing sees the rejection. Best-effort: the
/// response is not inspected and transport failures are logged but never
/// escalated.
pub async fn forward(
    client: &reqwest::Client,
    endpoint: &str,
    data: &IndexMap<String, String>,
    verified: bool,
) {
    if endpoint.is_empty() {
        tracing::warn!("PROCESSING_URL not configured, skipping IPN relay");
        return;
    }

    let mut fields = data.clone();
    if !verified {
        fields.insert("payment_status".to_string(), "Failed".to_string());
    }

    let pairs: Vec<(&str, &str)> = fields
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    match client
        .post(endpoint)
        .header(header::CONNECTION, "close")
        .form(&pairs)
        .send()
        .await
    {
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("Failed to relay IPN data to processing endpoint: {}", e);
        }
    }
}
