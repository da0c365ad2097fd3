use uuid::Uuid;

/// Confirmation dispatch to an external notification webhook. Fire and
/// forget: the workflow never waits on, or fails because of, the webhook.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    pub fn send_confirmation(
        &self,
        submission_id: Uuid,
        reference_number: &str,
        email: Option<String>,
    ) {
        let Some(url) = self.webhook_url.clone() else {
            tracing::info!(%submission_id, "No notification webhook configured, skipping dispatch");
            return;
        };

        let client = self.client.clone();
        let reference_number = reference_number.to_string();

        tokio::spawn(async move {
            let payload = serde_json::json!({
                "event": "eoi_submitted",
                "submission_id": submission_id,
                "reference_number": reference_number,
                "email": email,
            });

            match client.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::info!(%submission_id, "Confirmation notification dispatched");
                }
                Ok(response) => {
                    tracing::warn!(
                        %submission_id,
                        status = %response.status(),
                        "Notification webhook rejected confirmation"
                    );
                }
                Err(e) => {
                    tracing::warn!(%submission_id, error = %e, "Failed to dispatch confirmation");
                }
            }
        });
    }
}
