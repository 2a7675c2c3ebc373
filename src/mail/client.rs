use crate::core::config::MailConfig;
use crate::models::order::BasketItem;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::time::Duration;

/// Client for the HTTP mail relay that delivers transactional email.
pub struct Mailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from_address: String,
}

/// One outbound message, serialized as the relay's JSON send request.
#[derive(Debug, Serialize)]
pub struct OutboundEmail<'a> {
    pub from: &'a str,
    pub to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<&'a str>,
    pub subject: &'a str,
    /// Free-form fields the email template renders.
    pub order_from: &'a str,
    pub order_for: &'a str,
    pub basket: &'a [BasketItem],
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create mail client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        })
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// Send one message through the relay. Any non-success status is an
    /// error; the caller decides what a failure means for its flow.
    pub async fn send(&self, email: &OutboundEmail<'_>) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api_key", &self.api_key)])
            .json(email)
            .send()
            .await
            .context("Failed to reach mail relay")?;

        if !response.status().is_success() {
            bail!("Mail relay returned error status: {}", response.status());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            endpoint: "http://localhost:9000/send".to_string(),
            api_key: "mail-key".to_string(),
            from_address: "mentor@example.org".to_string(),
            printers_address: "printers@example.org".to_string(),
            internal_address: "mentor@example.org".to_string(),
        }
    }

    #[test]
    fn test_mailer_creation() {
        assert!(Mailer::new(&config()).is_ok());
    }

    #[test]
    fn test_email_serialization_skips_absent_cc() {
        let basket = vec![BasketItem {
            item: "hoodie".to_string(),
            size: Some("M".to_string()),
            quantity: 2,
        }];
        let email = OutboundEmail {
            from: "mentor@example.org",
            to: "someone@example.org",
            cc: None,
            subject: "Dojo Merchandise Order Sent",
            order_from: "someone@example.org",
            order_for: "Sam",
            basket: &basket,
        };

        let json = serde_json::to_string(&email).expect("serialize");
        assert!(!json.contains("\"cc\""));
        assert!(json.contains("hoodie"));
        assert!(json.contains("Dojo Merchandise Order Sent"));
    }
}
