//! Twilio Integration
//!
//! API client for creating one outbound call resource.

use super::{CallError, Result};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// Call instructions: an inline TwiML document, or a URL that serves one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallBody {
    Twiml(String),
    Url(String),
}

/// One outbound call to be created.
#[derive(Debug, Clone)]
pub struct CallRequest {
    /// Destination number, E.164.
    pub to: String,
    /// Origin number, E.164.
    pub from: String,
    /// Instructions for the live call.
    pub body: CallBody,
}

/// Fields of the call resource Twilio returns. The status and direction
/// value sets are owned by Twilio; they are reported, never interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct CallOutcome {
    pub sid: String,
    pub status: String,
    pub direction: String,
}

/// Call creation boundary. The binary uses [`TwilioClient`]; tests
/// substitute their own implementation.
#[async_trait::async_trait]
pub trait CallSubmitter {
    async fn submit_call(&self, request: &CallRequest) -> Result<CallOutcome>;
}

/// Twilio client for API calls
#[derive(Debug, Clone)]
pub struct TwilioClient {
    account_sid: String,
    auth_token: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl TwilioClient {
    /// Create a new Twilio client
    pub fn new(account_sid: String, auth_token: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(Self {
            account_sid,
            auth_token,
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Get the call creation URL
    fn calls_url(&self) -> String {
        format!("{}/Accounts/{}/Calls.json", self.base_url, self.account_sid)
    }
}

#[async_trait::async_trait]
impl CallSubmitter for TwilioClient {
    async fn submit_call(&self, request: &CallRequest) -> Result<CallOutcome> {
        let mut params = vec![
            ("To", request.to.as_str()),
            ("From", request.from.as_str()),
        ];
        match &request.body {
            CallBody::Twiml(document) => params.push(("Twiml", document.as_str())),
            CallBody::Url(url) => params.push(("Url", url.as_str())),
        }

        let response = self
            .http_client
            .post(self.calls_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CallError::Api {
                status,
                message: error_detail(body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pull Twilio's human-readable `message` field out of an error body,
/// falling back to the raw body when it is not the expected JSON.
fn error_detail(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body)
}

/// Console deep-link for a submitted call.
pub fn console_url(sid: &str) -> String {
    format!("https://console.twilio.com/us1/monitor/logs/call/{}", sid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calls_url() {
        let client = TwilioClient::new("AC123".to_string(), "token".to_string()).unwrap();
        assert_eq!(
            client.calls_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Calls.json"
        );
    }

    #[test]
    fn test_calls_url_with_base_override() {
        let client = TwilioClient::new("AC123".to_string(), "token".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:7777");
        assert_eq!(
            client.calls_url(),
            "http://127.0.0.1:7777/Accounts/AC123/Calls.json"
        );
    }

    #[test]
    fn test_console_url_contains_sid() {
        let url = console_url("CA0123456789abcdef");
        assert_eq!(
            url,
            "https://console.twilio.com/us1/monitor/logs/call/CA0123456789abcdef"
        );
    }

    #[test]
    fn test_error_detail_plucks_message() {
        let body = r#"{"code": 21211, "message": "The 'To' number is not valid.", "status": 400}"#;
        assert_eq!(
            error_detail(body.to_string()),
            "The 'To' number is not valid."
        );
    }

    #[test]
    fn test_error_detail_falls_back_to_raw_body() {
        assert_eq!(
            error_detail("<html>gateway timeout</html>".to_string()),
            "<html>gateway timeout</html>"
        );
        assert_eq!(error_detail(String::new()), "");
    }

    #[test]
    fn test_outcome_deserializes_from_call_resource() {
        let json = r#"{
            "sid": "CA42",
            "status": "queued",
            "direction": "outbound-api",
            "to": "+15557654321",
            "from": "+15551234567",
            "price": null
        }"#;
        let outcome: CallOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.sid, "CA42");
        assert_eq!(outcome.status, "queued");
        assert_eq!(outcome.direction, "outbound-api");
    }
}
