//! Cloudflare API type definitions
//!
//! These types mirror the Cloudflare v4 API responses and are used for
//! serialization/deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CloudMcpError, Result};

/// Message used when the API fails without saying why
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Envelope wrapped around every v4 response
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiResponse {
    /// Whether the call succeeded; a missing flag counts as failure
    #[serde(default)]
    pub success: bool,

    /// Errors reported by the API
    #[serde(default)]
    pub errors: Option<Vec<ApiMessage>>,

    /// Payload
    #[serde(default)]
    pub result: Value,
}

impl ApiResponse {
    /// Unwrap the payload, or fail with the first reported error message
    pub fn into_result(self) -> Result<Value> {
        if self.success {
            return Ok(self.result);
        }

        let message = self
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .find(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

        Err(CloudMcpError::cloudflare(message))
    }
}

/// Error or informational message in the envelope
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    #[serde(default)]
    pub message: String,
}

/// An account the token can access
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,
}

/// A DNS record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub record_type: String,

    pub name: String,

    pub content: String,

    #[serde(default)]
    pub proxied: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Body of a DNS record create call
#[derive(Debug, Clone, Serialize)]
pub struct CreateDnsRecordRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Body of a firewall rule create call
#[derive(Debug, Clone, Serialize)]
pub struct CreateFirewallRuleRequest {
    pub filter: FirewallFilter,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: u32,
}

/// Filter expression attached to a firewall rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirewallFilter {
    pub expression: String,
}

/// Generic created resource; most create calls only need the id back
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResource {
    pub id: String,
}

/// A Workers KV namespace
#[derive(Debug, Clone, Deserialize)]
pub struct KvNamespace {
    pub id: String,
    pub title: String,
}

/// A load balancer
#[derive(Debug, Clone, Deserialize)]
pub struct LoadBalancer {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub proxied: Option<bool>,
}

/// An origin pool
#[derive(Debug, Clone, Deserialize)]
pub struct OriginPool {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub origins: Vec<Origin>,
}

/// One origin server inside a pool
#[derive(Debug, Clone, Deserialize)]
pub struct Origin {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// A Zero Trust Access application
#[derive(Debug, Clone, Deserialize)]
pub struct AccessApplication {
    pub id: String,

    #[serde(default)]
    pub aud: Option<String>,

    #[serde(default)]
    pub domain: Option<String>,
}

/// A Cloudflare Tunnel
#[derive(Debug, Clone, Deserialize)]
pub struct Tunnel {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Zone analytics dashboard result
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsDashboard {
    pub totals: AnalyticsTotals,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsTotals {
    pub requests: Counter,
    pub bandwidth: Counter,
    pub threats: Counter,
    pub uniques: Counter,
}

/// A total with an `all` field, as used across the dashboard payload
#[derive(Debug, Clone, Deserialize)]
pub struct Counter {
    #[serde(default)]
    pub all: u64,
}

/// A firewall/security event
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityEvent {
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default, alias = "clientIP", alias = "client_ip")]
    pub ip: Option<String>,

    #[serde(default, alias = "clientCountryName")]
    pub country: Option<String>,

    #[serde(default, alias = "clientRequestHTTPHost")]
    pub host: Option<String>,

    #[serde(default, alias = "clientRequestPath", alias = "uri")]
    pub path: Option<String>,

    #[serde(default, alias = "datetime")]
    pub occurred_at: Option<String>,

    #[serde(default, alias = "ruleId")]
    pub rule_id: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_unwraps_result() {
        let resp: ApiResponse =
            serde_json::from_value(json!({"success": true, "errors": [], "result": {"id": "x"}}))
                .unwrap();
        assert_eq!(resp.into_result().unwrap(), json!({"id": "x"}));
    }

    #[test]
    fn test_failure_uses_first_error() {
        let resp: ApiResponse = serde_json::from_value(json!({
            "success": false,
            "errors": [
                {"code": 7003, "message": "Could not route to /zones/bad"},
                {"code": 7000, "message": "No route for that URI"}
            ]
        }))
        .unwrap();
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Cloudflare API error: Could not route to /zones/bad");
    }

    #[test]
    fn test_failure_without_errors_uses_fallback() {
        let resp: ApiResponse = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(
            resp.into_result().unwrap_err().to_string(),
            "Cloudflare API error: Unknown error"
        );

        let resp: ApiResponse =
            serde_json::from_value(json!({"success": false, "errors": null})).unwrap();
        assert!(resp.into_result().unwrap_err().to_string().ends_with(UNKNOWN_ERROR));
    }

    #[test]
    fn test_missing_success_flag_is_failure() {
        let resp: ApiResponse = serde_json::from_value(json!({"result": {}})).unwrap();
        assert!(resp.into_result().is_err());
    }

    #[test]
    fn test_dns_record_request_omits_empty_comment() {
        let req = CreateDnsRecordRequest {
            record_type: "A".to_string(),
            name: "app".to_string(),
            content: "1.2.3.4".to_string(),
            ttl: 1,
            proxied: false,
            comment: None,
        };
        let value = serde_json::to_value(req).unwrap();
        assert_eq!(
            value,
            json!({"type": "A", "name": "app", "content": "1.2.3.4", "ttl": 1, "proxied": false})
        );
    }

    #[test]
    fn test_security_event_aliases() {
        let event: SecurityEvent = serde_json::from_value(json!({
            "action": "block",
            "clientIP": "203.0.113.9",
            "clientCountryName": "NL",
            "clientRequestPath": "/wp-login.php",
            "datetime": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(event.ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(event.path.as_deref(), Some("/wp-login.php"));
        assert_eq!(event.occurred_at.as_deref(), Some("2024-05-01T10:00:00Z"));
    }
}
