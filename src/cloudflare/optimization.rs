//! Multi-step zone setup tools
//!
//! Every step is attempted regardless of earlier failures, and each outcome
//! becomes one line of the tool's text result.

use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::cloudflare::steps::StepLog;
use crate::cloudflare::tools::{default_true, CloudflareTools, FirewallRuleInput, DEFAULT_TTL};
use crate::cloudflare::types::CreateDnsRecordRequest;
use crate::error::Result;
use crate::mcp::registry::parse_args;
use crate::mcp::types::CallToolResult;

/// Expression challenged by the n8n admin protection rule
pub const N8N_ADMIN_EXPRESSION: &str = r#"(http.request.uri.path eq "/") and (ip.geoip.country ne "ES" and ip.geoip.country ne "US")"#;

pub const N8N_ADMIN_DESCRIPTION: &str =
    "n8n Admin Protection - Challenge non-ES/US traffic to admin";

const N8N_FOOTER: &str = "Your n8n instance is now optimized for:\n\
• DNS proxying for performance and security\n\
• DDoS protection and bot mitigation\n\
• Aggressive caching for static assets\n\
• Global CDN acceleration\n\
• Admin panel protection";

impl CloudflareTools {
    pub(crate) async fn handle_setup_n8n_optimization(&self, args: Value) -> Result<CallToolResult> {
        let args: N8nOptimizationArgs = parse_args(args)?;
        let zone = args.zone_id.as_str();
        let mut log = StepLog::new();

        // A bad origin is the API's to reject; the remaining steps still run
        let record = CreateDnsRecordRequest {
            record_type: "A".to_string(),
            name: record_name(&args.domain).to_string(),
            content: args.origin_ip.clone(),
            ttl: DEFAULT_TTL,
            proxied: true,
            comment: None,
        };
        log.record(
            self.create_dns_record(zone, &record).await,
            "DNS A record created and proxied",
            "DNS record failed",
        );

        if args.enable_security {
            log.record(
                self.set_zone_setting(zone, "security_level", "medium").await,
                "Security level set to medium",
                "Security level failed",
            );
            log.record(
                self.enable_bot_fight_mode(zone).await,
                "Bot Fight Mode enabled",
                "Bot Fight Mode failed",
            );

            let rule = FirewallRuleInput {
                expression: N8N_ADMIN_EXPRESSION.to_string(),
                action: "challenge".to_string(),
                description: Some(N8N_ADMIN_DESCRIPTION.to_string()),
                priority: 1000,
            };
            log.record(
                self.create_firewall_rule(zone, &rule).await,
                "Admin protection firewall rule created",
                "Admin protection firewall rule failed",
            );
        }

        if args.enable_performance {
            log.record(
                self.set_zone_setting(zone, "always_online", "on").await,
                "Always Online enabled",
                "Always Online failed",
            );
            log.record(
                self.set_zone_setting(zone, "cache_level", "aggressive").await,
                "Aggressive caching enabled",
                "Aggressive caching failed",
            );
            log.record(
                self.set_zone_setting(zone, "brotli", "on").await,
                "Brotli compression enabled",
                "Brotli compression failed",
            );
        }

        tracing::info!(
            zone_id = zone,
            steps = log.len(),
            failures = log.failure_count(),
            "n8n optimization finished"
        );

        Ok(CallToolResult::text(format!(
            "n8n Cloudflare optimization completed!\n\n{}\n\n{}",
            log.render(""),
            N8N_FOOTER
        )))
    }

    pub(crate) async fn handle_bulk_security_setup(&self, args: Value) -> Result<CallToolResult> {
        let args: BulkSecurityArgs = parse_args(args)?;
        let mut blocks = Vec::with_capacity(args.zones.len());

        for zone in &args.zones {
            let mut log = StepLog::new();

            log.record(
                self.set_zone_setting(zone, "security_level", &args.security_level)
                    .await,
                format!("Security level set to {}", args.security_level),
                "Security level failed",
            );

            if args.enable_ddos_protection {
                log.record(
                    self.set_zone_setting(zone, "advanced_ddos", "on").await,
                    "Advanced DDoS protection enabled",
                    "DDoS protection failed",
                );
            }

            if args.enable_bot_fight {
                log.record(
                    self.enable_bot_fight_mode(zone).await,
                    "Bot Fight Mode enabled",
                    "Bot Fight Mode failed",
                );
            }

            for rule in &args.custom_rules {
                log.record(
                    self.create_firewall_rule(zone, rule).await,
                    format!("Custom rule created: {}", rule.label()),
                    format!("Custom rule {} failed", rule.label()),
                );
            }

            blocks.push(format!("Zone {}:\n{}", zone, log.render("  ")));
        }

        Ok(CallToolResult::text(format!(
            "Bulk security setup completed for {} zones:\n\n{}",
            args.zones.len(),
            blocks.join("\n\n")
        )))
    }

    pub(crate) async fn handle_optimize_caching(&self, args: Value) -> Result<CallToolResult> {
        let args: OptimizeCachingArgs = parse_args(args)?;
        let zone = args.zone_id.as_str();
        let mut log = StepLog::new();

        if args.purge_cache {
            log.record(
                self.api()
                    .post(
                        &format!("/zones/{}/purge_cache", zone),
                        json!({ "purge_everything": true }),
                    )
                    .await,
                "Cache purged",
                "Cache purge failed",
            );
        }

        if args.enable_argo {
            log.record(
                self.api()
                    .patch(
                        &format!("/zones/{}/argo/smart_routing", zone),
                        json!({ "value": "on" }),
                    )
                    .await,
                "Argo Smart Routing enabled",
                "Argo Smart Routing failed",
            );
        }

        for rule in &args.cache_rules {
            log.record(
                self.api()
                    .post(&format!("/zones/{}/pagerules", zone), rule.page_rule())
                    .await,
                format!("Cache rule created for {}", rule.pattern),
                format!("Cache rule for {} failed", rule.pattern),
            );
        }

        let body = if log.is_empty() {
            "No caching changes requested.".to_string()
        } else {
            log.render("")
        };

        Ok(CallToolResult::text(format!(
            "Caching optimization completed!\n\n{}",
            body
        )))
    }
}

/// First label of a domain: `n8n.example.com` -> `n8n`
fn record_name(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

fn default_security_level() -> String {
    "medium".to_string()
}

fn default_cache_level() -> String {
    "cache_everything".to_string()
}

#[derive(Debug, Deserialize, Validate)]
struct N8nOptimizationArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[validate(length(min = 1))]
    domain: String,

    origin_ip: String,

    #[serde(default = "default_true")]
    enable_security: bool,

    #[serde(default = "default_true")]
    enable_performance: bool,
}

#[derive(Debug, Deserialize, Validate)]
struct BulkSecurityArgs {
    zones: Vec<String>,

    #[serde(default = "default_security_level")]
    security_level: String,

    #[serde(default = "default_true")]
    enable_ddos_protection: bool,

    #[serde(default = "default_true")]
    enable_bot_fight: bool,

    #[serde(default)]
    custom_rules: Vec<FirewallRuleInput>,
}

#[derive(Debug, Deserialize, Validate)]
struct OptimizeCachingArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[serde(default)]
    cache_rules: Vec<CacheRule>,

    #[serde(default)]
    purge_cache: bool,

    #[serde(default = "default_true")]
    enable_argo: bool,
}

/// A URL pattern and how aggressively to cache it
#[derive(Debug, Clone, Deserialize)]
struct CacheRule {
    #[serde(alias = "url")]
    pattern: String,

    #[serde(default = "default_cache_level")]
    cache_level: String,

    #[serde(default)]
    edge_cache_ttl: Option<u64>,
}

impl CacheRule {
    fn page_rule(&self) -> Value {
        let mut actions = vec![json!({ "id": "cache_level", "value": self.cache_level })];
        if let Some(ttl) = self.edge_cache_ttl {
            actions.push(json!({ "id": "edge_cache_ttl", "value": ttl }));
        }

        json!({
            "targets": [{
                "target": "url",
                "constraint": { "operator": "matches", "value": self.pattern }
            }],
            "actions": actions,
            "status": "active",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_name_is_first_label() {
        assert_eq!(record_name("n8n.example.com"), "n8n");
        assert_eq!(record_name("localhost"), "localhost");
    }

    #[test]
    fn test_n8n_flags_default_on() {
        let args: N8nOptimizationArgs = parse_args(json!({
            "zone_id": "z1", "domain": "n8n.example.com", "origin_ip": "203.0.113.10"
        }))
        .unwrap();
        assert!(args.enable_security);
        assert!(args.enable_performance);
    }

    #[test]
    fn test_n8n_accepts_any_origin_string() {
        let args: N8nOptimizationArgs = parse_args(json!({
            "zone_id": "z1", "domain": "n8n.example.com", "origin_ip": "origin.example.net"
        }))
        .unwrap();
        assert_eq!(args.origin_ip, "origin.example.net");
    }

    #[test]
    fn test_bulk_security_requires_zones() {
        assert!(parse_args::<BulkSecurityArgs>(json!({})).is_err());
        let args: BulkSecurityArgs = parse_args(json!({ "zones": ["z1"] })).unwrap();
        assert_eq!(args.security_level, "medium");
    }

    #[test]
    fn test_cache_rule_page_rule() {
        let rule: CacheRule = serde_json::from_value(json!({
            "url": "example.com/static/*", "edge_cache_ttl": 7200
        }))
        .unwrap();
        let body = rule.page_rule();
        assert_eq!(body["targets"][0]["constraint"]["value"], "example.com/static/*");
        assert_eq!(body["actions"][0]["value"], "cache_everything");
        assert_eq!(body["actions"][1]["value"], 7200);
    }
}
