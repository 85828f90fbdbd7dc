//! Cloudflare tool catalog
//!
//! Names, descriptions and input schemas of every Cloudflare tool. The
//! handlers live in [`crate::cloudflare::tools`].

use serde_json::{json, Value};

use crate::mcp::registry::ToolKind;

/// Every tool the Cloudflare server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudflareTool {
    // DNS
    CreateDnsRecord,
    BulkDnsOperations,
    // Workers & KV
    DeployWorker,
    CreateKvNamespace,
    KvPutValue,
    // Security & firewall
    CreateFirewallRule,
    SetupRateLimiting,
    ConfigureWaf,
    // Load balancing
    CreateLoadBalancer,
    CreateOriginPool,
    // Zero Trust
    CreateAccessApplication,
    CreateTunnel,
    // Analytics
    GetAnalytics,
    GetSecurityEvents,
    // Zone setup
    SetupN8nOptimization,
    BulkSecuritySetup,
    OptimizeCaching,
}

impl ToolKind for CloudflareTool {
    const ALL: &'static [Self] = &[
        CloudflareTool::CreateDnsRecord,
        CloudflareTool::BulkDnsOperations,
        CloudflareTool::DeployWorker,
        CloudflareTool::CreateKvNamespace,
        CloudflareTool::KvPutValue,
        CloudflareTool::CreateFirewallRule,
        CloudflareTool::SetupRateLimiting,
        CloudflareTool::ConfigureWaf,
        CloudflareTool::CreateLoadBalancer,
        CloudflareTool::CreateOriginPool,
        CloudflareTool::CreateAccessApplication,
        CloudflareTool::CreateTunnel,
        CloudflareTool::GetAnalytics,
        CloudflareTool::GetSecurityEvents,
        CloudflareTool::SetupN8nOptimization,
        CloudflareTool::BulkSecuritySetup,
        CloudflareTool::OptimizeCaching,
    ];

    fn name(self) -> &'static str {
        match self {
            CloudflareTool::CreateDnsRecord => "cf_create_dns_record",
            CloudflareTool::BulkDnsOperations => "cf_bulk_dns_operations",
            CloudflareTool::DeployWorker => "cf_deploy_worker",
            CloudflareTool::CreateKvNamespace => "cf_create_kv_namespace",
            CloudflareTool::KvPutValue => "cf_kv_put_value",
            CloudflareTool::CreateFirewallRule => "cf_create_firewall_rule",
            CloudflareTool::SetupRateLimiting => "cf_setup_rate_limiting",
            CloudflareTool::ConfigureWaf => "cf_configure_waf",
            CloudflareTool::CreateLoadBalancer => "cf_create_load_balancer",
            CloudflareTool::CreateOriginPool => "cf_create_origin_pool",
            CloudflareTool::CreateAccessApplication => "cf_create_access_application",
            CloudflareTool::CreateTunnel => "cf_create_tunnel",
            CloudflareTool::GetAnalytics => "cf_get_analytics",
            CloudflareTool::GetSecurityEvents => "cf_get_security_events",
            CloudflareTool::SetupN8nOptimization => "cf_setup_n8n_optimization",
            CloudflareTool::BulkSecuritySetup => "cf_bulk_security_setup",
            CloudflareTool::OptimizeCaching => "cf_optimize_caching",
        }
    }

    fn description(self) -> &'static str {
        match self {
            CloudflareTool::CreateDnsRecord => "Create a DNS record with advanced options",
            CloudflareTool::BulkDnsOperations => {
                "Perform bulk DNS operations (create multiple records)"
            }
            CloudflareTool::DeployWorker => "Deploy a Cloudflare Worker with code",
            CloudflareTool::CreateKvNamespace => "Create a KV storage namespace",
            CloudflareTool::KvPutValue => "Store a value in KV storage",
            CloudflareTool::CreateFirewallRule => {
                "Create advanced firewall rule with custom expression"
            }
            CloudflareTool::SetupRateLimiting => "Configure rate limiting rules",
            CloudflareTool::ConfigureWaf => "Configure Web Application Firewall rules",
            CloudflareTool::CreateLoadBalancer => "Create a load balancer with health checks",
            CloudflareTool::CreateOriginPool => "Create an origin pool for load balancing",
            CloudflareTool::CreateAccessApplication => "Create a Zero Trust Access application",
            CloudflareTool::CreateTunnel => "Create a Cloudflare Tunnel (formerly Argo Tunnel)",
            CloudflareTool::GetAnalytics => "Get detailed analytics data",
            CloudflareTool::GetSecurityEvents => "Get security events and threat analytics",
            CloudflareTool::SetupN8nOptimization => {
                "Complete setup optimization for n8n deployment"
            }
            CloudflareTool::BulkSecuritySetup => {
                "Bulk security configuration for multiple domains"
            }
            CloudflareTool::OptimizeCaching => {
                "Optimize caching rules for application performance"
            }
        }
    }

    fn input_schema(self) -> Value {
        match self {
            CloudflareTool::CreateDnsRecord => create_dns_record_schema(),
            CloudflareTool::BulkDnsOperations => bulk_dns_operations_schema(),
            CloudflareTool::DeployWorker => deploy_worker_schema(),
            CloudflareTool::CreateKvNamespace => create_kv_namespace_schema(),
            CloudflareTool::KvPutValue => kv_put_value_schema(),
            CloudflareTool::CreateFirewallRule => create_firewall_rule_schema(),
            CloudflareTool::SetupRateLimiting => setup_rate_limiting_schema(),
            CloudflareTool::ConfigureWaf => configure_waf_schema(),
            CloudflareTool::CreateLoadBalancer => create_load_balancer_schema(),
            CloudflareTool::CreateOriginPool => create_origin_pool_schema(),
            CloudflareTool::CreateAccessApplication => create_access_application_schema(),
            CloudflareTool::CreateTunnel => create_tunnel_schema(),
            CloudflareTool::GetAnalytics => get_analytics_schema(),
            CloudflareTool::GetSecurityEvents => get_security_events_schema(),
            CloudflareTool::SetupN8nOptimization => setup_n8n_optimization_schema(),
            CloudflareTool::BulkSecuritySetup => bulk_security_setup_schema(),
            CloudflareTool::OptimizeCaching => optimize_caching_schema(),
        }
    }
}

// ==================== Schema Definitions ====================

fn create_dns_record_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "type": {"type": "string", "description": "Record type (A, AAAA, CNAME, etc.)"},
            "name": {"type": "string", "description": "Record name"},
            "content": {"type": "string", "description": "Record content/value"},
            "ttl": {"type": "number", "description": "TTL in seconds (1 = auto)", "default": 1},
            "proxied": {"type": "boolean", "description": "Proxy through Cloudflare", "default": false},
            "comment": {"type": "string", "description": "Comment for the record"}
        },
        "required": ["zone_id", "type", "name", "content"]
    })
}

fn bulk_dns_operations_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "records": {
                "type": "array",
                "description": "Array of DNS records to create",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": {"type": "string"},
                        "name": {"type": "string"},
                        "content": {"type": "string"},
                        "proxied": {"type": "boolean", "default": false}
                    }
                }
            }
        },
        "required": ["zone_id", "records"]
    })
}

fn deploy_worker_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "script_name": {"type": "string", "description": "Worker script name"},
            "code": {"type": "string", "description": "Worker JavaScript code"},
            "routes": {"type": "array", "items": {"type": "string"}, "description": "Routes to bind"},
            "env_vars": {"type": "object", "description": "Environment variables"},
            "kv_bindings": {"type": "array", "items": {"type": "string"}, "description": "KV namespace bindings"}
        },
        "required": ["script_name", "code"]
    })
}

fn create_kv_namespace_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {"type": "string", "description": "KV namespace title"},
            "preview": {"type": "boolean", "description": "Create as preview namespace", "default": false}
        },
        "required": ["title"]
    })
}

fn kv_put_value_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "namespace_id": {"type": "string", "description": "KV namespace ID"},
            "key": {"type": "string", "description": "Key name"},
            "value": {"type": "string", "description": "Value to store"},
            "expiration_ttl": {"type": "number", "description": "TTL in seconds"}
        },
        "required": ["namespace_id", "key", "value"]
    })
}

fn create_firewall_rule_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "expression": {"type": "string", "description": "Firewall rule expression"},
            "action": {"type": "string", "description": "Action: block, challenge, allow, log, bypass"},
            "description": {"type": "string", "description": "Rule description"},
            "priority": {"type": "number", "description": "Rule priority", "default": 1000}
        },
        "required": ["zone_id", "expression", "action"]
    })
}

fn setup_rate_limiting_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "match": {"type": "object", "description": "Match conditions"},
            "threshold": {"type": "number", "description": "Request threshold"},
            "period": {"type": "number", "description": "Time period in seconds"},
            "action": {"type": "string", "description": "Action when threshold exceeded"},
            "description": {"type": "string", "description": "Rule description"}
        },
        "required": ["zone_id", "threshold", "period", "action"]
    })
}

fn configure_waf_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "mode": {"type": "string", "description": "WAF mode: off, on, simulate"},
            "rules": {"type": "array", "description": "Custom WAF rules"}
        },
        "required": ["zone_id", "mode"]
    })
}

fn create_load_balancer_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "name": {"type": "string", "description": "Load balancer name"},
            "fallback_pool": {"type": "string", "description": "Fallback pool ID"},
            "default_pools": {"type": "array", "items": {"type": "string"}, "description": "Default pool IDs"},
            "description": {"type": "string", "description": "Description"},
            "proxied": {"type": "boolean", "description": "Proxy through Cloudflare", "default": true}
        },
        "required": ["zone_id", "name", "fallback_pool", "default_pools"]
    })
}

fn create_origin_pool_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string", "description": "Pool name"},
            "origins": {"type": "array", "description": "Array of origin servers"},
            "description": {"type": "string", "description": "Pool description"},
            "enabled": {"type": "boolean", "description": "Enable pool", "default": true},
            "minimum_origins": {"type": "number", "description": "Minimum healthy origins", "default": 1}
        },
        "required": ["name", "origins"]
    })
}

fn create_access_application_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "account_id": {"type": "string", "description": "Account ID"},
            "name": {"type": "string", "description": "Application name"},
            "domain": {"type": "string", "description": "Application domain"},
            "type": {"type": "string", "description": "Application type", "default": "self_hosted"},
            "session_duration": {"type": "string", "description": "Session duration", "default": "24h"}
        },
        "required": ["account_id", "name", "domain"]
    })
}

fn create_tunnel_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "account_id": {"type": "string", "description": "Account ID"},
            "name": {"type": "string", "description": "Tunnel name"},
            "tunnel_secret": {"type": "string", "description": "Tunnel secret (base64)"}
        },
        "required": ["account_id", "name", "tunnel_secret"]
    })
}

fn get_analytics_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "since": {"type": "string", "description": "Start time (ISO 8601)"},
            "until": {"type": "string", "description": "End time (ISO 8601)"},
            "dimensions": {"type": "array", "items": {"type": "string"}, "description": "Analytics dimensions"},
            "metrics": {"type": "array", "items": {"type": "string"}, "description": "Metrics to retrieve"}
        },
        "required": ["zone_id"]
    })
}

fn get_security_events_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "since": {"type": "string", "description": "Start time"},
            "until": {"type": "string", "description": "End time"},
            "action": {"type": "string", "description": "Filter by action (block, challenge, etc.)"}
        },
        "required": ["zone_id"]
    })
}

fn setup_n8n_optimization_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "domain": {"type": "string", "description": "n8n domain (e.g., n8n.example.com)"},
            "origin_ip": {"type": "string", "description": "Oracle Cloud instance IP"},
            "enable_security": {"type": "boolean", "description": "Enable security features", "default": true},
            "enable_performance": {"type": "boolean", "description": "Enable performance optimization", "default": true}
        },
        "required": ["zone_id", "domain", "origin_ip"]
    })
}

fn bulk_security_setup_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zones": {"type": "array", "items": {"type": "string"}, "description": "Zone IDs"},
            "security_level": {
                "type": "string",
                "description": "Security level: off, essentially_off, low, medium, high, under_attack"
            },
            "enable_ddos_protection": {"type": "boolean", "default": true},
            "enable_bot_fight": {"type": "boolean", "default": true},
            "custom_rules": {"type": "array", "description": "Custom security rules"}
        },
        "required": ["zones"]
    })
}

fn optimize_caching_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "zone_id": {"type": "string", "description": "Zone ID"},
            "cache_rules": {"type": "array", "description": "Custom cache rules"},
            "purge_cache": {"type": "boolean", "description": "Purge existing cache", "default": false},
            "enable_argo": {"type": "boolean", "description": "Enable Argo Smart Routing", "default": true}
        },
        "required": ["zone_id"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::registry::ToolRegistry;

    #[test]
    fn test_catalog_size_and_uniqueness() {
        let registry = ToolRegistry::<CloudflareTool>::new();
        assert_eq!(registry.len(), 17);
        assert_eq!(registry.list_tools().len(), CloudflareTool::ALL.len());
    }

    #[test]
    fn test_every_name_resolves_to_itself() {
        let registry = ToolRegistry::<CloudflareTool>::new();
        for &tool in CloudflareTool::ALL {
            assert_eq!(registry.resolve(tool.name()).unwrap(), tool);
            assert!(tool.name().starts_with("cf_"));
        }
    }

    #[test]
    fn test_required_fields_are_declared_properties() {
        for &tool in CloudflareTool::ALL {
            let schema = tool.input_schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            let properties = schema["properties"].as_object().unwrap();
            for required in schema["required"].as_array().unwrap() {
                let required = required.as_str().unwrap();
                assert!(
                    properties.contains_key(required),
                    "{} requires undeclared {}",
                    tool.name(),
                    required
                );
            }
        }
    }

    #[test]
    fn test_dns_record_defaults() {
        let schema = CloudflareTool::CreateDnsRecord.input_schema();
        assert_eq!(schema["properties"]["ttl"]["default"], 1);
        assert_eq!(schema["properties"]["proxied"]["default"], false);
        assert_eq!(
            schema["required"],
            json!(["zone_id", "type", "name", "content"])
        );
    }
}
