//! Cloudflare tool handlers
//!
//! Each handler parses its typed arguments, issues the gateway call(s), and
//! renders a text summary. Multi-step zone setup tools live in
//! [`crate::cloudflare::optimization`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::OnceCell;
use validator::Validate;

use crate::cloudflare::catalog::CloudflareTool;
use crate::cloudflare::client::{with_query, CloudflareApi, MultipartField, RequestBody};
use crate::cloudflare::steps::StepLog;
use crate::cloudflare::types::*;
use crate::config::cloudflare::{SERVER_NAME, SERVER_VERSION};
use crate::error::{CloudMcpError, CloudflareApiError, Result};
use crate::mcp::registry::{parse_args, ToolRegistry, ToolService};
use crate::mcp::types::{CallToolResult, ServerInfo};

/// Cloudflare tool set
pub struct CloudflareTools {
    api: Arc<dyn CloudflareApi>,

    registry: ToolRegistry<CloudflareTool>,

    /// Account of the API token, fetched on first use
    account_id: OnceCell<String>,
}

impl CloudflareTools {
    /// Create a new tool set over the given API
    pub fn new(api: Arc<dyn CloudflareApi>) -> Self {
        Self {
            api,
            registry: ToolRegistry::new(),
            account_id: OnceCell::new(),
        }
    }

    pub(crate) fn api(&self) -> &dyn CloudflareApi {
        self.api.as_ref()
    }

    /// The token's account id; `/accounts` is queried at most once
    pub async fn account_id(&self) -> Result<&str> {
        let id = self
            .account_id
            .get_or_try_init(|| self.fetch_account_id())
            .await?;
        Ok(id.as_str())
    }

    async fn fetch_account_id(&self) -> Result<String> {
        let accounts: Vec<Account> = serde_json::from_value(self.api.get("/accounts").await?)?;
        let account = accounts.into_iter().next().ok_or_else(|| {
            CloudMcpError::Cloudflare(CloudflareApiError::UnexpectedResponse {
                message: "no accounts are visible to this API token".to_string(),
            })
        })?;
        tracing::info!(account_id = %account.id, "Resolved Cloudflare account");
        Ok(account.id)
    }

    // ==================== Shared Operations ====================

    /// Create one DNS record in a zone
    pub(crate) async fn create_dns_record<B: Serialize + Sync>(
        &self,
        zone_id: &str,
        request: &B,
    ) -> Result<DnsRecord> {
        let result = self
            .api
            .post(
                &format!("/zones/{}/dns_records", zone_id),
                serde_json::to_value(request)?,
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Create one firewall rule in a zone
    pub(crate) async fn create_firewall_rule(
        &self,
        zone_id: &str,
        rule: &FirewallRuleInput,
    ) -> Result<CreatedResource> {
        let request = CreateFirewallRuleRequest {
            filter: FirewallFilter {
                expression: rule.expression.clone(),
            },
            action: rule.action.clone(),
            description: rule.description.clone(),
            priority: rule.priority,
        };

        let result = self
            .api
            .post(
                &format!("/zones/{}/firewall/rules", zone_id),
                serde_json::to_value(request)?,
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Change a zone setting such as `security_level` or `brotli`
    pub(crate) async fn set_zone_setting(&self, zone_id: &str, setting: &str, value: &str) -> Result<()> {
        self.api
            .patch(
                &format!("/zones/{}/settings/{}", zone_id, setting),
                json!({ "value": value }),
            )
            .await?;
        Ok(())
    }

    /// Turn on Bot Fight Mode for a zone
    pub(crate) async fn enable_bot_fight_mode(&self, zone_id: &str) -> Result<()> {
        self.api
            .patch(
                &format!("/zones/{}/bot_management", zone_id),
                json!({ "fight_mode": true }),
            )
            .await?;
        Ok(())
    }

    // ==================== Tool Handlers ====================

    async fn handle_create_dns_record(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateDnsRecordArgs = parse_args(args)?;

        let request = CreateDnsRecordRequest {
            record_type: args.record_type,
            name: args.name,
            content: args.content,
            ttl: args.ttl,
            proxied: args.proxied,
            comment: args.comment,
        };
        let record = self.create_dns_record(&args.zone_id, &request).await?;

        Ok(CallToolResult::text(format!(
            "DNS record created successfully!\n\nType: {}\nName: {}\nContent: {}\nProxied: {}\nID: {}",
            record.record_type,
            record.name,
            record.content,
            yes_no(record.proxied),
            record.id
        )))
    }

    async fn handle_bulk_dns_operations(&self, args: Value) -> Result<CallToolResult> {
        let args: BulkDnsArgs = parse_args(args)?;

        // Incomplete items are sent as-is; the API's rejection becomes their line
        let mut log = StepLog::new();
        for record in &args.records {
            match self.create_dns_record(&args.zone_id, record).await {
                Ok(_) => log.succeeded(format!("{} - Created", record.label())),
                Err(e) => log.failed(format!("{} - Error: {}", record.label(), e)),
            }
        }

        Ok(CallToolResult::text(format!(
            "Bulk DNS operations completed:\n\n{}",
            log.render("")
        )))
    }

    async fn handle_deploy_worker(&self, args: Value) -> Result<CallToolResult> {
        let args: DeployWorkerArgs = parse_args(args)?;
        let account_id = self.account_id().await?;
        let script_endpoint = format!(
            "/accounts/{}/workers/scripts/{}",
            account_id,
            urlencoding::encode(&args.script_name)
        );

        let mut fields = vec![MultipartField::new("script", args.code, "application/javascript")
            .with_file_name("worker.js")];

        if args.env_vars.is_some() || !args.kv_bindings.is_empty() {
            let metadata = json!({
                "body_part": "script",
                "env_vars": args.env_vars.clone().unwrap_or_default(),
                "kv_bindings": args.kv_bindings,
            });
            fields.push(MultipartField::new(
                "metadata",
                metadata.to_string(),
                "application/json",
            ));
        }

        self.api
            .request(Method::PUT, &script_endpoint, Some(RequestBody::Multipart(fields)))
            .await?;

        for route in &args.routes {
            self.api
                .post(&format!("{}/routes", script_endpoint), json!({ "pattern": route }))
                .await?;
        }

        let routes = if args.routes.is_empty() {
            "None".to_string()
        } else {
            args.routes.join(", ")
        };

        Ok(CallToolResult::text(format!(
            "Worker deployed successfully!\n\nScript Name: {}\nRoutes: {}\nEnvironment Variables: {}\nKV Bindings: {}",
            args.script_name,
            routes,
            args.env_vars.map(|vars| vars.len()).unwrap_or(0),
            args.kv_bindings.len()
        )))
    }

    async fn handle_create_kv_namespace(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateKvNamespaceArgs = parse_args(args)?;
        let account_id = self.account_id().await?;

        let title = if args.preview {
            format!("{}_preview", args.title)
        } else {
            args.title
        };

        let result = self
            .api
            .post(
                &format!("/accounts/{}/storage/kv/namespaces", account_id),
                json!({ "title": title }),
            )
            .await?;
        let namespace: KvNamespace = serde_json::from_value(result)?;

        Ok(CallToolResult::text(format!(
            "KV namespace created successfully!\n\nTitle: {}\nID: {}\nPreview: {}",
            namespace.title,
            namespace.id,
            yes_no(args.preview)
        )))
    }

    async fn handle_kv_put_value(&self, args: Value) -> Result<CallToolResult> {
        let args: KvPutValueArgs = parse_args(args)?;
        let account_id = self.account_id().await?;

        let endpoint = format!(
            "/accounts/{}/storage/kv/namespaces/{}/values/{}",
            account_id,
            args.namespace_id,
            urlencoding::encode(&args.key)
        );
        let query: Vec<(&str, String)> = args
            .expiration_ttl
            .map(|ttl| vec![("expiration_ttl", ttl.to_string())])
            .unwrap_or_default();

        self.api
            .request(
                Method::PUT,
                &with_query(&endpoint, &query),
                Some(RequestBody::Text(args.value.clone())),
            )
            .await?;

        let expiration = args
            .expiration_ttl
            .map(|ttl| format!("{} seconds", ttl))
            .unwrap_or_else(|| "None".to_string());

        Ok(CallToolResult::text(format!(
            "Value stored successfully!\n\nNamespace: {}\nKey: {}\nSize: {} bytes\nExpiration TTL: {}",
            args.namespace_id,
            args.key,
            args.value.len(),
            expiration
        )))
    }

    async fn handle_create_firewall_rule(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateFirewallRuleArgs = parse_args(args)?;
        let created = self.create_firewall_rule(&args.zone_id, &args.rule).await?;

        Ok(CallToolResult::text(format!(
            "Firewall rule created!\n\nExpression: {}\nAction: {}\nDescription: {}\nID: {}",
            args.rule.expression,
            args.rule.action,
            args.rule.description.as_deref().unwrap_or("None"),
            created.id
        )))
    }

    async fn handle_setup_rate_limiting(&self, args: Value) -> Result<CallToolResult> {
        let args: SetupRateLimitingArgs = parse_args(args)?;

        let mut body = json!({
            "match": args
                .match_conditions
                .clone()
                .unwrap_or_else(|| json!({ "request": { "url": "*" } })),
            "threshold": args.threshold,
            "period": args.period,
            "action": { "mode": args.action },
        });
        if let Some(description) = &args.description {
            body["description"] = json!(description);
        }

        let result = self
            .api
            .post(&format!("/zones/{}/rate_limits", args.zone_id), body)
            .await?;
        let created: CreatedResource = serde_json::from_value(result)?;

        Ok(CallToolResult::text(format!(
            "Rate limiting rule created!\n\nThreshold: {} requests\nPeriod: {} seconds\nAction: {}\nDescription: {}\nID: {}",
            args.threshold,
            args.period,
            args.action,
            args.description.as_deref().unwrap_or("None"),
            created.id
        )))
    }

    async fn handle_configure_waf(&self, args: Value) -> Result<CallToolResult> {
        let args: ConfigureWafArgs = parse_args(args)?;

        self.set_zone_setting(&args.zone_id, "waf", &args.mode)
            .await?;

        let mut text = format!("WAF configured!\n\nMode: {}", args.mode);

        if !args.rules.is_empty() {
            let mut log = StepLog::new();
            for rule in &args.rules {
                match self.create_firewall_rule(&args.zone_id, rule).await {
                    Ok(created) => {
                        log.succeeded(format!("{} - Created (ID: {})", rule.label(), created.id))
                    }
                    Err(e) => log.failed(format!("{} - Error: {}", rule.label(), e)),
                }
            }
            text.push_str(&format!("\n\nCustom rules:\n{}", log.render("")));
        }

        Ok(CallToolResult::text(text))
    }

    async fn handle_create_load_balancer(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateLoadBalancerArgs = parse_args(args)?;

        let mut body = json!({
            "name": args.name,
            "fallback_pool": args.fallback_pool,
            "default_pools": args.default_pools,
            "proxied": args.proxied,
        });
        if let Some(description) = &args.description {
            body["description"] = json!(description);
        }

        let result = self
            .api
            .post(&format!("/zones/{}/load_balancers", args.zone_id), body)
            .await?;
        let balancer: LoadBalancer = serde_json::from_value(result)?;

        Ok(CallToolResult::text(format!(
            "Load balancer created!\n\nName: {}\nFallback Pool: {}\nDefault Pools: {}\nProxied: {}\nID: {}",
            balancer.name.as_deref().unwrap_or(&args.name),
            args.fallback_pool,
            args.default_pools.join(", "),
            yes_no(balancer.proxied.unwrap_or(args.proxied)),
            balancer.id
        )))
    }

    async fn handle_create_origin_pool(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateOriginPoolArgs = parse_args(args)?;
        let account_id = self.account_id().await?;

        let mut body = json!({
            "name": args.name,
            "origins": args.origins,
            "enabled": args.enabled,
            "minimum_origins": args.minimum_origins,
        });
        if let Some(description) = &args.description {
            body["description"] = json!(description);
        }

        let result = self
            .api
            .post(&format!("/accounts/{}/load_balancers/pools", account_id), body)
            .await?;
        let pool: OriginPool = serde_json::from_value(result)?;

        let origin_count = if pool.origins.is_empty() {
            args.origins.len()
        } else {
            pool.origins.len()
        };
        let origin_lines = pool
            .origins
            .iter()
            .map(|o| format!("  • {} ({}){}", o.name, o.address, if o.enabled { "" } else { " [disabled]" }))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CallToolResult::text(format!(
            "Origin pool created!\n\nName: {}\nOrigins: {}\n{}\nEnabled: {}\nMinimum Origins: {}\nID: {}",
            pool.name.as_deref().unwrap_or(&args.name),
            origin_count,
            origin_lines,
            yes_no(args.enabled),
            args.minimum_origins,
            pool.id
        )))
    }

    async fn handle_create_access_application(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateAccessApplicationArgs = parse_args(args)?;

        let result = self
            .api
            .post(
                &format!("/accounts/{}/access/apps", args.account_id),
                json!({
                    "name": args.name,
                    "domain": args.domain,
                    "type": args.app_type,
                    "session_duration": args.session_duration,
                }),
            )
            .await?;
        let app: AccessApplication = serde_json::from_value(result)?;

        let mut text = format!(
            "Access application created!\n\nName: {}\nDomain: {}\nType: {}\nSession Duration: {}\nID: {}",
            args.name,
            app.domain.as_deref().unwrap_or(&args.domain),
            args.app_type,
            args.session_duration,
            app.id
        );
        if let Some(aud) = app.aud {
            text.push_str(&format!("\nAUD: {}", aud));
        }

        Ok(CallToolResult::text(text))
    }

    async fn handle_create_tunnel(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateTunnelArgs = parse_args(args)?;

        let result = self
            .api
            .post(
                &format!("/accounts/{}/cfd_tunnel", args.account_id),
                json!({
                    "name": args.name,
                    "tunnel_secret": args.tunnel_secret,
                }),
            )
            .await?;
        let tunnel: Tunnel = serde_json::from_value(result)?;

        Ok(CallToolResult::text(format!(
            "Tunnel created!\n\nName: {}\nID: {}\nCreated: {}",
            tunnel.name.as_deref().unwrap_or(&args.name),
            tunnel.id,
            tunnel.created_at.as_deref().unwrap_or("Unknown")
        )))
    }

    async fn handle_get_analytics(&self, args: Value) -> Result<CallToolResult> {
        let args: GetAnalyticsArgs = parse_args(args)?;

        let mut query = Vec::new();
        if let Some(since) = args.since {
            query.push(("since", since));
        }
        if let Some(until) = args.until {
            query.push(("until", until));
        }
        if let Some(dimensions) = args.dimensions {
            query.push(("dimensions", dimensions.join(",")));
        }
        if let Some(metrics) = args.metrics {
            query.push(("metrics", metrics.join(",")));
        }

        let endpoint = format!("/zones/{}/analytics/dashboard", args.zone_id);
        let result = self.api.get(&with_query(&endpoint, &query)).await?;
        let dashboard: AnalyticsDashboard = serde_json::from_value(result)?;
        let totals = dashboard.totals;

        Ok(CallToolResult::text(format!(
            "Analytics Summary:\n\nRequests: {}\nBandwidth: {} bytes\nThreats: {}\nUnique Visitors: {}",
            totals.requests.all, totals.bandwidth.all, totals.threats.all, totals.uniques.all
        )))
    }

    async fn handle_get_security_events(&self, args: Value) -> Result<CallToolResult> {
        let args: GetSecurityEventsArgs = parse_args(args)?;

        let mut query = Vec::new();
        if let Some(since) = args.since {
            query.push(("since", since));
        }
        if let Some(until) = args.until {
            query.push(("until", until));
        }
        if let Some(action) = args.action {
            query.push(("action", action));
        }

        let endpoint = format!("/zones/{}/security/events", args.zone_id);
        let result = self.api.get(&with_query(&endpoint, &query)).await?;
        let events: Vec<SecurityEvent> = if result.is_null() {
            Vec::new()
        } else {
            serde_json::from_value(result)?
        };

        if events.is_empty() {
            return Ok(CallToolResult::text("No security events found."));
        }

        let listing = events
            .iter()
            .map(|event| {
                format!(
                    "• {} from {} ({})\n  Request: {}{}\n  Time: {}\n  Rule: {}\n",
                    event.action.as_deref().unwrap_or("unknown"),
                    event.ip.as_deref().unwrap_or("unknown"),
                    event.country.as_deref().unwrap_or("??"),
                    event.host.as_deref().unwrap_or(""),
                    event.path.as_deref().unwrap_or("/"),
                    event.occurred_at.as_deref().unwrap_or("unknown"),
                    event.rule_id.as_deref().unwrap_or("n/a")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CallToolResult::text(format!(
            "Found {} security events:\n\n{}",
            events.len(),
            listing
        )))
    }
}

#[async_trait]
impl ToolService for CloudflareTools {
    type Kind = CloudflareTool;

    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
        }
    }

    fn registry(&self) -> &ToolRegistry<CloudflareTool> {
        &self.registry
    }

    async fn invoke(&self, tool: CloudflareTool, args: Value) -> Result<CallToolResult> {
        match tool {
            CloudflareTool::CreateDnsRecord => self.handle_create_dns_record(args).await,
            CloudflareTool::BulkDnsOperations => self.handle_bulk_dns_operations(args).await,
            CloudflareTool::DeployWorker => self.handle_deploy_worker(args).await,
            CloudflareTool::CreateKvNamespace => self.handle_create_kv_namespace(args).await,
            CloudflareTool::KvPutValue => self.handle_kv_put_value(args).await,
            CloudflareTool::CreateFirewallRule => self.handle_create_firewall_rule(args).await,
            CloudflareTool::SetupRateLimiting => self.handle_setup_rate_limiting(args).await,
            CloudflareTool::ConfigureWaf => self.handle_configure_waf(args).await,
            CloudflareTool::CreateLoadBalancer => self.handle_create_load_balancer(args).await,
            CloudflareTool::CreateOriginPool => self.handle_create_origin_pool(args).await,
            CloudflareTool::CreateAccessApplication => {
                self.handle_create_access_application(args).await
            }
            CloudflareTool::CreateTunnel => self.handle_create_tunnel(args).await,
            CloudflareTool::GetAnalytics => self.handle_get_analytics(args).await,
            CloudflareTool::GetSecurityEvents => self.handle_get_security_events(args).await,
            CloudflareTool::SetupN8nOptimization => {
                self.handle_setup_n8n_optimization(args).await
            }
            CloudflareTool::BulkSecuritySetup => self.handle_bulk_security_setup(args).await,
            CloudflareTool::OptimizeCaching => self.handle_optimize_caching(args).await,
        }
    }
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

// ==================== Argument Types ====================

pub(crate) const DEFAULT_TTL: u32 = 1;
const DEFAULT_RULE_PRIORITY: u32 = 1000;

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

fn default_rule_priority() -> u32 {
    DEFAULT_RULE_PRIORITY
}

pub(crate) fn default_true() -> bool {
    true
}

fn default_one() -> u32 {
    1
}

fn default_app_type() -> String {
    "self_hosted".to_string()
}

fn default_session_duration() -> String {
    "24h".to_string()
}

/// A firewall rule as accepted by the rule-creating tools
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FirewallRuleInput {
    #[validate(length(min = 1))]
    pub expression: String,

    #[validate(length(min = 1))]
    pub action: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_rule_priority")]
    pub priority: u32,
}

impl FirewallRuleInput {
    /// Short name used in status lines
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.expression)
    }
}

#[derive(Debug, Deserialize, Validate)]
struct CreateDnsRecordArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    record_type: String,

    #[validate(length(min = 1))]
    name: String,

    #[validate(length(min = 1))]
    content: String,

    #[serde(default = "default_ttl")]
    #[validate(range(min = 1))]
    ttl: u32,

    #[serde(default)]
    proxied: bool,

    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct BulkDnsArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    records: Vec<BulkDnsRecord>,
}

/// One item of a bulk DNS call, forwarded with whatever fields it has
#[derive(Debug, Deserialize, Serialize)]
struct BulkDnsRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    record_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,

    #[serde(default = "default_ttl")]
    ttl: u32,

    #[serde(default)]
    proxied: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl BulkDnsRecord {
    fn label(&self) -> String {
        format!(
            "{} ({})",
            self.name.as_deref().unwrap_or("<no name>"),
            self.record_type.as_deref().unwrap_or("<no type>")
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
struct DeployWorkerArgs {
    #[validate(length(min = 1))]
    script_name: String,

    #[validate(length(min = 1))]
    code: String,

    #[serde(default)]
    routes: Vec<String>,

    #[serde(default)]
    env_vars: Option<Map<String, Value>>,

    #[serde(default)]
    kv_bindings: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateKvNamespaceArgs {
    #[validate(length(min = 1))]
    title: String,

    #[serde(default)]
    preview: bool,
}

#[derive(Debug, Deserialize, Validate)]
struct KvPutValueArgs {
    #[validate(length(min = 1))]
    namespace_id: String,

    #[validate(length(min = 1))]
    key: String,

    value: String,

    #[serde(default)]
    #[validate(range(min = 1))]
    expiration_ttl: Option<u64>,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateFirewallRuleArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[serde(flatten)]
    #[validate]
    rule: FirewallRuleInput,
}

#[derive(Debug, Deserialize, Validate)]
struct SetupRateLimitingArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[serde(rename = "match", default)]
    match_conditions: Option<Value>,

    #[validate(range(min = 1))]
    threshold: u32,

    #[validate(range(min = 1))]
    period: u32,

    #[validate(length(min = 1))]
    action: String,

    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct ConfigureWafArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[validate(length(min = 1))]
    mode: String,

    #[serde(default)]
    rules: Vec<FirewallRuleInput>,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateLoadBalancerArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[validate(length(min = 1))]
    name: String,

    #[validate(length(min = 1))]
    fallback_pool: String,

    default_pools: Vec<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default = "default_true")]
    proxied: bool,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateOriginPoolArgs {
    #[validate(length(min = 1))]
    name: String,

    /// Forwarded untouched; the API validates each origin
    origins: Vec<Value>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default = "default_true")]
    enabled: bool,

    #[serde(default = "default_one")]
    minimum_origins: u32,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateAccessApplicationArgs {
    #[validate(length(min = 1))]
    account_id: String,

    #[validate(length(min = 1))]
    name: String,

    #[validate(length(min = 1))]
    domain: String,

    #[serde(rename = "type", default = "default_app_type")]
    app_type: String,

    #[serde(default = "default_session_duration")]
    session_duration: String,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateTunnelArgs {
    #[validate(length(min = 1))]
    account_id: String,

    #[validate(length(min = 1))]
    name: String,

    #[validate(length(min = 1))]
    tunnel_secret: String,
}

#[derive(Debug, Deserialize, Validate)]
struct GetAnalyticsArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[serde(default)]
    since: Option<String>,

    #[serde(default)]
    until: Option<String>,

    #[serde(default)]
    dimensions: Option<Vec<String>>,

    #[serde(default)]
    metrics: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate)]
struct GetSecurityEventsArgs {
    #[validate(length(min = 1))]
    zone_id: String,

    #[serde(default)]
    since: Option<String>,

    #[serde(default)]
    until: Option<String>,

    #[serde(default)]
    action: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_args_defaults() {
        let args: CreateDnsRecordArgs = parse_args(json!({
            "zone_id": "z1", "type": "A", "name": "app", "content": "1.2.3.4"
        }))
        .unwrap();
        assert_eq!(args.ttl, 1);
        assert!(!args.proxied);
        assert!(args.comment.is_none());
    }

    #[test]
    fn test_dns_args_reject_zero_ttl() {
        let err = parse_args::<CreateDnsRecordArgs>(json!({
            "zone_id": "z1", "type": "A", "name": "app", "content": "1.2.3.4", "ttl": 0
        }))
        .unwrap_err();
        assert!(matches!(err, CloudMcpError::Validation(_)));
    }

    #[test]
    fn test_firewall_args_flatten() {
        let args: CreateFirewallRuleArgs = parse_args(json!({
            "zone_id": "z1",
            "expression": "ip.src eq 198.51.100.1",
            "action": "block"
        }))
        .unwrap();
        assert_eq!(args.rule.priority, 1000);
        assert_eq!(args.rule.label(), "ip.src eq 198.51.100.1");
    }

    #[test]
    fn test_load_balancer_requires_pools() {
        let err = parse_args::<CreateLoadBalancerArgs>(json!({
            "zone_id": "z1", "name": "lb", "fallback_pool": "p0"
        }))
        .unwrap_err();
        assert!(matches!(err, CloudMcpError::Validation(_)));
    }

    #[test]
    fn test_bulk_record_keeps_only_given_fields() {
        let record: BulkDnsRecord =
            serde_json::from_value(json!({"type": "CNAME", "name": "docs"})).unwrap();
        assert_eq!(record.label(), "docs (CNAME)");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "CNAME", "name": "docs", "ttl": 1, "proxied": false})
        );

        let empty: BulkDnsRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.label(), "<no name> (<no type>)");
    }

    #[test]
    fn test_origin_pool_forwards_raw_origins() {
        let args: CreateOriginPoolArgs = parse_args(json!({
            "name": "pool", "origins": [{"address": "203.0.113.5"}]
        }))
        .unwrap();
        assert_eq!(args.origins[0], json!({"address": "203.0.113.5"}));
    }

    #[test]
    fn test_access_app_defaults() {
        let args: CreateAccessApplicationArgs = parse_args(json!({
            "account_id": "a1", "name": "n8n", "domain": "n8n.example.com"
        }))
        .unwrap();
        assert_eq!(args.app_type, "self_hosted");
        assert_eq!(args.session_duration, "24h");
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }
}
