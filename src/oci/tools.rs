//! OCI tool handlers

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::config::oci::{SERVER_NAME, SERVER_VERSION};
use crate::config::OciConfig;
use crate::error::{OciCliError, Result};
use crate::mcp::registry::{parse_args, ToolRegistry, ToolService};
use crate::mcp::types::{CallToolResult, ServerInfo};
use crate::oci::catalog::OciTool;
use crate::oci::cli::{CliInvocation, OciCli};
use crate::oci::types::{Instance, OciResponse, Vcn};

/// OCI tool set
pub struct OciTools {
    cli: Arc<dyn OciCli>,

    registry: ToolRegistry<OciTool>,

    /// Used by list tools when no compartment is given
    default_compartment_id: Option<String>,
}

impl OciTools {
    pub fn new(cli: Arc<dyn OciCli>, config: &OciConfig) -> Self {
        Self {
            cli,
            registry: ToolRegistry::new(),
            default_compartment_id: config.default_compartment_id.clone(),
        }
    }

    /// Run the CLI and decode the `data` member of its output
    async fn run<T: DeserializeOwned>(&self, invocation: CliInvocation) -> Result<T> {
        let output = self.cli.execute(invocation).await?;
        let response: OciResponse<T> =
            serde_json::from_value(output).map_err(OciCliError::InvalidOutput)?;
        Ok(response.data)
    }

    /// Like [`Self::run`], but empty output means an empty list
    async fn run_list<T: DeserializeOwned>(&self, invocation: CliInvocation) -> Result<Vec<T>> {
        let output = self.cli.execute(invocation).await?;
        if output.is_null() {
            return Ok(Vec::new());
        }
        let response: OciResponse<Vec<T>> =
            serde_json::from_value(output).map_err(OciCliError::InvalidOutput)?;
        Ok(response.data)
    }

    fn compartment(&self, requested: Option<String>) -> Option<String> {
        requested.or_else(|| self.default_compartment_id.clone())
    }

    // ==================== Tool Handlers ====================

    async fn handle_list_instances(&self, args: Value) -> Result<CallToolResult> {
        let args: ListInstancesArgs = parse_args(args)?;

        let invocation = CliInvocation::new(["compute", "instance", "list"])
            .opt_pair("--compartment-id", self.compartment(args.compartment_id))
            .opt_pair("--lifecycle-state", args.lifecycle_state);
        let instances: Vec<Instance> = self.run_list(invocation).await?;

        let listing = instances
            .iter()
            .map(|instance| {
                format!(
                    "• {} ({})\n  Status: {}\n  Shape: {}\n  Region: {}\n",
                    instance.display_name,
                    instance.id,
                    instance.lifecycle_state,
                    instance.shape,
                    instance.region
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CallToolResult::text(format!(
            "Found {} instances:\n\n{}",
            instances.len(),
            listing
        )))
    }

    /// `compute instance action`; the action string is passed through as given
    async fn instance_action(&self, instance_id: &str, action: &str) -> Result<Instance> {
        self.run(
            CliInvocation::new(["compute", "instance", "action"])
                .arg_pair("--instance-id", instance_id)
                .arg_pair("--action", action),
        )
        .await
    }

    async fn handle_start_instance(&self, args: Value) -> Result<CallToolResult> {
        let args: InstanceIdArgs = parse_args(args)?;
        let instance = self
            .instance_action(&args.instance_id, START_ACTION)
            .await?;

        Ok(CallToolResult::text(format!(
            "Instance {} start command sent successfully.\nCurrent state: {}",
            args.instance_id, instance.lifecycle_state
        )))
    }

    async fn handle_stop_instance(&self, args: Value) -> Result<CallToolResult> {
        let args: StopInstanceArgs = parse_args(args)?;
        let instance = self
            .instance_action(&args.instance_id, &args.action)
            .await?;

        Ok(CallToolResult::text(format!(
            "Instance {} {} command sent successfully.\nCurrent state: {}",
            args.instance_id,
            args.action.to_lowercase(),
            instance.lifecycle_state
        )))
    }

    async fn handle_get_instance_details(&self, args: Value) -> Result<CallToolResult> {
        let args: InstanceIdArgs = parse_args(args)?;
        let instance: Instance = self
            .run(
                CliInvocation::new(["compute", "instance", "get"])
                    .arg_pair("--instance-id", args.instance_id),
            )
            .await?;

        Ok(CallToolResult::text(format!(
            "Instance Details:\n\nName: {}\nID: {}\nStatus: {}\nShape: {}\nRegion: {}\nAvailability Domain: {}\nTime Created: {}\nCompartment: {}",
            instance.display_name,
            instance.id,
            instance.lifecycle_state,
            instance.shape,
            instance.region,
            instance.availability_domain,
            instance.time_created,
            instance.compartment_id
        )))
    }

    async fn handle_list_vcns(&self, args: Value) -> Result<CallToolResult> {
        let args: ListVcnsArgs = parse_args(args)?;

        let invocation = CliInvocation::new(["network", "vcn", "list"])
            .opt_pair("--compartment-id", self.compartment(args.compartment_id));
        let vcns: Vec<Vcn> = self.run_list(invocation).await?;

        let listing = vcns
            .iter()
            .map(|vcn| {
                format!(
                    "• {} ({})\n  CIDR: {}\n  State: {}\n",
                    vcn.display_name, vcn.id, vcn.cidr_block, vcn.lifecycle_state
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CallToolResult::text(format!(
            "Found {} VCNs:\n\n{}",
            vcns.len(),
            listing
        )))
    }

    async fn handle_create_instance(&self, args: Value) -> Result<CallToolResult> {
        let args: CreateInstanceArgs = parse_args(args)?;

        // The key goes through stdin, never the argument list
        let invocation = CliInvocation::new(["compute", "instance", "launch"])
            .arg_pair("--display-name", args.display_name)
            .arg_pair("--shape", args.shape)
            .arg_pair("--image-id", args.image_id)
            .arg_pair("--subnet-id", args.subnet_id)
            .arg_pair("--compartment-id", args.compartment_id)
            .arg_pair("--ssh-authorized-keys-file", "/dev/stdin")
            .with_stdin(args.ssh_public_key);
        let instance: Instance = self.run(invocation).await?;

        tracing::info!(instance_id = %instance.id, "Instance launch requested");

        Ok(CallToolResult::text(format!(
            "Instance created successfully!\n\nName: {}\nID: {}\nShape: {}\nStatus: {}\n\nThe instance is being provisioned. You can check its status with the get_instance_details tool.",
            instance.display_name, instance.id, instance.shape, instance.lifecycle_state
        )))
    }

    async fn handle_setup_n8n_instance(&self, args: Value) -> Result<CallToolResult> {
        let args: SetupN8nInstanceArgs = parse_args(args)?;

        Ok(CallToolResult::text(format!(
            "Setting up n8n-optimized instance \"{}\"...\n\n\
             This tool would:\n\
             1. Create instance with Ubuntu 22.04\n\
             2. Configure security lists for ports 80, 443, 22\n\
             3. Set up cloud-init script for Docker installation\n\
             4. Configure firewall rules\n\
             5. Install our n8n repository automatically\n\n\
             Use the oci_create_instance tool for manual creation, or implement this for full automation.",
            args.instance_name
        )))
    }
}

#[async_trait]
impl ToolService for OciTools {
    type Kind = OciTool;

    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
        }
    }

    fn registry(&self) -> &ToolRegistry<OciTool> {
        &self.registry
    }

    async fn invoke(&self, tool: OciTool, args: Value) -> Result<CallToolResult> {
        match tool {
            OciTool::ListInstances => self.handle_list_instances(args).await,
            OciTool::StartInstance => self.handle_start_instance(args).await,
            OciTool::StopInstance => self.handle_stop_instance(args).await,
            OciTool::GetInstanceDetails => self.handle_get_instance_details(args).await,
            OciTool::ListVcns => self.handle_list_vcns(args).await,
            OciTool::CreateInstance => self.handle_create_instance(args).await,
            OciTool::SetupN8nInstance => self.handle_setup_n8n_instance(args).await,
        }
    }
}

// ==================== Argument Types ====================

const START_ACTION: &str = "START";

fn default_stop_action() -> String {
    "STOP".to_string()
}

fn default_shape() -> String {
    "VM.Standard.A1.Flex".to_string()
}

fn default_instance_name() -> String {
    "n8n-automation-server".to_string()
}

#[derive(Debug, Deserialize, Validate)]
struct ListInstancesArgs {
    #[serde(default)]
    compartment_id: Option<String>,

    #[serde(default)]
    lifecycle_state: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct ListVcnsArgs {
    #[serde(default)]
    compartment_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct InstanceIdArgs {
    #[validate(length(min = 1))]
    instance_id: String,
}

#[derive(Debug, Deserialize, Validate)]
struct StopInstanceArgs {
    #[validate(length(min = 1))]
    instance_id: String,

    #[serde(default = "default_stop_action")]
    action: String,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateInstanceArgs {
    #[validate(length(min = 1))]
    display_name: String,

    #[serde(default = "default_shape")]
    #[validate(length(min = 1))]
    shape: String,

    #[validate(length(min = 1))]
    image_id: String,

    #[validate(length(min = 1))]
    subnet_id: String,

    #[validate(length(min = 1))]
    compartment_id: String,

    #[validate(length(min = 1))]
    ssh_public_key: String,
}

#[derive(Debug, Deserialize, Validate)]
struct SetupN8nInstanceArgs {
    #[serde(default = "default_instance_name")]
    instance_name: String,

    #[validate(length(min = 1))]
    compartment_id: String,

    #[validate(length(min = 1))]
    ssh_public_key: String,
}
