//! OCI tool catalog

use serde_json::{json, Value};

use crate::mcp::registry::ToolKind;

/// Every tool the OCI server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OciTool {
    ListInstances,
    StartInstance,
    StopInstance,
    GetInstanceDetails,
    ListVcns,
    CreateInstance,
    SetupN8nInstance,
}

impl ToolKind for OciTool {
    const ALL: &'static [Self] = &[
        OciTool::ListInstances,
        OciTool::StartInstance,
        OciTool::StopInstance,
        OciTool::GetInstanceDetails,
        OciTool::ListVcns,
        OciTool::CreateInstance,
        OciTool::SetupN8nInstance,
    ];

    fn name(self) -> &'static str {
        match self {
            OciTool::ListInstances => "oci_list_instances",
            OciTool::StartInstance => "oci_start_instance",
            OciTool::StopInstance => "oci_stop_instance",
            OciTool::GetInstanceDetails => "oci_get_instance_details",
            OciTool::ListVcns => "oci_list_vcns",
            OciTool::CreateInstance => "oci_create_instance",
            OciTool::SetupN8nInstance => "oci_setup_n8n_instance",
        }
    }

    fn description(self) -> &'static str {
        match self {
            OciTool::ListInstances => "List all compute instances in Oracle Cloud",
            OciTool::StartInstance => "Start a stopped compute instance",
            OciTool::StopInstance => "Stop a running compute instance",
            OciTool::GetInstanceDetails => "Get detailed information about a specific instance",
            OciTool::ListVcns => "List Virtual Cloud Networks (VCNs)",
            OciTool::CreateInstance => "Create a new compute instance",
            OciTool::SetupN8nInstance => "Create and configure an instance optimized for n8n",
        }
    }

    fn input_schema(self) -> Value {
        match self {
            OciTool::ListInstances => json!({
                "type": "object",
                "properties": {
                    "compartment_id": {
                        "type": "string",
                        "description": "Compartment OCID (optional, defaults to tenancy root)"
                    },
                    "lifecycle_state": {
                        "type": "string",
                        "description": "Filter by lifecycle state (RUNNING, STOPPED, etc.)"
                    }
                }
            }),
            OciTool::StartInstance => instance_id_schema("Instance OCID to start", None),
            OciTool::StopInstance => instance_id_schema(
                "Instance OCID to stop",
                Some(json!({
                    "type": "string",
                    "description": "Stop action: STOP or SOFTSTOP",
                    "default": "STOP"
                })),
            ),
            OciTool::GetInstanceDetails => instance_id_schema("Instance OCID", None),
            OciTool::ListVcns => json!({
                "type": "object",
                "properties": {
                    "compartment_id": {"type": "string", "description": "Compartment OCID (optional)"}
                }
            }),
            OciTool::CreateInstance => json!({
                "type": "object",
                "properties": {
                    "display_name": {
                        "type": "string",
                        "description": "Display name for the instance",
                        "required": true
                    },
                    "shape": {
                        "type": "string",
                        "description": "Instance shape (e.g., VM.Standard.A1.Flex)",
                        "default": "VM.Standard.A1.Flex"
                    },
                    "image_id": {"type": "string", "description": "OS image OCID", "required": true},
                    "subnet_id": {"type": "string", "description": "Subnet OCID", "required": true},
                    "compartment_id": {"type": "string", "description": "Compartment OCID", "required": true},
                    "ssh_public_key": {
                        "type": "string",
                        "description": "SSH public key for access",
                        "required": true
                    }
                },
                "required": ["display_name", "image_id", "subnet_id", "compartment_id", "ssh_public_key"]
            }),
            OciTool::SetupN8nInstance => json!({
                "type": "object",
                "properties": {
                    "instance_name": {
                        "type": "string",
                        "description": "Name for the n8n instance",
                        "default": "n8n-automation-server"
                    },
                    "compartment_id": {"type": "string", "description": "Compartment OCID", "required": true},
                    "ssh_public_key": {
                        "type": "string",
                        "description": "SSH public key for access",
                        "required": true
                    }
                },
                "required": ["compartment_id", "ssh_public_key"]
            }),
        }
    }
}

fn instance_id_schema(description: &str, action: Option<Value>) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": {
            "instance_id": {"type": "string", "description": description, "required": true}
        },
        "required": ["instance_id"]
    });
    if let Some(action) = action {
        schema["properties"]["action"] = action;
    }
    schema
}
