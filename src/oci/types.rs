//! OCI CLI output types
//!
//! The CLI prints `{"data": ...}` with kebab-case keys.

use serde::Deserialize;

/// Top-level CLI output
#[derive(Debug, Clone, Deserialize)]
pub struct OciResponse<T> {
    pub data: T,
}

/// A compute instance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Instance {
    pub id: String,
    pub display_name: String,
    pub lifecycle_state: String,
    pub shape: String,
    pub region: String,
    pub availability_domain: String,
    pub time_created: String,
    pub compartment_id: String,
}

/// A virtual cloud network
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Vcn {
    pub id: String,
    pub display_name: String,
    pub cidr_block: String,
    pub lifecycle_state: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instance_from_cli_output() {
        let response: OciResponse<Instance> = serde_json::from_value(json!({
            "data": {
                "id": "ocid1.instance.oc1..a",
                "display-name": "n8n-automation-server",
                "lifecycle-state": "RUNNING",
                "shape": "VM.Standard.A1.Flex",
                "region": "eu-madrid-1",
                "availability-domain": "AD-1",
                "time-created": "2024-05-01T10:00:00+00:00",
                "compartment-id": "ocid1.compartment.oc1..c",
                "freeform-tags": {}
            }
        }))
        .unwrap();
        assert_eq!(response.data.display_name, "n8n-automation-server");
        assert_eq!(response.data.availability_domain, "AD-1");
    }

    #[test]
    fn test_vcn_list_tolerates_missing_fields() {
        let response: OciResponse<Vec<Vcn>> = serde_json::from_value(json!({
            "data": [{"id": "ocid1.vcn.oc1..v", "cidr-block": "10.0.0.0/16"}]
        }))
        .unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].cidr_block, "10.0.0.0/16");
        assert!(response.data[0].display_name.is_empty());
    }
}
