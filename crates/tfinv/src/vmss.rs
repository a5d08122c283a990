//! scale set member enumeration via the azure cli
//!
//! Membership of a scale set can grow and shrink between runs, so it is
//! enumerated at run time instead of being read from terraform state.
//! Enumeration is best-effort: a failure for one scale set degrades to an
//! empty member list (with a warning) rather than aborting the whole run.

use std::process::Command;

/// One scale set member as reported by `az vmss list-instances`
///
/// The address is optional: a member without a private network assignment
/// yet is reported with a null `ip`.
#[derive(derive_new::new, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct InstanceRecord {
    pub name: String,
    pub ip: Option<String>,
}

const INSTANCE_QUERY: &str =
    "[].{name:name, ip:networkProfile.networkInterfaces[0].ipConfigurations[0].privateIpAddress}";

/// Enumerate the current members of a scale set.
///
/// Order is whatever the cli returns; callers that need a stable order must
/// impose their own.
pub fn list_instances(resource_group: &str, vmss_name: &str) -> Vec<InstanceRecord> {
    tracing::info!(%resource_group, %vmss_name, "enumerating scale set members");

    let output = match Command::new("az")
        .args([
            "vmss",
            "list-instances",
            "--resource-group",
            resource_group,
            "--name",
            vmss_name,
            "--query",
            INSTANCE_QUERY,
            "--output",
            "json",
        ])
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            tracing::warn!(%vmss_name, error=%err, "unable to run az. Please install az cli");
            return Vec::new();
        }
    };

    if !output.status.success() {
        tracing::warn!(
            %vmss_name,
            stderr=%String::from_utf8_lossy(&output.stderr).trim(),
            "az vmss list-instances failed"
        );
        return Vec::new();
    }

    match serde_json::from_slice(&output.stdout) {
        Ok(members) => members,
        Err(err) => {
            tracing::warn!(%vmss_name, error=%err, "unable to parse az output");
            Vec::new()
        }
    }
}
