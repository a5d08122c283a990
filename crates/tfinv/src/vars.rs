//! projection of terraform outputs into flat ansible variables
//!
//! A fixed allowlist of outputs is flattened into `terraform_*` variables
//! for the managed services the playbooks talk to directly (database, cache,
//! load balancer, storage, key vault, network). Outputs missing from the
//! tree are omitted entirely - the emitted key set is a true reflection of
//! what was actually provisioned, never a set of placeholder nulls.

use indexmap::IndexMap;

use crate::outputs::Outputs;
use crate::value::Value;

/// output key -> projected variable name
const PROJECTED: [(&str, &str); 14] = [
    ("postgresql_server_fqdn", "terraform_postgresql_fqdn"),
    ("postgresql_database_name", "terraform_postgresql_database"),
    ("postgresql_admin_username", "terraform_postgresql_username"),
    ("redis_hostname", "terraform_redis_hostname"),
    ("redis_ssl_port", "terraform_redis_ssl_port"),
    ("load_balancer_public_ip", "terraform_load_balancer_ip"),
    ("load_balancer_fqdn", "terraform_load_balancer_fqdn"),
    ("storage_account_name", "terraform_storage_account_name"),
    (
        "storage_account_primary_blob_endpoint",
        "terraform_storage_account_endpoint",
    ),
    ("key_vault_name", "terraform_key_vault_name"),
    ("key_vault_uri", "terraform_key_vault_uri"),
    ("resource_group_name", "terraform_resource_group"),
    ("vnet_name", "terraform_vnet_name"),
    ("vnet_id", "terraform_vnet_id"),
];

/// Header of the emitted variables file; the file is regenerated on every
/// run and must never be hand-edited.
pub const VARS_HEADER: &str =
    "---\n# Auto-generated from Terraform outputs\n# DO NOT EDIT MANUALLY - Will be overwritten\n";

/// Project the allowlisted outputs into a flat variable mapping.
pub fn project(outputs: &Outputs) -> Value {
    let mut vars = IndexMap::new();

    for (key, variable) in PROJECTED {
        let Some(payload) = outputs.get(key) else {
            continue;
        };
        if let Some(value) = Value::from_json(payload) {
            vars.insert(variable.to_string(), value);
        }
    }

    tracing::info!(count = vars.len(), "projected terraform variables");
    Value::Object(vars)
}
