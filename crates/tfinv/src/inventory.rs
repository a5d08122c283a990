//! inventory document construction
//!
//! The builder folds terraform outputs and pre-fetched scale set members into
//! one grouped host document. It is a pure function over its inputs: the
//! callers fetch, the builder only arranges. Identical inputs produce
//! byte-identical documents.
//!
//! ## Document shape
//!
//! ```yaml
//! all:
//!   children:
//!     app_web:        # one group per role, empty when unpopulated
//!       hosts: {...}
//!     app_worker: {}
//!     app_scheduler: {}
//!     app_postgres: {}
//!     app_redis: {}
//!     dev:            # per-environment umbrella group
//!       children: [app_web, app_worker, app_scheduler, app_postgres, app_redis]
//!       vars: {...}   # shared connection defaults
//! ```
//!
//! ## Population
//!
//! Single-instance roles (postgres, redis, scheduler) read a private-ip
//! output and derive one host `{environment}-{service}-{role}`. Scaled roles
//! (web, worker) derive one host per enumerated member,
//! `{environment}-{service}-{role}-{NN}`, where `NN` is the member's
//! two-digit position after sorting by member name. Members without an
//! address are skipped while their position is still consumed - an
//! address-less host would only produce a connection failure downstream.
//!
//! When the composite `ansible_inventory` output is present its
//! `*_servers` sections take over the matching role groups entirely: hosts
//! and group vars are mirrored from the tree rather than synthesized.
//!
//! Absent outputs never error; they leave the matching group empty.

use indexmap::IndexMap;

use crate::environment::Environment;
use crate::outputs::Outputs;
use crate::value::Value;
use crate::vmss::InstanceRecord;

/// Remote user every provisioned vm is reachable as
pub const CONNECTION_USER: &str = "azureuser";
/// Interpreter override; the provisioned images carry no discoverable python
pub const PYTHON_INTERPRETER: &str = "/usr/bin/python3";

/// Role group names, in document order
const ROLES: [&str; 5] = ["web", "worker", "scheduler", "postgres", "redis"];

/// Pre-fetched scale set members, one list per scaled role
#[derive(derive_new::new, Default, Debug)]
pub struct ScaledInstances {
    pub web: Vec<InstanceRecord>,
    pub worker: Vec<InstanceRecord>,
}

/// Build the complete inventory document.
pub fn build(
    outputs: &Outputs,
    instances: &ScaledInstances,
    environment: Environment,
    service: &str,
) -> Value {
    let composite = outputs
        .get("ansible_inventory")
        .and_then(serde_json::Value::as_object);
    let section = |key: &str| {
        composite
            .and_then(|data| data.get(key))
            .and_then(serde_json::Value::as_object)
    };

    let web = match section("web_servers") {
        Some(section) => composite_group(section, environment, service, "web"),
        None => scaled_group(
            outputs,
            &instances.web,
            environment,
            service,
            "web",
            "web_vmss_name",
        ),
    };
    let worker = match section("worker_servers") {
        Some(section) => composite_group(section, environment, service, "worker"),
        None => scaled_group(
            outputs,
            &instances.worker,
            environment,
            service,
            "worker",
            "worker_vmss_name",
        ),
    };
    let scheduler = match section("scheduler_servers") {
        Some(section) => composite_group(section, environment, service, "scheduler"),
        None => single_group(
            outputs,
            "scheduler_private_ip",
            environment,
            service,
            "scheduler",
        ),
    };
    let postgres = single_group(outputs, "postgres_private_ip", environment, service, "postgres");
    let redis = single_group(outputs, "redis_private_ip", environment, service, "redis");

    let mut children: IndexMap<String, Value> = IndexMap::new();
    for (role, group) in [
        ("web", web),
        ("worker", worker),
        ("scheduler", scheduler),
        ("postgres", postgres),
        ("redis", redis),
    ] {
        children.insert(group_name(service, role), Value::Object(group));
    }

    children.insert(environment.to_string(), umbrella_group(outputs, service));

    let mut all = IndexMap::new();
    all.insert("children".to_string(), Value::Object(children));

    let mut root = IndexMap::new();
    root.insert("all".to_string(), Value::Object(all));
    Value::Object(root)
}

fn group_name(service: &str, role: &str) -> String {
    format!("{service}_{role}")
}

/// Umbrella group listing every role group, carrying the shared defaults
fn umbrella_group(outputs: &Outputs, service: &str) -> Value {
    let mut group = IndexMap::new();

    group.insert(
        "children".to_string(),
        Value::Array(
            ROLES
                .iter()
                .map(|role| group_name(service, role).into())
                .collect(),
        ),
    );

    let mut vars = IndexMap::new();
    for (name, key) in [
        ("resource_group", "resource_group_name"),
        ("postgres_host", "postgres_private_ip"),
        ("redis_host", "redis_private_ip"),
    ] {
        if let Some(value) = outputs.get_str(key) {
            vars.insert(name.to_string(), value.into());
        }
    }
    if !vars.is_empty() {
        group.insert("vars".to_string(), Value::Object(vars));
    }

    Value::Object(group)
}

/// One host derived from a single private-ip output; absent key, no host
fn single_group(
    outputs: &Outputs,
    ip_key: &str,
    environment: Environment,
    service: &str,
    role: &str,
) -> IndexMap<String, Value> {
    let mut group = IndexMap::new();

    let Some(address) = outputs.get_str(ip_key) else {
        return group;
    };

    let mut hosts = IndexMap::new();
    hosts.insert(
        format!("{environment}-{service}-{role}"),
        host_vars(address, environment, role, None),
    );
    group.insert("hosts".to_string(), Value::Object(hosts));
    group
}

/// One host per addressed scale set member
///
/// Members are sorted by name before positions are assigned so re-running
/// against an unchanged scale set yields an unchanged document.
fn scaled_group(
    outputs: &Outputs,
    records: &[InstanceRecord],
    environment: Environment,
    service: &str,
    role: &str,
    vmss_key: &str,
) -> IndexMap<String, Value> {
    let mut group = IndexMap::new();

    let Some(vmss_name) = outputs.get_str(vmss_key) else {
        return group;
    };

    let mut members: Vec<&InstanceRecord> = records.iter().collect();
    members.sort_by(|a, b| a.name.cmp(&b.name));

    let mut hosts = IndexMap::new();
    for (index, member) in members.iter().enumerate() {
        let Some(address) = member.ip.as_deref().filter(|ip| !ip.is_empty()) else {
            tracing::debug!(instance=%member.name, "skipping member without a private address");
            continue;
        };

        hosts.insert(
            format!("{environment}-{service}-{role}-{index:02}"),
            host_vars(address, environment, role, Some((vmss_name, &member.name))),
        );
    }

    if !hosts.is_empty() {
        group.insert("hosts".to_string(), Value::Object(hosts));
    }
    group
}

/// Group mirrored from one `*_servers` section of the composite output
fn composite_group(
    section: &serde_json::Map<String, serde_json::Value>,
    environment: Environment,
    service: &str,
    role: &str,
) -> IndexMap<String, Value> {
    let mut group = IndexMap::new();

    let mut hosts = IndexMap::new();
    if let Some(addresses) = section.get("hosts").and_then(serde_json::Value::as_array) {
        for (index, address) in addresses
            .iter()
            .filter_map(serde_json::Value::as_str)
            .enumerate()
        {
            let mut vars = IndexMap::new();
            vars.insert("ansible_host".to_string(), address.into());
            hosts.insert(
                format!("{environment}-{service}-{role}-{index:02}"),
                Value::Object(vars),
            );
        }
    }
    if !hosts.is_empty() {
        group.insert("hosts".to_string(), Value::Object(hosts));
    }

    if let Some(vars) = section.get("vars").and_then(Value::from_json) {
        if !matches!(&vars, Value::Object(map) if map.is_empty()) {
            group.insert("vars".to_string(), vars);
        }
    }

    group
}

fn host_vars(
    address: &str,
    environment: Environment,
    component: &str,
    scale_set: Option<(&str, &str)>,
) -> Value {
    let mut vars = IndexMap::new();
    vars.insert("ansible_host".to_string(), address.into());
    vars.insert("ansible_user".to_string(), CONNECTION_USER.into());
    vars.insert("deploy_env".to_string(), environment.as_str().into());
    vars.insert("deployment_type".to_string(), "vm".into());
    vars.insert("component".to_string(), component.into());
    if let Some((vmss_name, instance)) = scale_set {
        vars.insert("vmss_name".to_string(), vmss_name.into());
        vars.insert("vmss_instance".to_string(), instance.into());
    }
    vars.insert(
        "ansible_python_interpreter".to_string(),
        PYTHON_INTERPRETER.into(),
    );
    Value::Object(vars)
}
