//! terraform output document access
//!
//! [Outputs] wraps the single JSON document produced by `terraform output
//! -json`. Every top-level entry is wrapped in a `{"value": ...}` envelope
//! which the accessors unwrap transparently.
//!
//! Lookups never fail: an absent key, a JSON null and an empty string all
//! read as "no data". The inventory builder composes these lookups without
//! special-casing any path, which is what keeps partial provisioning states
//! (no scheduler yet, no scale sets yet) from aborting a run.

use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Default)]
pub struct Outputs {
    values: serde_json::Map<String, serde_json::Value>,
}

impl Outputs {
    /// Run `terraform output -json` in the given working directory and parse
    /// the result as one document.
    ///
    /// There is no partial parse: either the full document is valid JSON or
    /// the call fails.
    pub fn read(terraform_dir: &Path) -> Result<Self, ReadError> {
        if !terraform_dir.is_dir() {
            return Err(ReadError::MissingWorkDir(terraform_dir.to_path_buf()));
        }

        tracing::info!(dir=%terraform_dir.display(), "reading terraform outputs");

        let output = match Command::new("terraform")
            .args(["output", "-json"])
            .current_dir(terraform_dir)
            .output()
        {
            Ok(output) => output,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ReadError::TerraformNotFound)
            }
            Err(err) => return Err(ReadError::Io(err)),
        };

        if !output.status.success() {
            return Err(ReadError::CommandFailed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if stdout.is_empty() || stdout == "{}" {
            return Err(ReadError::NoOutput);
        }

        let values = serde_json::from_str(stdout)?;
        Ok(Self { values })
    }

    /// Envelope-unwrapping lookup
    ///
    /// Returns the payload behind `{"value": ...}` (or the raw entry when it
    /// is not enveloped). Missing keys and null payloads are [None].
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        let entry = self.values.get(key)?;

        let payload = match entry {
            serde_json::Value::Object(envelope) => envelope.get("value").unwrap_or(entry),
            other => other,
        };

        if payload.is_null() {
            None
        } else {
            Some(payload)
        }
    }

    /// String lookup; empty strings read as "no data"
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str().filter(|s| !s.is_empty())
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Outputs {
    fn from(values: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { values }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("terraform directory not found: {}", .0.display())]
    MissingWorkDir(PathBuf),
    #[error("terraform not found. Please install terraform")]
    TerraformNotFound,
    #[error("terraform output failed: {stderr}")]
    CommandFailed { stderr: String },
    #[error("no terraform outputs found. Have you run 'terraform apply'?")]
    NoOutput,
    #[error("unable to parse terraform output")]
    Json(#[from] serde_json::Error),
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outputs(json: serde_json::Value) -> Outputs {
        let serde_json::Value::Object(values) = json else {
            panic!("test outputs must be an object");
        };
        values.into()
    }

    #[test]
    fn envelope_is_unwrapped() {
        let outputs = outputs(serde_json::json!({
            "resource_group_name": {"sensitive": false, "type": "string", "value": "rg-dev"},
        }));

        assert_eq!(outputs.get_str("resource_group_name"), Some("rg-dev"));
    }

    #[test]
    fn bare_entries_are_accepted() {
        let outputs = outputs(serde_json::json!({"redis_ssl_port": 6380}));

        assert_eq!(
            outputs.get("redis_ssl_port"),
            Some(&serde_json::json!(6380))
        );
    }

    #[test]
    fn missing_null_and_empty_read_as_no_data() {
        let outputs = outputs(serde_json::json!({
            "null_output": {"value": null},
            "empty_output": {"value": ""},
        }));

        assert_eq!(outputs.get("not_there"), None);
        assert_eq!(outputs.get("null_output"), None);
        assert_eq!(outputs.get_str("empty_output"), None);
    }
}
