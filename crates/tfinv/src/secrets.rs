//! secrets placeholder template
//!
//! Stages a fixed template of `CHANGE_ME` placeholders that a human replaces
//! and then encrypts with ansible-vault. The file is created exactly once:
//! an existing file is never touched, since it may already hold hand-edited
//! or encrypted content.

use std::io;
use std::path::Path;

use crate::environment::Environment;

const PLACEHOLDER: &str = "CHANGE_ME";

/// Ordered comment/placeholder pairs of the template
const TEMPLATE: [(&str, &[&str]); 5] = [
    (
        "# Database password (from Azure Key Vault or Terraform)",
        &["vault_database_password"],
    ),
    (
        "# Redis password (from Azure Key Vault or Terraform)",
        &["vault_redis_password"],
    ),
    ("# Azure Storage Account Key", &["vault_azure_storage_key"]),
    ("# Application secret key", &["vault_app_secret_key"]),
    ("# Git credentials", &["vault_git_username", "vault_git_token"]),
];

/// Write the placeholder template unless the file already exists.
///
/// Returns whether a file was created.
pub fn scaffold(path: &Path, environment: Environment) -> io::Result<bool> {
    if path.exists() {
        tracing::info!(path=%path.display(), "secrets template already exists, leaving it untouched");
        return Ok(false);
    }

    let mut content = String::from(
        "---\n# Secrets Template - Encrypt with ansible-vault\n# Copy this to vault.yml and encrypt:\n",
    );
    content.push_str(&format!(
        "#   ansible-vault encrypt group_vars/{environment}/vault.yml\n\n"
    ));

    for (comment, keys) in TEMPLATE {
        content.push_str(comment);
        content.push('\n');
        for key in keys {
            content.push_str(&format!("{key}: '{PLACEHOLDER}'\n"));
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;

    tracing::info!(path=%path.display(), "secrets template written, update and encrypt it");
    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writes_placeholders_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault_template.yml");

        assert!(scaffold(&path, Environment::Dev).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("vault_database_password: 'CHANGE_ME'"));
        assert!(content.contains("vault_git_token: 'CHANGE_ME'"));
        assert!(content.contains("ansible-vault encrypt group_vars/dev/vault.yml"));
    }

    #[test]
    fn never_touches_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault_template.yml");
        std::fs::write(&path, "sentinel: encrypted-by-hand\n").unwrap();

        assert!(!scaffold(&path, Environment::Dev).unwrap());

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "sentinel: encrypted-by-hand\n"
        );
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("group_vars").join("prod").join("vault_template.yml");

        assert!(scaffold(&path, Environment::Prod).unwrap());
        assert!(path.is_file());
    }
}
