//! deployment environment selection and file layout
//!
//! Every path this tool reads or writes is keyed by the environment, relative
//! to the work directory (see the `-C/--directory` flag).

use std::fmt::Formatter;
use std::path::PathBuf;

/// Closed set of deployment environments
#[derive(clap::ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Test,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }

    /// Terraform working directory holding this environment's state
    pub fn terraform_dir(&self) -> PathBuf {
        PathBuf::from("terraform")
            .join("environments")
            .join(self.as_str())
    }

    /// Default path of the generated inventory document
    pub fn inventory_path(&self) -> PathBuf {
        PathBuf::from("inventory")
            .join("vm")
            .join(format!("{self}.yml"))
    }

    /// Path of the generated terraform variables file
    pub fn vars_path(&self) -> PathBuf {
        PathBuf::from("group_vars")
            .join(self.as_str())
            .join("terraform.yml")
    }

    /// Path of the create-once secrets template
    pub fn secrets_path(&self) -> PathBuf {
        PathBuf::from("group_vars")
            .join(self.as_str())
            .join("vault_template.yml")
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paths_are_keyed_by_environment() {
        assert_eq!(
            Environment::Dev.terraform_dir(),
            PathBuf::from("terraform/environments/dev")
        );
        assert_eq!(
            Environment::Test.inventory_path(),
            PathBuf::from("inventory/vm/test.yml")
        );
        assert_eq!(
            Environment::Prod.vars_path(),
            PathBuf::from("group_vars/prod/terraform.yml")
        );
        assert_eq!(
            Environment::Prod.secrets_path(),
            PathBuf::from("group_vars/prod/vault_template.yml")
        );
    }

    #[test]
    fn display_matches_cli_names() {
        assert_eq!(Environment::Dev.to_string(), "dev");
        assert_eq!(Environment::Test.to_string(), "test");
        assert_eq!(Environment::Prod.to_string(), "prod");
    }
}
