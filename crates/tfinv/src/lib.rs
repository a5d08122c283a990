//! # tfinv - terraform outputs to ansible inventory
//!
//! For CLI usage see the `tfinv` binary (`tfinv --help`).
//!
//! ## Introduction for developers
//!
//! Read this to understand how `tfinv` works internally.
//!
//! `tfinv` is one short, strictly sequential pipeline per run:
//!
//! 1. [outputs] runs `terraform output -json` for the selected
//!    [environment](environment::Environment) and wraps the resulting JSON
//!    document. Every top-level entry sits in a `{"value": ...}` envelope;
//!    accessors unwrap it and treat missing keys, nulls and empty strings
//!    uniformly as "no data".
//! 2. [vmss] enumerates the current members of each scale set named in the
//!    outputs via the azure cli. Enumeration failures degrade to empty
//!    member lists - one unreachable scale set must not cost the rest of
//!    the inventory.
//! 3. [inventory] is the core: it folds the outputs and member lists into a
//!    grouped host document. It is a pure function - the binary fetches,
//!    the builder arranges - which is also what makes it testable without
//!    either external cli.
//! 4. [vars] flattens an allowlist of outputs into `terraform_*` variables
//!    for the playbooks.
//! 5. [secrets] stages a create-once template of `CHANGE_ME` placeholders
//!    for ansible-vault.
//! 6. [write] renders everything through the order-preserving
//!    [value::Value] model and commits files only after a full in-memory
//!    render, rotating any previous file to a `.backup` sibling.
//!
//! Documents are rendered with insertion order intact (no alphabetizing),
//! so diffs between runs reflect actual provisioning changes.

pub mod environment;
pub mod inventory;
pub mod outputs;
pub mod secrets;
pub mod value;
pub mod vars;
pub mod vmss;
pub mod write;
