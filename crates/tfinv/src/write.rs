//! document rendering and backup-rotating file writes
//!
//! The full document is rendered to a string before the target path is
//! touched. Only a successful render moves the previous file aside and
//! commits the new content, so a failure never leaves a half-written or
//! missing inventory behind.

use std::path::{Path, PathBuf};

use crate::value::Value;

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("unable to render document")]
    Render(#[from] serde_yaml::Error),
    #[error("unable to rotate previous file to {}", path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to write {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Render, rotate, then write.
///
/// An existing file at `path` is renamed to a `.backup` sibling first. The
/// optional header is emitted verbatim above the document.
pub fn write_document(value: &Value, path: &Path, header: Option<&str>) -> Result<(), WriteError> {
    let mut rendered = String::new();
    if let Some(header) = header {
        rendered.push_str(header);
        rendered.push('\n');
    }
    rendered.push_str(&serde_yaml::to_string(value)?);

    if path.exists() {
        let backup = backup_path(path);
        tracing::info!(backup=%backup.display(), "rotating previous file");
        std::fs::rename(path, &backup).map_err(|source| WriteError::Backup {
            path: backup.clone(),
            source,
        })?;
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, rendered).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path=%path.display(), "document written");
    Ok(())
}

/// `inventory/vm/dev.yml` rotates to `inventory/vm/dev.yml.backup`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document() -> Value {
        let mut inner = indexmap::IndexMap::new();
        inner.insert("key".to_string(), Value::from("value"));
        let mut root = indexmap::IndexMap::new();
        root.insert("doc".to_string(), Value::Object(inner));
        Value::Object(root)
    }

    #[test]
    fn writes_nested_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("doc.yml");

        write_document(&document(), &path, None).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "doc:\n  key: value\n"
        );
    }

    #[test]
    fn previous_content_rotates_to_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yml");
        std::fs::write(&path, "previous\n").unwrap();

        write_document(&document(), &path, None).unwrap();

        assert_eq!(
            std::fs::read_to_string(backup_path(&path)).unwrap(),
            "previous\n"
        );
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "doc:\n  key: value\n"
        );
    }

    #[test]
    fn header_is_emitted_above_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yml");

        write_document(&document(), &path, Some("---\n# generated\n")).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "---\n# generated\n\ndoc:\n  key: value\n"
        );
    }

    #[test]
    fn backup_path_appends_a_suffix() {
        assert_eq!(
            backup_path(Path::new("inventory/vm/dev.yml")),
            PathBuf::from("inventory/vm/dev.yml.backup")
        );
    }
}
