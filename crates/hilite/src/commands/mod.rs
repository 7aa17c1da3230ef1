//! Command implementations for the hilite CLI.

pub mod clean;
pub mod highlight;
pub mod info;
pub mod restore;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};

/// Bail with a pointed message unless `path` is an existing directory.
fn require_dir(path: &Utf8Path, what: &str) -> anyhow::Result<()> {
    if !path.is_dir() {
        bail!("{what} directory {path} does not exist");
    }
    Ok(())
}

/// Documents to operate on: one named file, or every `.pdf` in `dir`.
///
/// `file_name` may carry the `.pdf` suffix or not. Directory scans are
/// sorted by name so runs are deterministic.
fn resolve_targets(dir: &Utf8Path, file_name: Option<&str>) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if let Some(name) = file_name {
        let stem = name.strip_suffix(".pdf").unwrap_or(name);
        let path = dir.join(format!("{stem}.pdf"));
        if !path.is_file() {
            bail!("{path} does not exist");
        }
        return Ok(vec![path]);
    }

    let mut targets = Vec::new();
    let entries = dir
        .read_dir_utf8()
        .with_context(|| format!("failed to read directory {dir}"))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {dir}"))?;
        let path = entry.path();
        if path.extension() == Some("pdf") && path.is_file() {
            targets.push(path.to_owned());
        }
    }
    targets.sort();
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn require_dir_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = utf8_dir(&dir).join("absent");
        let err = require_dir(&missing, "input").unwrap_err();
        assert!(err.to_string().contains("input directory"));
    }

    #[test]
    fn scan_finds_only_pdfs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        std::fs::write(root.join("b.pdf"), b"x").unwrap();
        std::fs::write(root.join("a.pdf"), b"x").unwrap();
        std::fs::write(root.join("notes.txt"), b"x").unwrap();
        let targets = resolve_targets(&root, None).unwrap();
        let names: Vec<_> = targets.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn named_file_accepts_suffix_or_stem() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        std::fs::write(root.join("report.pdf"), b"x").unwrap();
        let with_suffix = resolve_targets(&root, Some("report.pdf")).unwrap();
        let without = resolve_targets(&root, Some("report")).unwrap();
        assert_eq!(with_suffix, without);
        assert_eq!(with_suffix.len(), 1);
    }

    #[test]
    fn named_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        assert!(resolve_targets(&root, Some("ghost")).is_err());
    }
}
