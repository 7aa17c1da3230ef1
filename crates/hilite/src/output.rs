//! Backup, replace, and restore file operations.
//!
//! The backup-and-replace sequence never loses the original bytes: the new
//! content is fully written under a temporary name before any rename, then
//! the original becomes the `.bkp` sibling, then the temporary file takes
//! the original's name. A crash between steps leaves at most one extra
//! artifact on disk.

use std::fs;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// The `.bkp` sibling of a document, e.g. `report.pdf` → `report.pdf.bkp`.
pub fn backup_path(original: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{original}.bkp"))
}

fn temp_path(original: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{original}.tmp"))
}

/// Replace `original` in place, keeping the pre-edit bytes as a `.bkp` sibling.
///
/// `write_new` receives the temporary path and must fully write the
/// replacement content there; any failure aborts before the original is
/// touched. Refuses to run when a backup already exists, so an earlier
/// backup is never overwritten.
pub fn backup_and_replace<F>(original: &Utf8Path, write_new: F) -> anyhow::Result<()>
where
    F: FnOnce(&Utf8Path) -> anyhow::Result<()>,
{
    let backup = backup_path(original);
    if backup.exists() {
        bail!("backup {backup} already exists; restore or remove it first");
    }

    let temp = temp_path(original);
    write_new(&temp).with_context(|| format!("failed to write replacement for {original}"))?;

    fs::rename(original, &backup)
        .with_context(|| format!("failed to move {original} to {backup}"))?;
    fs::rename(&temp, original)
        .with_context(|| format!("failed to move {temp} into place as {original}"))?;

    debug!(file = %original, backup = %backup, "original replaced");
    Ok(())
}

/// Restore `original` from its `.bkp` sibling, consuming the backup.
pub fn restore_backup(original: &Utf8Path) -> anyhow::Result<()> {
    let backup = backup_path(original);
    if !backup.is_file() {
        bail!("no backup found for {original}");
    }
    if original.exists() {
        fs::remove_file(original.as_std_path())
            .with_context(|| format!("failed to remove {original}"))?;
    }
    fs::rename(&backup, original)
        .with_context(|| format!("failed to rename {backup} back to {original}"))?;

    debug!(file = %original, "backup restored");
    Ok(())
}

/// Every document in `dir` with a `.bkp` sibling, as original paths,
/// sorted for a deterministic processing order.
pub fn backed_up_documents(dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut originals = Vec::new();
    let entries = dir
        .read_dir_utf8()
        .with_context(|| format!("failed to read directory {dir}"))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {dir}"))?;
        let path = entry.path();
        if let Some(original) = path.as_str().strip_suffix(".bkp") {
            originals.push(Utf8PathBuf::from(original));
        }
    }
    originals.sort();
    Ok(originals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_dir(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn replace_keeps_original_bytes_in_backup() {
        let tmp = TempDir::new().unwrap();
        let original = utf8_dir(&tmp).join("doc.pdf");
        fs::write(&original, b"original bytes").unwrap();

        backup_and_replace(&original, |temp| {
            fs::write(temp, b"replacement bytes")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read(&original).unwrap(), b"replacement bytes");
        assert_eq!(fs::read(backup_path(&original)).unwrap(), b"original bytes");
    }

    #[test]
    fn replace_then_restore_is_byte_lossless() {
        let tmp = TempDir::new().unwrap();
        let original = utf8_dir(&tmp).join("doc.pdf");
        fs::write(&original, b"precious content").unwrap();

        backup_and_replace(&original, |temp| {
            fs::write(temp, b"edited")?;
            Ok(())
        })
        .unwrap();
        restore_backup(&original).unwrap();

        assert_eq!(fs::read(&original).unwrap(), b"precious content");
        assert!(!backup_path(&original).exists());
    }

    #[test]
    fn failed_write_leaves_original_untouched() {
        let tmp = TempDir::new().unwrap();
        let original = utf8_dir(&tmp).join("doc.pdf");
        fs::write(&original, b"still here").unwrap();

        let result = backup_and_replace(&original, |_| bail!("simulated save failure"));
        assert!(result.is_err());
        assert_eq!(fs::read(&original).unwrap(), b"still here");
        assert!(!backup_path(&original).exists());
    }

    #[test]
    fn existing_backup_is_never_overwritten() {
        let tmp = TempDir::new().unwrap();
        let original = utf8_dir(&tmp).join("doc.pdf");
        fs::write(&original, b"live").unwrap();
        fs::write(backup_path(&original), b"earlier backup").unwrap();

        let result = backup_and_replace(&original, |temp| {
            fs::write(temp, b"new")?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(fs::read(backup_path(&original)).unwrap(), b"earlier backup");
        assert_eq!(fs::read(&original).unwrap(), b"live");
    }

    #[test]
    fn restore_without_backup_fails() {
        let tmp = TempDir::new().unwrap();
        let original = utf8_dir(&tmp).join("doc.pdf");
        fs::write(&original, b"live").unwrap();
        assert!(restore_backup(&original).is_err());
    }

    #[test]
    fn backed_up_documents_lists_originals_sorted() {
        let tmp = TempDir::new().unwrap();
        let dir = utf8_dir(&tmp);
        fs::write(dir.join("b.pdf.bkp"), b"x").unwrap();
        fs::write(dir.join("a.pdf.bkp"), b"x").unwrap();
        fs::write(dir.join("c.pdf"), b"x").unwrap();

        let found = backed_up_documents(&dir).unwrap();
        let names: Vec<&str> = found
            .iter()
            .map(|p| p.file_name().unwrap())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }
}
