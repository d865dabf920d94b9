//! Append-only line writer with size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold (5 MB).
const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Backups kept after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Writes newline-terminated records to a file, rotating it when it grows
/// past a size limit.
///
/// A rotated file is renamed to `<stem>.json.<unix_secs>`; only the newest
/// backups are retained. The handle opens lazily on the first write.
pub struct FileWriter {
    path: PathBuf,
    max_bytes: u64,
    handle: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_SIZE_BYTES)
    }

    pub(crate) const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails if rotation, opening, or writing the file fails, or if the
    /// internal lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        if self.path.exists() {
            fs::rename(&self.path, self.path.with_extension(format!("json.{stamp}")))?;
        }

        self.prune_backups()
    }

    fn prune_backups(&self) -> io::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let Some(stem) = self.path.file_stem().and_then(|s| s.to_str()) else {
            return Ok(());
        };
        let prefix = format!("{stem}.json.");

        let mut backups: Vec<(PathBuf, Option<std::time::SystemTime>)> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .map(|p| {
                let modified = fs::metadata(&p).and_then(|m| m.modified()).ok();
                (p, modified)
            })
            .collect();

        // Newest first; name breaks ties within the same second.
        backups.sort_by(|(pa, ta), (pb, tb)| tb.cmp(ta).then_with(|| pb.cmp(pa)));

        for (old, _) in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old);
        }

        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_backups(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("traces.json."))
            .count()
    }

    #[test]
    fn test_write_line_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line(r#"{"a":1}"#).unwrap();
        writer.write_line(r#"{"b":2}"#).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn test_rotates_when_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.json");
        let writer = FileWriter::with_limit(path.clone(), 8);

        writer.write_line("0123456789").unwrap();
        writer.write_line("next").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        assert_eq!(count_backups(dir.path()), 1);
    }

    #[test]
    fn test_prunes_old_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.json");
        for stamp in 1..=5 {
            fs::write(dir.path().join(format!("traces.json.{stamp}")), "old").unwrap();
        }

        let writer = FileWriter::with_limit(path.clone(), 0);
        writer.write_line("x").unwrap();
        writer.write_line("y").unwrap();

        assert_eq!(count_backups(dir.path()), MAX_BACKUP_FILES);
    }
}
