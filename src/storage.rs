// File: ./src/storage.rs
// Writes exported calendars to disk, one directory per employee.
use crate::schedule::ScheduleBlock;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CalendarStore {
    root: PathBuf,
}

impl CalendarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/<slug>/Schedule <first date> to <last date>.ics`
    pub fn path_for(&self, slug: &str, block: &ScheduleBlock) -> PathBuf {
        let fmt = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown".to_string())
        };
        let filename = format!(
            "Schedule {} to {}.ics",
            fmt(block.first_date()),
            fmt(block.last_date())
        );
        self.root.join(slug).join(filename)
    }

    /// Writes one employee calendar for `block`, replacing any previous export.
    pub fn write(&self, slug: &str, block: &ScheduleBlock, ics: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(slug, block);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        }
        Self::with_lock(&path, || Self::atomic_write(&path, ics))?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AppContext, TestContext};
    use chrono::NaiveDate;

    fn block() -> ScheduleBlock {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ScheduleBlock::new((0..7).map(|i| start + chrono::Duration::days(i)).collect())
    }

    #[test]
    fn test_path_for() {
        let store = CalendarStore::new("/tmp/calendars");
        assert_eq!(
            store.path_for("doe-jane", &block()),
            PathBuf::from("/tmp/calendars/doe-jane/Schedule 2024-01-01 to 2024-01-07.ics")
        );
    }

    #[test]
    fn test_write_replaces_previous_export() {
        let ctx = TestContext::new();
        let store = CalendarStore::new(ctx.get_calendars_dir().unwrap());

        let path = store.write("doe-jane", &block(), b"first").unwrap();
        store.write("doe-jane", &block(), b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        let tmp_files: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "{:?}", tmp_files);
    }

    #[test]
    fn test_lock_file_outlives_the_write() {
        let ctx = TestContext::new();
        let store = CalendarStore::new(ctx.get_calendars_dir().unwrap());

        let path = store.write("doe-jane", &block(), b"first").unwrap();
        let lock_path = CalendarStore::get_lock_path(&path);
        assert!(lock_path.exists());

        // A later writer locks the same file, not a fresh one.
        let seen = CalendarStore::with_lock(&path, || Ok(lock_path.exists())).unwrap();
        assert!(seen);
        assert_eq!(
            lock_path.file_name().unwrap(),
            "Schedule 2024-01-01 to 2024-01-07.ics.lock"
        );
    }
}
