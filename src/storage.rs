// File: ./src/storage.rs
// Locked, atomic writes of export files and the config.
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    /// Sidecar lock file path: `out.ics` -> `out.ics.lock`.
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

    /// Runs `f` while holding an exclusive lock on the sidecar lock file.
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

    /// Writes an export file, creating its parent directory if needed.
    pub fn write_output(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        Self::with_lock(path, || Self::atomic_write(path, contents))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path() {
        assert_eq!(
            LocalStorage::get_lock_path(Path::new("/tmp/out.ics")),
            PathBuf::from("/tmp/out.ics.lock")
        );
        assert_eq!(
            LocalStorage::get_lock_path(Path::new("/tmp/out")),
            PathBuf::from("/tmp/out.lock")
        );
    }
}
