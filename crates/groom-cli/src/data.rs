//! Loading the shop configuration and reading/writing the JSON data file.
//!
//! Commands that change the ledger hold [`DataLock`] from before the load until
//! after the save, so two `groom` processes cannot interleave their
//! read-modify-write cycles. Saves go through a temporary file that is renamed
//! over the data file; readers see either the old ledger or the new one.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use groom_engine::{MemoryLedger, ShopConfig};
use tempfile::NamedTempFile;
use tracing::debug;

/// Load the shop configuration, falling back to the built-in one.
pub fn load_config(path: Option<&Path>) -> Result<ShopConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            ShopConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid config: {}", path.display()))
        }
        None => ShopConfig::builtin().context("Built-in configuration is invalid"),
    }
}

/// Exclusive advisory lock on a data file, taken on a `<data>.lock` sidecar.
///
/// Released when dropped (or when the process exits).
pub struct DataLock {
    file: File,
    path: PathBuf,
}

impl Drop for DataLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        debug!(path = %self.path.display(), "data file unlocked");
    }
}

fn lock_path(data: &Path) -> PathBuf {
    let mut name = OsString::from(data.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

/// Block until this process holds the data file's lock.
pub fn lock_data(data: &Path) -> Result<DataLock> {
    let path = lock_path(data);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(&path)
        .with_context(|| format!("Failed to open lock file: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to lock data file: {}", data.display()))?;
    debug!(path = %path.display(), "data file locked");
    Ok(DataLock { file, path })
}

/// Load the ledger. A missing data file is an empty ledger.
pub fn load_ledger(path: &Path) -> Result<MemoryLedger> {
    if !path.exists() {
        debug!(path = %path.display(), "data file not found, starting empty");
        return Ok(MemoryLedger::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    MemoryLedger::from_json(&text)
        .with_context(|| format!("Corrupt data file: {}", path.display()))
}

/// Write the ledger to a temporary file next to `path`, then rename it into
/// place. Callers must hold the [`DataLock`] for `path`.
pub fn save_ledger(path: &Path, ledger: &MemoryLedger, _lock: &DataLock) -> Result<()> {
    let json = ledger.to_json()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("Failed to write data file: {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace data file: {}", path.display()))?;

    debug!(path = %path.display(), "data file saved");
    Ok(())
}
