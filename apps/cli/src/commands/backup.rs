//! `export`, `import` and `clear`: whole-store snapshot operations.

use anyhow::{Context, Result};
use drill_core::{ProgressStore, StorageMedium};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Target or source meaning stdout/stdin.
const STDIO: &str = "-";

/// Write the full progress snapshot to `path`, or stdout for `-`.
pub fn export_progress<M: StorageMedium>(store: &ProgressStore<M>, path: &Path) -> Result<()> {
    let data = store.export_snapshot().context("failed to serialize progress")?;
    if path.as_os_str() == STDIO {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{data}")?;
        return Ok(());
    }
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported progress");
    Ok(())
}

/// Replace all progress with the snapshot in `path`, or stdin for `-`.
pub fn import_progress<M: StorageMedium>(store: &mut ProgressStore<M>, path: &Path) -> Result<()> {
    let data = if path.as_os_str() == STDIO {
        let mut data = String::new();
        io::stdin().read_to_string(&mut data)?;
        data
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    store
        .import_snapshot(&data)
        .with_context(|| format!("failed to import {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        keys = store.snapshot().lessons.len(),
        "imported progress"
    );
    Ok(())
}

/// Erase all stored progress.
pub fn clear_progress<M: StorageMedium>(store: &mut ProgressStore<M>) -> Result<()> {
    store.clear().context("failed to clear progress")?;
    tracing::info!("cleared progress");
    Ok(())
}
