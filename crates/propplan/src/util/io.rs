//! I/O utility functions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path used while writing `path`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// The content is first written to `<name>.tmp` next to the target, then
/// renamed over it, so an interrupted save never leaves a truncated scenario.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("plan.yaml"), &yaml)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp = temp_path(path);
    fs::write(&temp, content)?;
    fs::rename(&temp, path)?;
    Ok(())
}
