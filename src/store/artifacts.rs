//! Atomic JSON artifact I/O.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Load any JSON artifact. Callers wrap the error with a regeneration hint
/// when the file is expected to exist.
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize to a sibling temp file, then rename over the target. Rename
/// is atomic on the same filesystem, so readers either see the old
/// artifact or the new one, never a torn write.
pub fn save_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    let content = serde_json::to_string_pretty(value)?;
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    info!("wrote {}", path.display());
    Ok(())
}
