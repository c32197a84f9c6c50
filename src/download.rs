// Download: save the current result under the fixed file name.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::styled::{ResultImage, DOWNLOAD_FILE_NAME};

/// Write `image` into `dir` as `styled-image.png`, replacing an earlier
/// download. Returns the written path.
pub fn save(dir: &Path, image: &ResultImage) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create download directory {}", dir.display()))?;
    let path = dir.join(DOWNLOAD_FILE_NAME);
    std::fs::write(&path, image.bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("saved result to {}", path.display());
    Ok(path)
}
