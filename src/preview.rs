// Preview handles.
//
// A preview is a private temporary copy of the selected image that the
// user can open in a viewer while composing a request. The copy lives as
// long as the handle: replacing the handle in the state drops it, and
// dropping it deletes the file.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::file::SelectedFile;

#[derive(Debug)]
pub struct PreviewHandle {
    file: NamedTempFile,
    dimensions: Option<(u32, u32)>,
}

impl PreviewHandle {
    pub fn create(selected: &SelectedFile) -> Result<Self> {
        let suffix = Path::new(selected.name())
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let mut file = tempfile::Builder::new()
            .prefix("styler-preview-")
            .suffix(&suffix)
            .tempfile()
            .context("Failed to create preview file")?;
        file.write_all(selected.bytes())
            .context("Failed to write preview file")?;
        file.flush().context("Failed to write preview file")?;

        // Unreadable images still get a preview; only the size is unknown.
        let dimensions = image::ImageReader::new(std::io::Cursor::new(selected.bytes()))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());

        log::debug!("preview for {} at {}", selected.name(), file.path().display());
        Ok(PreviewHandle { file, dimensions })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}
