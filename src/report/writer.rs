//! Output persistence

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::document::ReportDocument;
use crate::error::EdaError;

/// Create the image directory if it does not exist yet
pub fn ensure_image_dir(dir: &Path) -> Result<(), EdaError> {
    fs::create_dir_all(dir).map_err(|e| EdaError::io(dir, e))
}

/// Write the rendered document as UTF-8, replacing any previous report.
/// The file handle is flushed and closed before returning.
pub fn write_report(path: &Path, doc: &ReportDocument) -> Result<(), EdaError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EdaError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| EdaError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(doc.render().as_bytes())
        .map_err(|e| EdaError::io(path, e))?;
    writer.flush().map_err(|e| EdaError::io(path, e))?;
    Ok(())
}
