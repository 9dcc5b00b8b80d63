use super::error::ConvertError;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::debug;

/// Concat-demuxer manifest listing the ordered frames of one conversion.
///
/// The file lives in the system temp dir under a unique name and is removed
/// when the listing is closed or dropped. Removal errors are ignored.
#[derive(Debug)]
pub struct FrameListing {
    path: TempPath,
    frame_count: usize,
}

impl FrameListing {
    /// Write the manifest for `images`. An empty sequence is rejected before
    /// anything touches the filesystem.
    pub fn create(images: &[PathBuf]) -> Result<Self, ConvertError> {
        if images.is_empty() {
            return Err(ConvertError::EmptySequence {
                extension: None,
                folder: None,
            });
        }

        let file = tempfile::Builder::new()
            .prefix("frogmpeg-frames-")
            .suffix(".txt")
            .tempfile()
            .map_err(|e| ConvertError::io("create frame listing in", std::env::temp_dir(), e))?;

        let listing_path = file.path().to_path_buf();
        let write_err = |e| ConvertError::io("write frame listing", &listing_path, e);

        let mut writer = BufWriter::new(file);
        for image in images {
            writeln!(writer, "{}", concat_entry(image)).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        let file = writer
            .into_inner()
            .map_err(|e| write_err(e.into_error()))?;

        debug!(
            "Wrote frame listing {} ({} frames)",
            listing_path.display(),
            images.len()
        );

        Ok(Self {
            path: file.into_temp_path(),
            frame_count: images.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Delete the manifest now instead of at drop
    pub fn close(self) {
        let path = self.path.to_path_buf();
        if let Err(e) = self.path.close() {
            debug!("Could not remove frame listing {}: {}", path.display(), e);
        }
    }
}

/// One manifest line: `file '<absolute path with forward slashes>'`
pub fn concat_entry(image: &Path) -> String {
    let absolute = std::path::absolute(image).unwrap_or_else(|_| image.to_path_buf());
    let normalized = absolute.to_string_lossy().replace('\\', "/");
    // concat demuxer quoting: close the quote, escape, reopen
    format!("file '{}'", normalized.replace('\'', r"'\''"))
}
