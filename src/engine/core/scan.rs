use super::error::ConvertError;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Image extensions offered by the interactive front-end
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png"];

/// Every run of ASCII digits in the file name, left to right.
/// Names without digits get `[0]` so they sort first.
///
/// A `-` before a number is a separator, not a sign: `shot-002.png` keys as
/// `[2]`, so `shot-001`, `shot-002`, ... stay in frame order.
pub fn sequence_key(file_name: &str) -> Vec<u64> {
    let mut numbers = Vec::new();
    let mut current: Option<u64> = None;

    for ch in file_name.chars() {
        match ch.to_digit(10) {
            Some(digit) => {
                let value = current.unwrap_or(0);
                current = Some(value.saturating_mul(10).saturating_add(u64::from(digit)));
            }
            None => {
                if let Some(value) = current.take() {
                    numbers.push(value);
                }
            }
        }
    }
    if let Some(value) = current {
        numbers.push(value);
    }

    if numbers.is_empty() {
        numbers.push(0);
    }
    numbers
}

/// Order two file names by their embedded numbers, then by the name itself
pub fn compare_sequence_names(a: &str, b: &str) -> Ordering {
    sequence_key(a)
        .cmp(&sequence_key(b))
        .then_with(|| a.cmp(b))
}

/// Check if a path ends in `.<extension>`, ignoring ASCII case
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// List the images directly inside `folder` with the given extension,
/// ordered by the numbers embedded in their names.
///
/// The directory is read once without locking; files added or removed while
/// the listing runs may or may not be included.
pub fn list_images(folder: &Path, extension: &str) -> Result<Vec<PathBuf>, ConvertError> {
    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| ConvertError::io("list", folder, e.into()))?;
        let path = entry.path();
        if path.is_file() && has_extension(path, extension) {
            images.push(path.to_path_buf());
        }
    }

    images.sort_by_cached_key(|path| {
        let name = file_name_lossy(path);
        (sequence_key(&name), name)
    });

    Ok(images)
}

/// A sub-folder of the renders folder that holds at least one image
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFolder {
    pub name: String,
    pub path: PathBuf,
    /// Images across all of the scanned extensions
    pub file_count: usize,
    pub modified: SystemTime,
}

/// Find render folders containing images, newest first
pub fn scan_render_folders(
    renders_folder: &Path,
    extensions: &[&str],
) -> Result<Vec<RenderFolder>, ConvertError> {
    let mut folders = Vec::new();

    for entry in WalkDir::new(renders_folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| ConvertError::io("scan", renders_folder, e.into()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let mut file_count = 0;
        for extension in extensions {
            file_count += list_images(path, extension)?.len();
        }
        if file_count == 0 {
            continue;
        }

        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        folders.push(RenderFolder {
            name: file_name_lossy(path),
            path: path.to_path_buf(),
            file_count,
            modified,
        });
    }

    folders.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    Ok(folders)
}
