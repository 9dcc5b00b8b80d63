use super::error::ConvertError;
use crate::config::{Config, Preset};
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Upper bound on `_N` suffixes tried before giving up
pub const MAX_OUTPUT_PROBES: u32 = 10_000;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// `{folder}_{timestamp}_{resolution}_{fps}fps`
pub fn output_base_name(folder_name: &str, preset: &Preset, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}_{}fps",
        folder_name,
        timestamp.format(TIMESTAMP_FORMAT),
        preset.resolution,
        preset.fps
    )
}

/// Pick a fresh `.mp4` path under the output folder, stamped with the current time
pub fn allocate_output_path(
    config: &Config,
    folder_name: &str,
    preset: &Preset,
) -> Result<PathBuf, ConvertError> {
    allocate_output_path_at(
        &config.output_folder,
        folder_name,
        preset,
        Local::now().naive_local(),
    )
}

/// Same as [`allocate_output_path`] with an explicit timestamp.
/// Existing files are never reused: `_1`, `_2`, ... are appended until a free
/// name turns up, up to [`MAX_OUTPUT_PROBES`].
pub fn allocate_output_path_at(
    output_folder: &Path,
    folder_name: &str,
    preset: &Preset,
    timestamp: NaiveDateTime,
) -> Result<PathBuf, ConvertError> {
    allocate_output_path_bounded(
        output_folder,
        folder_name,
        preset,
        timestamp,
        MAX_OUTPUT_PROBES,
    )
}

pub(crate) fn allocate_output_path_bounded(
    output_folder: &Path,
    folder_name: &str,
    preset: &Preset,
    timestamp: NaiveDateTime,
    limit: u32,
) -> Result<PathBuf, ConvertError> {
    let base = output_base_name(folder_name, preset, timestamp);

    let candidate = output_folder.join(format!("{}.mp4", base));
    if !candidate.exists() {
        return Ok(candidate);
    }

    for counter in 1..=limit {
        let candidate = output_folder.join(format!("{}_{}.mp4", base, counter));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(ConvertError::OutputPathExhausted {
        base: output_folder.join(base),
        attempts: limit,
    })
}
