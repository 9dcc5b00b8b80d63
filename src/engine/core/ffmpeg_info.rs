use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Run `<ffmpeg> -version` and return the first line
pub fn ffmpeg_version(program: &Path) -> Result<String> {
    let output = Command::new(program)
        .arg("-version")
        .output()
        .with_context(|| {
            format!(
                "Failed to execute {}. Is ffmpeg installed and is ffmpeg_path correct?",
                program.display()
            )
        })?;

    if !output.status.success() {
        anyhow::bail!(
            "{} -version failed with status: {}",
            program.display(),
            output.status
        );
    }

    let version_output = String::from_utf8_lossy(&output.stdout);
    Ok(parse_version_line(&version_output))
}

/// First line of `-version` output
pub fn parse_version_line(output: &str) -> String {
    output
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or("Unknown version")
        .to_string()
}

/// Check whether ffmpeg lists the named encoder (e.g. `h264_nvenc`).
/// Being listed does not guarantee a usable GPU; the conversion still relies
/// on its CPU fallback.
pub fn encoder_available(program: &Path, encoder: &str) -> bool {
    let output = Command::new(program)
        .arg("-hide_banner")
        .arg("-encoders")
        .output();

    match output {
        Ok(out) if out.status.success() => {
            encoders_list_contains(&String::from_utf8_lossy(&out.stdout), encoder)
        }
        _ => false,
    }
}

/// Lines look like ` V....D h264_nvenc           NVIDIA NVENC H.264 encoder`
pub fn encoders_list_contains(listing: &str, encoder: &str) -> bool {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .any(|name| name == encoder)
}
