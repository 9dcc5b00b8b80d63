use super::error::{ConvertError, ProcessError};
use super::ffmpeg_cmd::build_encode_cmd;
use super::frame_list::FrameListing;
use super::output::allocate_output_path;
use super::runner::{EncoderRunner, FfmpegRunner};
use super::scan::list_images;
use super::types::{ConversionRequest, EncodeCommand, EncoderKind};
use crate::config::{Config, Preset, PresetLookup};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything resolved before the first encoder run
struct PreparedJob {
    preset: Preset,
    extension: String,
    folder: PathBuf,
    listing: FrameListing,
    output_path: PathBuf,
}

/// Convert one render folder with the real ffmpeg. Returns the written file.
pub fn convert(config: &Config, request: &ConversionRequest) -> Result<PathBuf, ConvertError> {
    convert_with_runner(config, request, FfmpegRunner)
}

/// Convert one render folder using `runner` for the encoder invocations.
///
/// At most two invocations happen: the primary one (NVENC when
/// `encoding.use_gpu` is set) and, only if that NVENC run fails, one libx264
/// retry whose error replaces the first. The frame listing is removed on
/// every exit path.
pub fn convert_with_runner<R: EncoderRunner>(
    config: &Config,
    request: &ConversionRequest,
    runner: R,
) -> Result<PathBuf, ConvertError> {
    let job = prepare(config, request)?;

    let folder_label = job
        .folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| request.folder_name.clone());
    println!(
        "Found {} *.{} files in {}",
        job.listing.frame_count(),
        job.extension,
        folder_label
    );
    println!(
        "Using preset: {} ({} @ {}fps, {})",
        job.preset.name, job.preset.resolution, job.preset.fps, job.preset.bitrate
    );

    let result = ensure_parent_dir(&job.output_path)
        .and_then(|()| encode_with_fallback(config, &job, &runner));

    let PreparedJob {
        listing,
        output_path,
        ..
    } = job;
    listing.close();

    let encoder = result?;
    info!(
        "Conversion finished with {} encoder: {}",
        encoder,
        output_path.display()
    );
    println!("Ribbiting success! Output saved to {}", output_path.display());
    Ok(output_path)
}

/// Resolve a request exactly like [`convert`] and return the primary encoder
/// command without running it. The frame listing it references is removed
/// before returning.
pub fn preview_command(
    config: &Config,
    request: &ConversionRequest,
) -> Result<EncodeCommand, ConvertError> {
    let job = prepare(config, request)?;
    let cmd = build_encode_cmd(
        config,
        &job.preset,
        job.listing.path(),
        &job.output_path,
        config.encoding.use_gpu,
    );
    job.listing.close();
    Ok(cmd)
}

fn prepare(config: &Config, request: &ConversionRequest) -> Result<PreparedJob, ConvertError> {
    let preset = match config.resolve_preset(request.preset_name.as_deref()) {
        PresetLookup::Found(preset) => preset,
        PresetLookup::NotFound { name, origin } => {
            return Err(ConvertError::PresetNotFound { name, origin });
        }
    };
    debug!("Resolved preset '{}'", preset.name);

    let extension = request
        .extension
        .as_deref()
        .unwrap_or(&config.defaults.file_extension)
        .trim()
        .trim_start_matches('.')
        .to_ascii_lowercase();

    let folder = config.renders_folder.join(&request.folder_name);
    if request.folder_name.trim().is_empty() || !folder.is_dir() {
        return Err(ConvertError::FolderNotFound {
            folder: request.folder_name.clone(),
            renders_folder: config.renders_folder.clone(),
        });
    }

    let images = list_images(&folder, &extension)?;
    let listing = FrameListing::create(&images)
        .map_err(|e| e.with_sequence_context(&extension, &folder))?;
    info!(
        "Listed {} *.{} frames from {}",
        listing.frame_count(),
        extension,
        folder.display()
    );

    let output_path = allocate_output_path(config, &request.folder_name, &preset)?;
    debug!("Allocated output path {}", output_path.display());

    Ok(PreparedJob {
        preset,
        extension,
        folder,
        listing,
        output_path,
    })
}

fn ensure_parent_dir(output_path: &Path) -> Result<(), ConvertError> {
    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
                .map_err(|e| ConvertError::io("create output folder", parent, e))
        }
        _ => Ok(()),
    }
}

/// Primary attempt, then the single NVENC -> libx264 fallback
fn encode_with_fallback<R: EncoderRunner>(
    config: &Config,
    job: &PreparedJob,
    runner: &R,
) -> Result<EncoderKind, ConvertError> {
    let primary = EncoderKind::from_use_gpu(config.encoding.use_gpu);

    let primary_err = match run_attempt(config, job, runner, primary) {
        Ok(()) => return Ok(primary),
        Err(e) => e,
    };

    let final_err = match primary {
        EncoderKind::Cpu => primary_err,
        EncoderKind::Gpu => {
            warn!("NVENC encode failed ({}); retrying with libx264", primary_err);
            println!("NVENC failed, retrying with CPU encoding...");
            remove_partial_output(&job.output_path);

            match run_attempt(config, job, runner, EncoderKind::Cpu) {
                Ok(()) => return Ok(EncoderKind::Cpu),
                Err(e) => e,
            }
        }
    };

    remove_partial_output(&job.output_path);
    Err(ConvertError::EncodeFailure(final_err))
}

fn run_attempt<R: EncoderRunner>(
    config: &Config,
    job: &PreparedJob,
    runner: &R,
    encoder: EncoderKind,
) -> Result<(), ProcessError> {
    let cmd = build_encode_cmd(
        config,
        &job.preset,
        job.listing.path(),
        &job.output_path,
        encoder.is_accelerated(),
    );
    info!("Running {} encode: {}", encoder, cmd);
    runner.run(&cmd)
}

/// A failed attempt may leave a truncated file behind; best effort removal
fn remove_partial_output(output_path: &Path) {
    if !output_path.exists() {
        return;
    }
    match fs::remove_file(output_path) {
        Ok(()) => debug!("Removed partial output {}", output_path.display()),
        Err(e) => debug!(
            "Could not remove partial output {}: {}",
            output_path.display(),
            e
        ),
    }
}
