use super::types::{EncodeCommand, EncoderKind};
use crate::config::{Config, Preset};
use std::path::Path;

/// Build the ffmpeg invocation for one attempt.
///
/// Pure: the same inputs always give the same argument vector. Nothing
/// time- or randomness-dependent goes into the command itself.
pub fn build_encode_cmd(
    config: &Config,
    preset: &Preset,
    frame_listing: &Path,
    output_path: &Path,
    use_gpu: bool,
) -> EncodeCommand {
    let encoder = EncoderKind::from_use_gpu(use_gpu);
    let mut cmd = EncodeCommand::new(&config.ffmpeg_path, encoder);

    // Input: concat demuxer at the preset frame rate
    cmd.args(["-f", "concat", "-safe", "0"]);
    cmd.arg("-r").arg(preset.fps.to_string());
    cmd.arg("-i").arg(frame_listing);
    cmd.arg("-vf")
        .arg(format!("scale={}:{}", preset.width(), preset.height()));

    match encoder {
        EncoderKind::Gpu => apply_nvenc_settings(&mut cmd, config, preset),
        EncoderKind::Cpu => apply_x264_settings(&mut cmd, config, preset),
    }

    // Errors only, plus the stats line so progress stays visible
    cmd.args(["-loglevel", "error", "-stats"]);

    // Output file
    cmd.arg(output_path);

    cmd
}

fn apply_nvenc_settings(cmd: &mut EncodeCommand, config: &Config, preset: &Preset) {
    let enc = &config.encoding;

    cmd.arg("-c:v").arg(EncoderKind::Gpu.codec());
    cmd.arg("-preset").arg(&enc.gpu_preset);

    // VBR with the preset bitrate as target, ceiling and buffer
    cmd.arg("-rc").arg("vbr");
    cmd.arg("-b:v").arg(&preset.bitrate);
    cmd.arg("-maxrate").arg(&preset.bitrate);
    cmd.arg("-bufsize").arg(&preset.bitrate);

    cmd.arg("-g").arg(enc.keyframe_interval.to_string());
    cmd.arg("-bf").arg(enc.b_frames.to_string());
    cmd.arg("-rc-lookahead").arg(enc.rc_lookahead.to_string());
    cmd.arg("-spatial-aq").arg(enc.spatial_aq.to_string());
    cmd.arg("-temporal-aq").arg(enc.temporal_aq.to_string());
    cmd.arg("-pix_fmt").arg(&enc.pixel_format);
}

fn apply_x264_settings(cmd: &mut EncodeCommand, config: &Config, preset: &Preset) {
    let enc = &config.encoding;

    cmd.arg("-c:v").arg(EncoderKind::Cpu.codec());
    cmd.arg("-preset").arg(&enc.cpu_preset);
    cmd.arg("-tune").arg(&enc.tune);
    cmd.arg("-b:v").arg(&preset.bitrate);
    cmd.arg("-g").arg(enc.keyframe_interval.to_string());
    cmd.arg("-bf").arg(enc.b_frames.to_string());
    cmd.arg("-pix_fmt").arg(&enc.pixel_format);
}
