// Whole pipeline with a fake encoder: request in, named output file out

use chrono::NaiveDateTime;
use frogmpeg::config::Config;
use frogmpeg::engine::{ConversionRequest, convert_with_runner, preview_command};

use crate::common::assertions::{assert_cmd_has_flag_value, assert_cmd_not_contains};
use crate::common::helpers::{Fixture, cmd_to_string};
use crate::common::scripted_runner::{Outcome, ScriptedRunner};

#[test]
fn test_cpu_conversion_builds_expected_command_and_name() {
    let fx = Fixture::new().with_gpu(false);
    fx.add_sequence("shot01", "png", 100);
    let runner = ScriptedRunner::new(&[Outcome::Succeed]);

    let output =
        convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let cmd = cmd_to_string(&calls[0].cmd);
    assert_cmd_has_flag_value(&cmd, "-r", "24");
    assert_cmd_has_flag_value(&cmd, "-vf", "scale=1920:1080");
    assert_cmd_has_flag_value(&cmd, "-c:v", "libx264");
    assert_cmd_has_flag_value(&cmd, "-b:v", "20M");
    assert_cmd_not_contains(&cmd, "h264_nvenc");
    assert_eq!(calls[0].listing.as_deref().map(|l| l.lines().count()), Some(100));

    assert_eq!(output.parent(), Some(fx.output_folder()));
    let name = output.file_name().unwrap().to_string_lossy().into_owned();
    let stamp = name
        .strip_prefix("shot01_")
        .and_then(|rest| rest.strip_suffix("_1920x1080_24fps.mp4"))
        .unwrap_or_else(|| panic!("unexpected output name {name}"));
    assert!(
        NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d_%H-%M-%S").is_ok(),
        "bad timestamp in {name}"
    );
    assert!(output.exists());
}

#[test]
fn test_named_preset_drives_command() {
    let mut fx = Fixture::new().with_gpu(true);
    fx.config.presets = Config::example().presets;
    fx.add_sequence("shot02", "jpg", 4);
    let runner = ScriptedRunner::new(&[Outcome::Succeed]);

    let request = ConversionRequest::new("shot02")
        .with_preset("4k30")
        .with_extension("JPG");
    let output = convert_with_runner(&fx.config, &request, &runner).unwrap();

    let cmd = cmd_to_string(&runner.calls()[0].cmd);
    assert_cmd_has_flag_value(&cmd, "-c:v", "h264_nvenc");
    assert_cmd_has_flag_value(&cmd, "-r", "30");
    assert_cmd_has_flag_value(&cmd, "-vf", "scale=3840:2160");
    assert_cmd_has_flag_value(&cmd, "-maxrate", "60M");
    assert!(
        output
            .to_string_lossy()
            .ends_with("_3840x2160_30fps.mp4")
    );
}

#[test]
fn test_repeated_conversions_never_overwrite() {
    let fx = Fixture::new().with_gpu(false);
    fx.add_sequence("shot01", "png", 2);
    let runner = ScriptedRunner::new(&[]);

    let first =
        convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).unwrap();
    let second =
        convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).unwrap();

    assert_ne!(first, second);
    assert_eq!(fx.output_files().len(), 2);
}

#[test]
fn test_preview_matches_first_attempt() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 3);

    let preview = preview_command(&fx.config, &ConversionRequest::new("shot01")).unwrap();
    assert!(preview.is_accelerated());
    // The listing it referenced is already gone and nothing was written
    let cmd = cmd_to_string(&preview);
    assert_cmd_has_flag_value(&cmd, "-c:v", "h264_nvenc");
    assert!(fx.output_files().is_empty());
}

#[test]
fn test_output_folder_recreated_if_missing() {
    let fx = Fixture::new().with_gpu(false);
    fx.add_sequence("shot01", "png", 2);
    std::fs::remove_dir_all(fx.output_folder()).unwrap();
    let runner = ScriptedRunner::new(&[]);

    let output =
        convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).unwrap();
    assert!(output.exists());
}
