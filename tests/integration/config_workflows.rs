// Loading a real TOML file from disk and converting with it

use frogmpeg::config::{Config, ConfigError};
use frogmpeg::engine::{ConversionRequest, ConvertError, convert_with_runner};
use std::fs;
use tempfile::TempDir;

use crate::common::helpers::cmd_to_string;
use crate::common::scripted_runner::{Outcome, ScriptedRunner};

const PROJECT_TOML: &str = r#"
project_name = "pond"
renders_folder = "renders"
output_folder = "out/mp4"
ffmpeg_path = "ffmpeg"

[defaults]
resolution = "1280x720"
bitrate = "8M"
file_extension = "png"
fps = 25
preset_name = "review"

[encoding]
use_gpu = false
cpu_preset = "medium"

[[presets]]
name = "review"
resolution = "1280x720"
bitrate = "8M"
fps = 25
description = "Dailies"
"#;

#[test]
fn test_relative_paths_resolve_next_to_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frogmpeg.toml");
    fs::write(&path, PROJECT_TOML).unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();

    assert!(config.renders_folder.ends_with("renders"));
    assert!(config.renders_folder.is_absolute());
    assert!(config.output_folder.ends_with("out/mp4"));
    // auto_create_output defaults to on
    assert!(config.output_folder.is_dir());
    assert_eq!(config.ffmpeg_path, std::path::PathBuf::from("ffmpeg"));
    assert_eq!(config.encoding.cpu_preset, "medium");
    assert_eq!(config.encoding.tune, "animation");
}

#[test]
fn test_default_preset_name_is_used_for_conversion() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frogmpeg.toml");
    fs::write(&path, PROJECT_TOML).unwrap();
    let sequence = dir.path().join("renders").join("shot07");
    fs::create_dir_all(&sequence).unwrap();
    for i in 1..=3 {
        fs::write(sequence.join(format!("frame{}.png", i)), b"img").unwrap();
    }

    let config = Config::load(Some(path.as_path())).unwrap();
    let runner = ScriptedRunner::new(&[Outcome::Succeed]);
    let output = convert_with_runner(&config, &ConversionRequest::new("shot07"), &runner).unwrap();

    let cmd = cmd_to_string(&runner.calls()[0].cmd);
    assert!(cmd.contains("-r 25"));
    assert!(cmd.contains("-preset medium"));
    assert!(cmd.contains("scale=1280:720"));
    assert!(output.to_string_lossy().ends_with("_1280x720_25fps.mp4"));
}

#[test]
fn test_unknown_default_preset_fails_before_encoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frogmpeg.toml");
    fs::write(&path, PROJECT_TOML.replace("preset_name = \"review\"", "preset_name = \"gone\""))
        .unwrap();
    let sequence = dir.path().join("renders").join("shot07");
    fs::create_dir_all(&sequence).unwrap();
    fs::write(sequence.join("frame1.png"), b"img").unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    let runner = ScriptedRunner::new(&[]);
    let err = convert_with_runner(&config, &ConversionRequest::new("shot07"), &runner).unwrap_err();

    assert_eq!(
        err.to_string(),
        "default preset 'gone' was not found in the config"
    );
    assert!(matches!(err, ConvertError::PresetNotFound { .. }));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn test_init_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("frogmpeg.toml");

    Config::write_example(&path, false).unwrap();
    let err = Config::write_example(&path, false).unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyExists(_)));
    Config::write_example(&path, true).unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.presets.len(), Config::example().presets.len());
    assert!(config.output_folder.starts_with(dir.path().join("nested")));
}

#[test]
fn test_broken_toml_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frogmpeg.toml");
    fs::write(&path, "project_name = ").unwrap();

    let err = Config::load(Some(path.as_path())).unwrap_err();
    match err {
        ConfigError::Parse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}
