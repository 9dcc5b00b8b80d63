// NVENC -> libx264 fallback behaviour, driven by a scripted runner

use frogmpeg::engine::{ConversionRequest, ConvertError, EncoderKind, convert_with_runner};

use crate::common::helpers::Fixture;
use crate::common::scripted_runner::{Outcome, ScriptedRunner};

#[test]
fn test_gpu_success_runs_once() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 5);
    let runner = ScriptedRunner::new(&[Outcome::Succeed]);

    let output = convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner)
        .expect("conversion succeeds");

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].cmd.encoder, EncoderKind::Gpu);
    assert!(output.exists());
}

#[test]
fn test_gpu_failure_falls_back_to_cpu() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 5);
    let runner = ScriptedRunner::new(&[Outcome::Fail, Outcome::Succeed]);

    let output = convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner)
        .expect("fallback succeeds");

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].cmd.is_accelerated());
    assert!(!calls[1].cmd.is_accelerated());
    assert!(
        calls[1]
            .cmd
            .args_lossy()
            .iter()
            .any(|a| a == "libx264")
    );

    // Both attempts target the same output path and read the same listing
    assert_eq!(calls[0].cmd.output_path(), calls[1].cmd.output_path());
    assert_eq!(calls[0].listing, calls[1].listing);
    assert_eq!(calls[1].cmd.output_path(), Some(output.as_path()));
}

#[test]
fn test_cpu_failure_is_not_retried() {
    let fx = Fixture::new().with_gpu(false);
    fx.add_sequence("shot01", "png", 5);
    let runner = ScriptedRunner::new(&[Outcome::Fail]);

    let err = convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner)
        .unwrap_err();

    assert!(matches!(err, ConvertError::EncodeFailure(_)));
    assert_eq!(runner.call_count(), 1);
}

#[test]
fn test_double_failure_reports_cpu_error() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 5);
    let runner = ScriptedRunner::new(&[Outcome::Fail, Outcome::Fail]);

    let err = convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner)
        .unwrap_err();

    assert_eq!(runner.call_count(), 2);
    let ConvertError::EncodeFailure(process_err) = &err else {
        panic!("expected EncodeFailure, got {err:?}");
    };
    let source = std::error::Error::source(process_err).expect("spawn error has a source");
    assert!(
        source.to_string().contains("CPU"),
        "fallback error should replace the NVENC one, got: {source}"
    );
    assert_eq!(err.to_string(), "ffmpeg conversion failed");
}

#[test]
fn test_never_more_than_two_invocations() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 5);
    let runner = ScriptedRunner::new(&[Outcome::Fail, Outcome::Fail, Outcome::Fail]);

    let _ = convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner);
    assert_eq!(runner.call_count(), 2);
}

#[test]
fn test_validation_errors_never_invoke_encoder() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 5);
    let runner = ScriptedRunner::new(&[]);

    let missing_folder =
        convert_with_runner(&fx.config, &ConversionRequest::new("nope"), &runner).unwrap_err();
    assert!(matches!(missing_folder, ConvertError::FolderNotFound { .. }));

    let missing_preset = convert_with_runner(
        &fx.config,
        &ConversionRequest::new("shot01").with_preset("missing"),
        &runner,
    )
    .unwrap_err();
    assert!(matches!(missing_preset, ConvertError::PresetNotFound { .. }));

    let wrong_extension = convert_with_runner(
        &fx.config,
        &ConversionRequest::new("shot01").with_extension("jpg"),
        &runner,
    )
    .unwrap_err();
    assert!(matches!(wrong_extension, ConvertError::EmptySequence { .. }));

    assert_eq!(runner.call_count(), 0);
}
