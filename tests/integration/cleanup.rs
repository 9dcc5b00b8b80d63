// The frame listing and partial outputs never outlive a conversion

use frogmpeg::engine::{ConversionRequest, convert_with_runner};
use std::fs;

use crate::common::helpers::{Fixture, input_arg};
use crate::common::scripted_runner::{Outcome, ScriptedRunner};

#[test]
fn test_listing_removed_after_success() {
    let fx = Fixture::new().with_gpu(false);
    fx.add_sequence("shot01", "png", 3);
    let runner = ScriptedRunner::new(&[Outcome::Succeed]);

    convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).unwrap();

    let calls = runner.calls();
    let listing = input_arg(&calls[0].cmd);
    // It existed while ffmpeg ran...
    assert!(calls[0].listing.is_some());
    // ...and is gone afterwards
    assert!(!listing.exists());
}

#[test]
fn test_listing_removed_after_failure() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 3);
    let runner = ScriptedRunner::new(&[Outcome::Fail, Outcome::Fail]);

    assert!(convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).is_err());

    for call in runner.calls() {
        assert!(!input_arg(&call.cmd).exists());
    }
}

#[test]
fn test_listing_lists_frames_in_order() {
    let fx = Fixture::new().with_gpu(false);
    fx.add_sequence("shot01", "png", 12);
    let runner = ScriptedRunner::new(&[Outcome::Succeed]);

    convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).unwrap();

    let listing = runner.calls()[0].listing.clone().expect("listing was readable");
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines[0].starts_with("file '"));
    assert!(lines[0].ends_with("shot01_0001.png'"));
    assert!(lines[11].ends_with("shot01_0012.png'"));
}

#[test]
fn test_partial_output_removed_before_fallback() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 3);
    let runner = ScriptedRunner::new(&[Outcome::FailWithPartialOutput, Outcome::Succeed]);

    let output =
        convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).unwrap();

    let calls = runner.calls();
    assert!(!calls[0].output_existed);
    assert!(!calls[1].output_existed);
    assert_eq!(fs::read(&output).unwrap(), b"mp4");
}

#[test]
fn test_no_output_left_after_terminal_failure() {
    let fx = Fixture::new().with_gpu(true);
    fx.add_sequence("shot01", "png", 3);
    let runner = ScriptedRunner::new(&[
        Outcome::FailWithPartialOutput,
        Outcome::FailWithPartialOutput,
    ]);

    assert!(convert_with_runner(&fx.config, &ConversionRequest::new("shot01"), &runner).is_err());
    assert!(fx.output_files().is_empty());
}
