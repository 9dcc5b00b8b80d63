/// Encoder command assertion utilities
#[allow(dead_code)]
pub fn assert_cmd_contains(cmd: &str, flag: &str) {
    assert!(
        cmd.contains(flag),
        "Expected ffmpeg command to contain '{}' but it didn't.\nCommand: {}",
        flag,
        cmd
    );
}

#[allow(dead_code)]
pub fn assert_cmd_not_contains(cmd: &str, flag: &str) {
    assert!(
        !cmd.contains(flag),
        "Expected ffmpeg command to NOT contain '{}' but it did.\nCommand: {}",
        flag,
        cmd
    );
}

/// Check that `flag` is immediately followed by `value`
#[allow(dead_code)]
pub fn assert_cmd_has_flag_value(cmd: &str, flag: &str, value: &str) {
    let pattern = format!("{} {}", flag, value);
    assert!(
        cmd.contains(&pattern),
        "Expected ffmpeg command to contain '{} {}' but it didn't.\nCommand: {}",
        flag,
        value,
        cmd
    );
}
