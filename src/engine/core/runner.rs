use super::error::ProcessError;
use super::types::EncodeCommand;
use std::process::Stdio;
use tracing::{debug, warn};

/// Executes encoder invocations. The pipeline only talks to this trait, so
/// tests can script failures without a real ffmpeg.
pub trait EncoderRunner {
    fn run(&self, cmd: &EncodeCommand) -> Result<(), ProcessError>;
}

impl<R: EncoderRunner + ?Sized> EncoderRunner for &R {
    fn run(&self, cmd: &EncodeCommand) -> Result<(), ProcessError> {
        (**self).run(cmd)
    }
}

/// Runs ffmpeg as a blocking child process with inherited stdio, so the
/// encoder's own `-stats` output reaches the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegRunner;

impl EncoderRunner for FfmpegRunner {
    fn run(&self, cmd: &EncodeCommand) -> Result<(), ProcessError> {
        debug!("Spawning: {}", cmd);

        let status = cmd
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ProcessError::Spawn {
                program: cmd.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            warn!("{} exited with {}", cmd.program.display(), status);
            Err(ProcessError::Exit {
                program: cmd.program.clone(),
                status,
            })
        }
    }
}
