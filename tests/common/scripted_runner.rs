#![allow(dead_code)]

use frogmpeg::engine::{EncodeCommand, EncoderRunner, ProcessError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::PathBuf;

/// What a scripted invocation does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Write a small output file and succeed
    Succeed,
    /// Fail without touching the output path
    Fail,
    /// Leave a truncated output file behind, then fail
    FailWithPartialOutput,
}

/// One recorded invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    pub cmd: EncodeCommand,
    /// Frame listing contents at the time of the call
    pub listing: Option<String>,
    /// Whether the output path already existed when the call started
    pub output_existed: bool,
}

/// Stands in for ffmpeg: plays back programmed outcomes in order and records
/// every command it was handed. Runs past the script succeed.
#[derive(Default)]
pub struct ScriptedRunner {
    outcomes: RefCell<VecDeque<Outcome>>,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new(outcomes: &[Outcome]) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.iter().copied().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl EncoderRunner for ScriptedRunner {
    fn run(&self, cmd: &EncodeCommand) -> Result<(), ProcessError> {
        let listing_path = input_path(cmd);
        let listing = listing_path.and_then(|p| fs::read_to_string(p).ok());
        let output = cmd.output_path().map(PathBuf::from);
        self.calls.borrow_mut().push(Invocation {
            cmd: cmd.clone(),
            listing,
            output_existed: output.as_ref().is_some_and(|p| p.exists()),
        });

        let outcome = self
            .outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(Outcome::Succeed);

        match outcome {
            Outcome::Succeed => {
                if let Some(output) = output {
                    fs::write(output, b"mp4").expect("write scripted output");
                }
                Ok(())
            }
            Outcome::Fail => Err(scripted_failure(cmd)),
            Outcome::FailWithPartialOutput => {
                if let Some(output) = output {
                    fs::write(output, b"trunc").expect("write partial output");
                }
                Err(scripted_failure(cmd))
            }
        }
    }
}

fn input_path(cmd: &EncodeCommand) -> Option<PathBuf> {
    let args = cmd.args_lossy();
    let idx = args.iter().position(|a| a == "-i")?;
    args.get(idx + 1).map(PathBuf::from)
}

fn scripted_failure(cmd: &EncodeCommand) -> ProcessError {
    ProcessError::Spawn {
        program: cmd.program.clone(),
        source: io::Error::other(format!("scripted {} failure", cmd.encoder)),
    }
}
