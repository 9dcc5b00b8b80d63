use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Input to one conversion: which render folder, and optional overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Folder name relative to the configured renders folder
    pub folder_name: String,
    pub preset_name: Option<String>,
    pub extension: Option<String>,
}

impl ConversionRequest {
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            preset_name: None,
            extension: None,
        }
    }

    pub fn with_preset(mut self, preset_name: impl Into<String>) -> Self {
        self.preset_name = Some(preset_name.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// Which encoder an attempt targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderKind {
    /// h264_nvenc
    Gpu,
    /// libx264
    Cpu,
}

impl EncoderKind {
    pub fn from_use_gpu(use_gpu: bool) -> Self {
        if use_gpu { EncoderKind::Gpu } else { EncoderKind::Cpu }
    }

    pub fn is_accelerated(self) -> bool {
        self == EncoderKind::Gpu
    }

    pub fn codec(self) -> &'static str {
        match self {
            EncoderKind::Gpu => "h264_nvenc",
            EncoderKind::Cpu => "libx264",
        }
    }
}

impl fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncoderKind::Gpu => write!(f, "NVENC"),
            EncoderKind::Cpu => write!(f, "CPU"),
        }
    }
}

/// Fully built encoder invocation: program plus argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub encoder: EncoderKind,
}

impl EncodeCommand {
    pub fn new(program: impl Into<PathBuf>, encoder: EncoderKind) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            encoder,
        }
    }

    pub fn arg(&mut self, arg: impl Into<OsString>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn is_accelerated(&self) -> bool {
        self.encoder.is_accelerated()
    }

    /// Last argument is always the output file
    pub fn output_path(&self) -> Option<&Path> {
        self.args.last().map(Path::new)
    }

    /// Arguments as UTF-8 strings, lossily converted
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for EncodeCommand {
    /// Shell-quoted rendering for logs and dry runs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.program.to_string_lossy().into_owned();
        let parts: Vec<String> = std::iter::once(program)
            .chain(self.args_lossy())
            .collect();

        match shlex::try_join(parts.iter().map(String::as_str)) {
            Ok(line) => write!(f, "{}", line),
            Err(_) => write!(f, "{}", parts.join(" ")),
        }
    }
}
