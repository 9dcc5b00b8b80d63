use crate::config::PresetOrigin;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Failure of a single encoder invocation
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn {}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited with {status}", .program.display())]
    Exit { program: PathBuf, status: ExitStatus },
}

/// Terminal failure of one conversion call
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{origin} preset '{name}' was not found in the config")]
    PresetNotFound { name: String, origin: PresetOrigin },

    #[error("folder '{folder}' not found inside renders folder {}", .renders_folder.display())]
    FolderNotFound {
        folder: String,
        renders_folder: PathBuf,
    },

    #[error("no image files found{}", describe_sequence(.extension.as_deref(), .folder.as_deref()))]
    EmptySequence {
        extension: Option<String>,
        folder: Option<PathBuf>,
    },

    #[error("ffmpeg conversion failed")]
    EncodeFailure(#[from] ProcessError),

    #[error("no free output path for {} after {attempts} attempts", .base.display())]
    OutputPathExhausted { base: PathBuf, attempts: u32 },

    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_sequence(extension: Option<&str>, folder: Option<&Path>) -> String {
    match (extension, folder) {
        (Some(ext), Some(folder)) => format!(" matching *.{} in {}", ext, folder.display()),
        (Some(ext), None) => format!(" matching *.{}", ext),
        (None, Some(folder)) => format!(" in {}", folder.display()),
        (None, None) => String::new(),
    }
}

impl ConvertError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Attach the folder and extension to a bare `EmptySequence`
    pub(crate) fn with_sequence_context(self, extension: &str, folder: &Path) -> Self {
        match self {
            ConvertError::EmptySequence { .. } => ConvertError::EmptySequence {
                extension: Some(extension.to_string()),
                folder: Some(folder.to_path_buf()),
            },
            other => other,
        }
    }
}
