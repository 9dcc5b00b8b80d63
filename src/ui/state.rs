// UI state, kept free of terminal I/O so navigation can be unit tested

use crate::config::{Config, DEFAULTS_PRESET_NAME, Preset};
use crate::engine::{ConversionRequest, IMAGE_EXTENSIONS, RenderFolder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Folders,
    Presets,
    Extensions,
}

impl Section {
    pub fn next(self) -> Self {
        match self {
            Section::Folders => Section::Presets,
            Section::Presets => Section::Extensions,
            Section::Extensions => Section::Folders,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

pub struct UiState {
    pub folders: Vec<RenderFolder>,
    pub selected_folder: Option<usize>,
    /// Configured presets, or the one synthesized from `[defaults]`
    pub presets: Vec<Preset>,
    pub selected_preset: usize,
    pub extensions: Vec<String>,
    pub selected_extension: usize,
    pub section: Section,
    pub status: Option<StatusMessage>,
    pub auto_select_latest: bool,
    /// NVENC probe result; `None` when GPU encoding is disabled
    pub gpu_available: Option<bool>,
}

impl UiState {
    pub fn new(config: &Config) -> Self {
        let presets = if config.presets.is_empty() {
            vec![config.defaults.synthesized_preset()]
        } else {
            config.presets.clone()
        };
        let selected_preset = config
            .defaults
            .preset_name
            .as_deref()
            .and_then(|name| presets.iter().position(|p| p.name == name))
            .unwrap_or(0);

        let extensions: Vec<String> = IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        let default_ext = config.defaults.file_extension.to_ascii_lowercase();
        let selected_extension = extensions
            .iter()
            .position(|e| *e == default_ext)
            .unwrap_or(0);

        Self {
            folders: Vec::new(),
            selected_folder: None,
            presets,
            selected_preset,
            extensions,
            selected_extension,
            section: Section::Folders,
            status: None,
            auto_select_latest: config.ui.auto_select_latest,
            gpu_available: None,
        }
    }

    /// Replace the folder list after a scan, keeping the selection on the
    /// same folder name when it is still present
    pub fn set_folders(&mut self, folders: Vec<RenderFolder>) {
        let previous = self.selected_folder_entry().map(|f| f.name.clone());
        self.folders = folders;

        self.selected_folder = if self.folders.is_empty() {
            None
        } else if let Some(idx) =
            previous.and_then(|name| self.folders.iter().position(|f| f.name == name))
        {
            Some(idx)
        } else if self.auto_select_latest {
            // scan results are newest first
            Some(0)
        } else {
            None
        };
    }

    pub fn selected_folder_entry(&self) -> Option<&RenderFolder> {
        self.selected_folder.and_then(|i| self.folders.get(i))
    }

    pub fn selected_preset_entry(&self) -> Option<&Preset> {
        self.presets.get(self.selected_preset)
    }

    pub fn selected_extension_entry(&self) -> &str {
        self.extensions
            .get(self.selected_extension)
            .map(String::as_str)
            .unwrap_or("png")
    }

    pub fn next_section(&mut self) {
        self.section = self.section.next();
    }

    pub fn move_up(&mut self) {
        match self.section {
            Section::Folders if !self.folders.is_empty() => {
                let idx = self.selected_folder.unwrap_or(0);
                self.selected_folder = Some(idx.saturating_sub(1));
            }
            Section::Folders => {}
            _ => self.cycle(false),
        }
    }

    pub fn move_down(&mut self) {
        match self.section {
            Section::Folders if !self.folders.is_empty() => {
                let last = self.folders.len() - 1;
                self.selected_folder = Some(match self.selected_folder {
                    Some(idx) => (idx + 1).min(last),
                    None => 0,
                });
            }
            Section::Folders => {}
            _ => self.cycle(true),
        }
    }

    /// Step the preset or extension choice of the focused section, wrapping
    pub fn cycle(&mut self, forward: bool) {
        let (index, len) = match self.section {
            Section::Folders => return,
            Section::Presets => (&mut self.selected_preset, self.presets.len()),
            Section::Extensions => (&mut self.selected_extension, self.extensions.len()),
        };
        if len == 0 {
            return;
        }
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    /// Build the request for the current selection. The synthesized
    /// defaults preset is sent as "no preset" so the engine resolves it.
    pub fn conversion_request(&self) -> Option<ConversionRequest> {
        let folder = self.selected_folder_entry()?;
        let mut request = ConversionRequest::new(folder.name.clone())
            .with_extension(self.selected_extension_entry());
        if let Some(preset) = self.selected_preset_entry() {
            if preset.name != DEFAULTS_PRESET_NAME {
                request = request.with_preset(preset.name.clone());
            }
        }
        Some(request)
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }
}

/// Estimated playback length of `frames` at `fps`, as `m:ss`
pub fn format_duration(frames: usize, fps: u32) -> String {
    if fps == 0 {
        return "0:00".to_string();
    }
    let seconds = frames as u64 / u64::from(fps);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
