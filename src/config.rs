// Project configuration: paths, defaults, named presets, encoder tuning

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory before the user config dir
pub const CONFIG_FILE_NAME: &str = "frogmpeg.toml";

/// Name given to the preset synthesized from `[defaults]`
pub const DEFAULTS_PRESET_NAME: &str = "defaults";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0} (run `frogmpeg init` to create one)")]
    NotFound(PathBuf),

    #[error("could not determine the user config directory")]
    ConfigDir,

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write config file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),

    #[error("config file {0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("failed to create output folder {path}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preset '{name}' is invalid: {reason}")]
    InvalidPreset { name: String, reason: String },

    #[error("preset '{0}' is defined more than once")]
    DuplicatePreset(String),

    #[error("[defaults] section is invalid: {0}")]
    InvalidDefaults(String),
}

/// Frame size in pixels, written as `WxH` in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl TryFrom<String> for Resolution {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('x').collect();
        let [w, h] = parts[..] else {
            return Err(format!("resolution '{}' must look like WIDTHxHEIGHT", s));
        };

        let parse = |part: &str| -> Result<u32, String> {
            match part.trim().parse::<u32>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(format!(
                    "resolution '{}' must contain two positive integers",
                    s
                )),
            }
        };

        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

impl From<Resolution> for String {
    fn from(value: Resolution) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Named bundle of resolution, bitrate and frame rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub resolution: Resolution,
    /// Passed through to ffmpeg verbatim, e.g. "20M"
    pub bitrate: String,
    pub fps: u32,
    #[serde(default)]
    pub description: String,
}

impl Preset {
    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidPreset {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.fps == 0 {
            return Err(invalid("fps must be greater than zero"));
        }
        if self.bitrate.trim().is_empty() {
            return Err(invalid("bitrate must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    pub resolution: Resolution,
    pub bitrate: String,
    /// Image extension used when a request does not name one (png, jpg, ...)
    pub file_extension: String,
    pub fps: u32,

    /// Preset applied when a request does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_name: Option<String>,
}

impl Defaults {
    /// Preset built on the fly when neither the request nor the config names one
    pub fn synthesized_preset(&self) -> Preset {
        Preset {
            name: DEFAULTS_PRESET_NAME.to_string(),
            resolution: self.resolution,
            bitrate: self.bitrate.clone(),
            fps: self.fps,
            description: "Default configuration".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingSettings {
    /// Try h264_nvenc first; libx264 is used as the fallback either way
    #[serde(default = "default_true")]
    pub use_gpu: bool,

    #[serde(default = "default_gpu_preset")]
    pub gpu_preset: String,

    #[serde(default = "default_cpu_preset")]
    pub cpu_preset: String,

    #[serde(default = "default_tune")]
    pub tune: String,

    #[serde(default = "default_pixel_format")]
    pub pixel_format: String,

    /// GOP size in frames
    #[serde(default = "default_keyframe_interval")]
    pub keyframe_interval: u32,

    #[serde(default = "default_b_frames")]
    pub b_frames: u32,

    // NVENC only
    #[serde(default = "default_rc_lookahead")]
    pub rc_lookahead: u32,

    #[serde(default = "default_aq")]
    pub spatial_aq: u32,

    #[serde(default = "default_aq")]
    pub temporal_aq: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_true")]
    pub show_file_count: bool,

    #[serde(default = "default_true")]
    pub auto_select_latest: bool,
}

fn default_true() -> bool {
    true
}

fn default_gpu_preset() -> String {
    "p7".to_string()
}

fn default_cpu_preset() -> String {
    "veryslow".to_string()
}

fn default_tune() -> String {
    "animation".to_string()
}

fn default_pixel_format() -> String {
    "yuv420p".to_string()
}

fn default_keyframe_interval() -> u32 {
    60
}

fn default_b_frames() -> u32 {
    3
}

fn default_rc_lookahead() -> u32 {
    32
}

fn default_aq() -> u32 {
    1
}

fn default_theme() -> String {
    "frog_splash".to_string()
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            use_gpu: true,
            gpu_preset: default_gpu_preset(),
            cpu_preset: default_cpu_preset(),
            tune: default_tune(),
            pixel_format: default_pixel_format(),
            keyframe_interval: default_keyframe_interval(),
            b_frames: default_b_frames(),
            rc_lookahead: default_rc_lookahead(),
            spatial_aq: default_aq(),
            temporal_aq: default_aq(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_file_count: true,
            auto_select_latest: true,
        }
    }
}

/// Validated project configuration. Loaded once and never mutated afterwards.
///
/// Field order matters for serialization: plain values first, then tables,
/// then the `[[presets]]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub renders_folder: PathBuf,
    pub output_folder: PathBuf,
    /// Encoder executable; a bare name such as `ffmpeg` is looked up on PATH
    pub ffmpeg_path: PathBuf,

    #[serde(default = "default_true")]
    pub auto_create_output: bool,

    pub defaults: Defaults,

    #[serde(default)]
    pub encoding: EncodingSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub presets: Vec<Preset>,
}

/// Where a preset name came from when it could not be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetOrigin {
    Requested,
    Default,
}

impl fmt::Display for PresetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetOrigin::Requested => write!(f, "requested"),
            PresetOrigin::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetLookup {
    Found(Preset),
    NotFound { name: String, origin: PresetOrigin },
}

impl Config {
    /// Resolve which file to load.
    /// Priority: explicit path > ./frogmpeg.toml > <config dir>/frogmpeg/config.toml
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Ok(local);
        }

        Self::user_config_path()
    }

    /// Per-user config location, used when the working directory has no config
    pub fn user_config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::ConfigDir)?;
        Ok(dir.join("frogmpeg").join("config.toml"))
    }

    /// Locate, read, and validate the configuration
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = Self::locate(explicit)?;
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = std::path::absolute(path)
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_toml_str(&contents, &base_dir).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate TOML; relative paths are resolved against `base_dir`
    pub fn from_toml_str(contents: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Config =
            toml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;

        config.renders_folder = resolve_path(base_dir, &config.renders_folder);
        config.output_folder = resolve_path(base_dir, &config.output_folder);
        if !is_bare_program(&config.ffmpeg_path) {
            config.ffmpeg_path = resolve_path(base_dir, &config.ffmpeg_path);
        }

        config.validate()?;

        if config.auto_create_output && !config.output_folder.exists() {
            fs::create_dir_all(&config.output_folder).map_err(|source| {
                ConfigError::CreateOutput {
                    path: config.output_folder.clone(),
                    source,
                }
            })?;
        }

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.fps == 0 {
            return Err(ConfigError::InvalidDefaults(
                "fps must be greater than zero".to_string(),
            ));
        }
        if self.defaults.bitrate.trim().is_empty() {
            return Err(ConfigError::InvalidDefaults(
                "bitrate must not be empty".to_string(),
            ));
        }
        if self.defaults.file_extension.trim().is_empty() {
            return Err(ConfigError::InvalidDefaults(
                "file_extension must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for preset in &self.presets {
            preset.validate()?;
            if !seen.insert(preset.name.as_str()) {
                return Err(ConfigError::DuplicatePreset(preset.name.clone()));
            }
        }
        Ok(())
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Resolve the preset for a conversion.
    /// Priority: requested name > defaults.preset_name > preset synthesized from [defaults]
    pub fn resolve_preset(&self, requested: Option<&str>) -> PresetLookup {
        let requested = requested.filter(|name| !name.is_empty());
        let configured = self
            .defaults
            .preset_name
            .as_deref()
            .filter(|name| !name.is_empty());

        let (name, origin) = match (requested, configured) {
            (Some(name), _) => (name, PresetOrigin::Requested),
            (None, Some(name)) => (name, PresetOrigin::Default),
            (None, None) => return PresetLookup::Found(self.defaults.synthesized_preset()),
        };

        match self.preset(name) {
            Some(preset) => PresetLookup::Found(preset.clone()),
            None => PresetLookup::NotFound {
                name: name.to_string(),
                origin,
            },
        }
    }

    /// Starter configuration written by `frogmpeg init`
    pub fn example() -> Self {
        let preset = |name: &str, resolution: (u32, u32), bitrate: &str, fps: u32, description: &str| {
            Preset {
                name: name.to_string(),
                resolution: Resolution::new(resolution.0, resolution.1),
                bitrate: bitrate.to_string(),
                fps,
                description: description.to_string(),
            }
        };

        Self {
            project_name: "frogmpeg-project".to_string(),
            renders_folder: PathBuf::from("renders"),
            output_folder: PathBuf::from("output"),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            auto_create_output: true,
            defaults: Defaults {
                resolution: Resolution::new(1920, 1080),
                bitrate: "20M".to_string(),
                file_extension: "png".to_string(),
                fps: 24,
                preset_name: None,
            },
            encoding: EncodingSettings::default(),
            ui: UiSettings::default(),
            presets: vec![
                preset("1080p24", (1920, 1080), "20M", 24, "Full HD at film rate"),
                preset("1080p60", (1920, 1080), "40M", 60, "Full HD for smooth motion"),
                preset("4k30", (3840, 2160), "60M", 30, "UHD master"),
                preset("preview", (1280, 720), "8M", 24, "Quick review render"),
            ],
        }
    }

    /// Write the example config to `path`. Refuses to overwrite unless `force`.
    pub fn write_example(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(&Self::example())?;
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A single path component such as `ffmpeg` names a program on PATH
fn is_bare_program(path: &Path) -> bool {
    path.is_relative() && path.components().count() == 1
}

fn resolve_path(base_dir: &Path, value: &Path) -> PathBuf {
    let expanded = match value.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => value.to_path_buf(),
        },
        Err(_) => value.to_path_buf(),
    };

    if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    }
}
