use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frogmpeg", version)]
#[command(about = "Convert image sequences to MP4 with NVENC and CPU fallback", long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./frogmpeg.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug); FROGMPEG_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Folder name inside renders_folder
    #[arg(value_name = "FOLDER")]
    pub folder: String,

    /// Preset name from the config
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Override the image extension (jpeg/jpg/png)
    #[arg(short, long)]
    pub extension: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an image sequence folder to MP4
    Convert(ConvertArgs),

    /// Show the ffmpeg command for a folder without running it
    DryRun(ConvertArgs),

    /// List available presets
    ListPresets,

    /// Write an example frogmpeg.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration and environment
    Validate,

    /// Launch the interactive terminal UI
    Gui,
}

pub fn parse() -> Cli {
    Cli::parse()
}
