use crate::cli::{Cli, Commands, ConvertArgs};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use frogmpeg::config::{CONFIG_FILE_NAME, Config, ConfigError};
use frogmpeg::engine::{self, ConversionRequest, EncoderKind};
use frogmpeg::{logging, ui};
use std::path::{Path, PathBuf};
use std::process;

pub fn run(cli: Cli) {
    logging::init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Convert(args) => handle_convert(config_path, args),
        Commands::DryRun(args) => handle_dry_run(config_path, args),
        Commands::ListPresets => handle_list_presets(config_path),
        Commands::Init { force } => handle_init(config_path, force),
        Commands::Validate => handle_validate(config_path),
        Commands::Gui => handle_gui(config_path),
    };

    if let Err(err) = result {
        report_error(&err);
        process::exit(1);
    }
}

/// Config problems and conversion problems are reported differently
fn report_error(err: &anyhow::Error) {
    let prefix = if err.downcast_ref::<ConfigError>().is_some() {
        "Config error"
    } else {
        "Error"
    };
    eprintln!("{}", format!("{}: {:#}", prefix, err).red());
}

fn request_from(args: ConvertArgs) -> ConversionRequest {
    ConversionRequest {
        folder_name: args.folder,
        preset_name: args.preset,
        extension: args.extension,
    }
}

fn handle_convert(config_path: Option<&Path>, args: ConvertArgs) -> Result<()> {
    let config = Config::load(config_path)?;
    engine::convert(&config, &request_from(args))?;
    Ok(())
}

fn handle_dry_run(config_path: Option<&Path>, args: ConvertArgs) -> Result<()> {
    let config = Config::load(config_path)?;
    let cmd = engine::preview_command(&config, &request_from(args))?;

    println!("Command: {}", cmd);
    if cmd.encoder == EncoderKind::Gpu {
        println!(
            "{}",
            "(falls back to libx264 if NVENC fails)".to_string().dark_grey()
        );
    }
    Ok(())
}

fn handle_list_presets(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    if config.presets.is_empty() {
        println!("{}", "No presets defined in config".yellow());
        return Ok(());
    }

    println!("{}", "Available presets:".green().bold());
    for preset in &config.presets {
        let description = if preset.description.is_empty() {
            "No description"
        } else {
            preset.description.as_str()
        };
        println!(
            "- {}: {} ({}, {}, {}fps)",
            preset.name, description, preset.resolution, preset.bitrate, preset.fps
        );
    }
    Ok(())
}

fn handle_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    match Config::write_example(&path, force) {
        Ok(()) => {
            println!(
                "{}",
                format!(
                    "{} is ready. Customize it for your project.",
                    path.display()
                )
                .green()
            );
            Ok(())
        }
        Err(ConfigError::AlreadyExists(path)) => {
            println!(
                "{}",
                format!(
                    "{} already exists. Use --force to overwrite.",
                    path.display()
                )
                .yellow()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_validate(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let mut ok = true;

    match engine::ffmpeg_version(&config.ffmpeg_path) {
        Ok(version) => println!("{}", format!("ffmpeg found: {}", version).green()),
        Err(e) => {
            println!("{}", format!("ffmpeg not usable: {:#}", e).red());
            ok = false;
        }
    }

    if ok && config.encoding.use_gpu {
        if engine::encoder_available(&config.ffmpeg_path, EncoderKind::Gpu.codec()) {
            println!("{}", "h264_nvenc available".green());
        } else {
            println!(
                "{}",
                "h264_nvenc not listed by ffmpeg; conversions will fall back to libx264".yellow()
            );
        }
    }

    for (label, folder) in [
        ("Renders folder", &config.renders_folder),
        ("Output folder", &config.output_folder),
    ] {
        if !folder.is_dir() {
            println!("{}", format!("{} missing: {}", label, folder.display()).red());
            ok = false;
        }
    }

    if !config.presets.is_empty() {
        println!(
            "{}",
            format!("{} presets loaded.", config.presets.len()).green()
        );
    }

    if ok {
        println!("{}", "Configuration validated successfully!".green().bold());
        Ok(())
    } else {
        anyhow::bail!("configuration or environment has problems")
    }
}

fn handle_gui(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    ui::run_ui(&config).context("Terminal UI failed")
}
