mod convert;
mod error;
mod ffmpeg_cmd;
mod ffmpeg_info;
mod frame_list;
mod output;
mod runner;
mod scan;
mod types;

pub use convert::{convert, convert_with_runner, preview_command};
pub use error::{ConvertError, ProcessError};
pub use ffmpeg_cmd::build_encode_cmd;
pub use ffmpeg_info::{encoder_available, encoders_list_contains, ffmpeg_version};
pub use frame_list::{FrameListing, concat_entry};
pub use output::{
    MAX_OUTPUT_PROBES, allocate_output_path, allocate_output_path_at, output_base_name,
};
pub use runner::{EncoderRunner, FfmpegRunner};
pub use scan::{
    IMAGE_EXTENSIONS, RenderFolder, compare_sequence_names, has_extension, list_images,
    scan_render_folders, sequence_key,
};
pub use types::{ConversionRequest, EncodeCommand, EncoderKind};
