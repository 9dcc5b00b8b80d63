//! Image-sequence to MP4 conversion through ffmpeg.
//!
//! The [`engine`] module holds the conversion pipeline; [`config`] supplies
//! the validated settings it consumes; [`ui`] is the interactive front-end.

pub mod config;
pub mod engine;
pub mod logging;
pub mod ui;
