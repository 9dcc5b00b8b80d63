// Conversion pipeline - independent of UI

pub mod core;

pub use core::*;
