//! Export module for saving heightfields to disk.
//!
//! 32-bit float RAW is a verbatim dump of the field for texture upload;
//! 16-bit RAW and PNG are normalized previews for image tools and engines.

mod png;
mod raw;

use thiserror::Error;

pub use png::{export_field_png, PngExportOptions};
pub use raw::{expected_file_size, export_field_raw, RawFormat};

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
}
