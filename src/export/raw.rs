//! RAW format export for engines and GPU texture upload.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ExportError;
use crate::terrain::ScalarField;

/// RAW export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawFormat {
    /// 16-bit unsigned integer, little-endian (Unity default).
    R16LittleEndian,
    /// 16-bit unsigned integer, big-endian.
    R16BigEndian,
    /// 32-bit float, little-endian. Values are written unmodified.
    #[default]
    R32Float,
}

/// Exports a field as a RAW heightmap, row by row.
///
/// # Arguments
/// * `field` - The heightfield to export
/// * `path` - Output file path
/// * `format` - RAW format (R16 or R32)
/// * `min_height` - Minimum height for normalization (R16 only)
/// * `max_height` - Maximum height for normalization (R16 only)
///
/// # Returns
/// `Ok(())` on success, or an error if export fails
pub fn export_field_raw(
    field: &ScalarField,
    path: &Path,
    format: RawFormat,
    min_height: f32,
    max_height: f32,
) -> Result<(), ExportError> {
    if format != RawFormat::R32Float && min_height >= max_height {
        return Err(ExportError::InvalidHeightRange(min_height, max_height));
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let range = max_height - min_height;
    let to_u16 = |h: f32| (((h - min_height) / range).clamp(0.0, 1.0) * 65535.0) as u16;

    for (_, _, height) in field.cells() {
        match format {
            RawFormat::R16LittleEndian => writer.write_all(&to_u16(height).to_le_bytes())?,
            RawFormat::R16BigEndian => writer.write_all(&to_u16(height).to_be_bytes())?,
            RawFormat::R32Float => writer.write_all(&height.to_le_bytes())?,
        }
    }

    writer.flush()?;
    tracing::debug!(path = %path.display(), ?format, "wrote raw heightfield");
    Ok(())
}

/// Returns the expected file size for a RAW export.
pub fn expected_file_size(width: u32, height: u32, format: RawFormat) -> u64 {
    let pixels = (width as u64) * (height as u64);
    match format {
        RawFormat::R16LittleEndian | RawFormat::R16BigEndian => pixels * 2,
        RawFormat::R32Float => pixels * 4,
    }
}
