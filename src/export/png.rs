//! PNG export functionality for heightfields.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};

use super::ExportError;
use crate::terrain::ScalarField;

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Minimum height value for normalization.
    pub min_height: f32,
    /// Maximum height value for normalization.
    pub max_height: f32,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_height: -1.0,
            max_height: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options with the height range taken from the field.
    pub fn auto_range(field: &ScalarField) -> Self {
        let (min, max) = field.value_range();
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

/// Exports a field as a 16-bit grayscale PNG, cell `(i, j)` at pixel `(i, j)`.
///
/// # Arguments
/// * `field` - The heightfield to export
/// * `path` - Output file path
/// * `options` - Export options including height range for normalization
///
/// # Returns
/// `Ok(())` on success, or an error if export fails
pub fn export_field_png(
    field: &ScalarField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    let min = options.min_height;
    let max = options.max_height;

    if min >= max {
        return Err(ExportError::InvalidHeightRange(min, max));
    }

    let (width, height) = (field.width(), field.height());
    let range = max - min;

    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(width, height);
    for (i, j, value) in field.cells() {
        let normalized = ((value - min) / range).clamp(0.0, 1.0);
        img.put_pixel(i, j, Luma([(normalized * 65535.0) as u16]));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;

    tracing::debug!(path = %path.display(), width, height, "wrote png heightfield");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_field_png() {
        let mut field = ScalarField::new(64, 64).unwrap();
        for (x, y, _) in field.clone().cells() {
            field.set(x, y, (x as f32 + y as f32) / 126.0 * 2.0 - 1.0);
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");
        export_field_png(&field, &path, &PngExportOptions::default()).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 64);
    }

    #[test]
    fn test_pixel_values() {
        let mut field = ScalarField::new(2, 2).unwrap();
        field.set(1, 0, 1.0);
        field.set(0, 1, -1.0);

        let dir = tempdir().unwrap();
        let path = dir.path().join("values.png");
        export_field_png(&field, &path, &PngExportOptions::default()).unwrap();

        let decoded = image::open(&path).unwrap().into_luma16();
        assert_eq!(decoded.get_pixel(1, 0).0[0], 65535);
        assert_eq!(decoded.get_pixel(0, 1).0[0], 0);
    }

    #[test]
    fn test_invalid_height_range() {
        let field = ScalarField::new(16, 16).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        let options = PngExportOptions {
            min_height: 1.0,
            max_height: -1.0,
            ..Default::default()
        };

        assert!(export_field_png(&field, &path, &options).is_err());
    }

    #[test]
    fn test_auto_range() {
        let mut field = ScalarField::new(16, 16).unwrap();
        field.set(0, 0, -0.5);
        field.set(15, 15, 0.75);

        let options = PngExportOptions::auto_range(&field);
        assert_eq!(options.min_height, -0.5);
        assert_eq!(options.max_height, 0.75);
    }
}
