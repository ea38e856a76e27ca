//! Owned single-channel float field.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::noise::{validate_dimensions, NoiseError};

/// A dense 2D field of `f32` values.
///
/// Cell `(i, j)` (column `i`, row `j`) lives at `i + j * height`: rows are
/// strided by the field height, not its width. Writers and readers in this
/// crate all go through [`ScalarField::index`] so the convention stays
/// consistent. For square fields the buffer is exactly `width * height`
/// values; narrower fields carry unused padding at the end of each row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ScalarField {
    /// Creates a zero-filled field.
    pub fn new(width: u32, height: u32) -> Result<Self, NoiseError> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; Self::storage_len(height)],
        })
    }

    /// Wraps an existing buffer laid out with row stride `height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<f32>) -> Result<Self, NoiseError> {
        validate_dimensions(width, height)?;
        let expected = Self::storage_len(height);
        if data.len() != expected {
            return Err(NoiseError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    fn storage_len(height: u32) -> usize {
        (height as usize) * (height as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride of the backing buffer.
    pub fn stride(&self) -> usize {
        self.height as usize
    }

    /// Buffer index of cell `(i, j)`.
    #[inline]
    pub fn index(&self, i: u32, j: u32) -> usize {
        i as usize + j as usize * self.height as usize
    }

    /// Returns the value at `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    #[inline]
    pub fn get(&self, i: u32, j: u32) -> f32 {
        debug_assert!(i < self.width && j < self.height);
        self.data[self.index(i, j)]
    }

    /// Sets the value at `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    #[inline]
    pub fn set(&mut self, i: u32, j: u32, value: f32) {
        debug_assert!(i < self.width && j < self.height);
        let idx = self.index(i, j);
        self.data[idx] = value;
    }

    /// Raw buffer of `height * height` values.
    ///
    /// For square fields this is exactly the `width * height` texture payload;
    /// narrower fields include row padding and must be uploaded row by row
    /// (see [`ScalarField::cells`]).
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Parallel mutable rows of the backing buffer, one `stride()`-long chunk per `j`.
    pub(crate) fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, f32> {
        let stride = self.stride();
        self.data.par_chunks_exact_mut(stride)
    }

    /// Buffer reinterpreted as native-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Iterates `(i, j, value)` over the addressable cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |j| (0..w).map(move |i| (i, j, self.get(i, j))))
    }

    /// Returns (min, max) over the addressable cells.
    pub fn value_range(&self) -> (f32, f32) {
        self.cells()
            .fold((f32::MAX, f32::MIN), |(lo, hi), (_, _, v)| (lo.min(v), hi.max(v)))
    }

    /// True when no addressable cell is NaN or infinite.
    pub fn all_finite(&self) -> bool {
        self.cells().all(|(_, _, v)| v.is_finite())
    }

    /// Bilinear lookup at normalized coordinates with repeat wrapping.
    ///
    /// Texel centers sit at `(i + 0.5) / width`, matching how a GPU samples a
    /// linear-filtered texture with `REPEAT` addressing.
    pub fn sample_repeat(&self, u: f32, v: f32) -> f32 {
        let x = u * self.width as f32 - 0.5;
        let y = v * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let w = self.width as i64;
        let h = self.height as i64;
        let i0 = (x0 as i64).rem_euclid(w) as u32;
        let j0 = (y0 as i64).rem_euclid(h) as u32;
        let i1 = (i0 + 1) % self.width;
        let j1 = (j0 + 1) % self.height;

        let top = self.get(i0, j0) + fx * (self.get(i1, j0) - self.get(i0, j0));
        let bottom = self.get(i0, j1) + fx * (self.get(i1, j1) - self.get(i0, j1));
        top + fy * (bottom - top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = ScalarField::new(16, 16).unwrap();
        assert_eq!(field.as_slice().len(), 256);
        assert!(field.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(ScalarField::new(0, 8).is_err());
        assert!(ScalarField::new(8, 4).is_err());
        assert!(ScalarField::from_vec(4, 4, vec![0.0; 15]).is_err());
    }

    #[test]
    fn test_index_uses_height_stride() {
        let mut field = ScalarField::new(2, 4).unwrap();
        assert_eq!(field.index(1, 2), 1 + 2 * 4);
        field.set(1, 2, 3.5);
        assert_eq!(field.as_slice()[9], 3.5);
        assert_eq!(field.get(1, 2), 3.5);
    }

    #[test]
    fn test_value_range_ignores_padding() {
        let mut field = ScalarField::new(2, 4).unwrap();
        field.set(0, 0, -0.5);
        field.set(1, 3, 2.0);
        assert_eq!(field.value_range(), (-0.5, 2.0));
    }

    #[test]
    fn test_all_finite() {
        let mut field = ScalarField::new(4, 4).unwrap();
        assert!(field.all_finite());
        field.set(2, 2, f32::NAN);
        assert!(!field.all_finite());
    }

    #[test]
    fn test_as_bytes_is_verbatim() {
        let mut field = ScalarField::new(2, 2).unwrap();
        field.set(1, 0, 1.0);
        let bytes = field.as_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn test_sample_repeat_hits_texel_centers() {
        let mut field = ScalarField::new(4, 4).unwrap();
        field.set(1, 2, 8.0);
        let v = field.sample_repeat(1.5 / 4.0, 2.5 / 4.0);
        assert!((v - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_repeat_wraps() {
        let mut field = ScalarField::new(4, 4).unwrap();
        for (i, j, _) in field.clone().cells() {
            field.set(i, j, (i + j * 4) as f32);
        }
        let a = field.sample_repeat(0.3, 0.7);
        let b = field.sample_repeat(1.3, -0.3);
        assert!((a - b).abs() < 1e-4);
    }
}
