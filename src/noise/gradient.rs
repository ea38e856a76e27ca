//! 2D gradient (Perlin) noise over a per-cell random gradient lattice.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rayon::prelude::*;

use super::error::{validate_dimensions, NoiseError};
use crate::terrain::ScalarField;

/// Linear interpolation between `x` and `y`.
#[inline(always)]
pub fn lerp(x: f32, y: f32, t: f32) -> f32 {
    x + t * (y - x)
}

/// Quintic smoothing curve `6t^5 - 15t^4 + 10t^3`.
#[inline(always)]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// One unit gradient per lattice point, laid out like [`ScalarField`]
/// (point `(i, j)` at `i + j * height`).
#[derive(Debug, Clone, PartialEq)]
pub struct GradientLattice {
    width: u32,
    height: u32,
    gradients: Vec<Vec2>,
}

impl GradientLattice {
    /// Draws a fresh lattice from `rng`.
    ///
    /// Each point takes an angle `a` uniform in `[0, 1)` and stores
    /// `(cos(2aπ), sin(2aπ))`. Points are drawn column by column, `j`
    /// varying fastest.
    pub fn random<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Result<Self, NoiseError> {
        validate_dimensions(width, height)?;
        let mut gradients = vec![Vec2::ZERO; height as usize * height as usize];
        for i in 0..width {
            for j in 0..height {
                let angle: f32 = rng.random();
                gradients[i as usize + j as usize * height as usize] =
                    Vec2::new((2.0 * angle * PI).cos(), (2.0 * angle * PI).sin());
            }
        }

        Ok(Self { width, height, gradients })
    }

    /// Builds a lattice from a gradient function, for callers that need a
    /// fixed, reproducible lattice.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, NoiseError>
    where
        F: FnMut(u32, u32) -> Vec2,
    {
        validate_dimensions(width, height)?;
        let mut gradients = vec![Vec2::ZERO; height as usize * height as usize];
        for i in 0..width {
            for j in 0..height {
                gradients[i as usize + j as usize * height as usize] = f(i, j);
            }
        }
        Ok(Self { width, height, gradients })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Gradient stored at lattice point `(i, j)`.
    #[inline]
    pub fn gradient(&self, i: u32, j: u32) -> Vec2 {
        self.gradients[i as usize + j as usize * self.height as usize]
    }

    /// Evaluates the noise at output cell `(i, j)` for the given period.
    ///
    /// Corners snap down to multiples of `period`; the far corners wrap
    /// around the lattice edge.
    #[inline]
    pub fn noise_at(&self, i: u32, j: u32, period: u32) -> f32 {
        let frequency = 1.0 / period as f32;

        let left = (i / period) * period;
        let right = ((left as u64 + period as u64) % self.width as u64) as u32;
        let top = (j / period) * period;
        let bottom = ((top as u64 + period as u64) % self.height as u64) as u32;

        let dx = (i - left) as f32 * frequency;
        let dy = (j - top) as f32 * frequency;

        let top_left = self.gradient(left, top);
        let top_right = self.gradient(right, top);
        let bottom_left = self.gradient(left, bottom);
        let bottom_right = self.gradient(right, bottom);

        let s = top_left.dot(Vec2::new(dx, -dy));
        let t = top_right.dot(Vec2::new(dx - 1.0, -dy));
        let u = bottom_left.dot(Vec2::new(dx, 1.0 - dy));
        let v = bottom_right.dot(Vec2::new(dx - 1.0, 1.0 - dy));

        let st = lerp(s, t, fade(dx));
        let uv = lerp(u, v, fade(dx));
        lerp(st, uv, fade(dy))
    }
}

/// Generates a `width x height` gradient noise field with wavelength `period`.
///
/// A new lattice is drawn from `rng` for every call.
pub fn perlin_2d<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    period: u32,
    rng: &mut R,
) -> Result<ScalarField, NoiseError> {
    validate_dimensions(width, height)?;
    if period == 0 {
        return Err(NoiseError::InvalidPeriod(period));
    }
    let lattice = GradientLattice::random(width, height, rng)?;
    perlin_2d_with_lattice(&lattice, period)
}

/// Evaluates gradient noise over every cell of an existing lattice.
pub fn perlin_2d_with_lattice(lattice: &GradientLattice, period: u32) -> Result<ScalarField, NoiseError> {
    if period == 0 {
        return Err(NoiseError::InvalidPeriod(period));
    }

    let width = lattice.width();
    let mut field = ScalarField::new(width, lattice.height())?;

    field.par_rows_mut().enumerate().for_each(|(j, row)| {
        for (i, cell) in row.iter_mut().take(width as usize).enumerate() {
            *cell = lattice.noise_at(i as u32, j as u32, period);
        }
    });

    tracing::debug!(width, height = lattice.height(), period, "evaluated gradient noise");
    Ok(field)
}
