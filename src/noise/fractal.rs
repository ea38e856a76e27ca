//! Multi-octave fractal compositing (fBm and hybrid multifractal).

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{validate_dimensions, NoiseError};
use super::gradient::perlin_2d;
use crate::terrain::ScalarField;

/// Octave weighting scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalVariant {
    /// Plain fractional Brownian motion: every octave adds `(noise + offset) * exponent[k]`.
    #[default]
    Fbm,
    /// Ridged base octave whose later contributions are scaled by a running,
    /// clamped weight.
    HybridMultifractal,
}

impl FractalVariant {
    pub fn name(&self) -> &'static str {
        match self {
            FractalVariant::Fbm => "fbm",
            FractalVariant::HybridMultifractal => "hybrid multifractal",
        }
    }
}

/// Configuration for fractal heightfield synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    /// Output width in cells.
    pub width: u32,
    /// Output height in cells (also the row stride).
    pub height: u32,
    /// Wavelength of the base gradient noise, in cells.
    pub base_period: u32,
    /// Fractal increment; larger values give a smoother result.
    pub h: f32,
    /// Frequency multiplier per octave. Sample indices stride by its integer part.
    pub lacunarity: f32,
    /// Bias added to every octave's sample.
    pub offset: f32,
    /// Number of octaves (at least 1).
    pub octaves: u32,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self::summer()
    }
}

impl FractalConfig {
    /// Gentle rolling terrain.
    pub fn summer() -> Self {
        Self {
            width: 2048,
            height: 2048,
            base_period: 512,
            h: 0.9,
            lacunarity: 2.0,
            offset: 0.1,
            octaves: 5,
        }
    }

    /// Cratered, high-octave surface.
    pub fn lunar() -> Self {
        Self {
            h: 0.8,
            lacunarity: 4.0,
            offset: 0.7,
            octaves: 43,
            ..Self::summer()
        }
    }

    /// Rough terrain with slow amplitude falloff.
    pub fn rugged() -> Self {
        Self {
            h: 0.25,
            lacunarity: 2.0,
            offset: 0.7,
            octaves: 16,
            ..Self::summer()
        }
    }

    /// Returns a copy with different output dimensions.
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self { width, height, ..self }
    }

    /// Integer stride applied to sample indices between octaves.
    pub fn index_stride(&self) -> u64 {
        self.lacunarity as u64
    }

    /// Checks every parameter, including the resulting exponent table.
    pub fn validate(&self) -> Result<(), NoiseError> {
        validate_dimensions(self.width, self.height)?;
        if self.base_period == 0 {
            return Err(NoiseError::InvalidPeriod(self.base_period));
        }
        self.validate_octaves()
    }

    fn validate_octaves(&self) -> Result<(), NoiseError> {
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(NoiseError::InvalidLacunarity(self.lacunarity));
        }
        if self.octaves < 1 {
            return Err(NoiseError::InvalidOctaves(self.octaves));
        }
        if !self.h.is_finite() {
            return Err(NoiseError::NonFiniteParameter("h"));
        }
        if !self.offset.is_finite() {
            return Err(NoiseError::NonFiniteParameter("offset"));
        }
        if !exponent_table(self.h, self.lacunarity, self.octaves)
            .iter()
            .all(|e| e.is_finite())
        {
            return Err(NoiseError::NonFiniteParameter("exponent"));
        }
        Ok(())
    }
}

/// Per-octave amplitudes `(lacunarity^k)^(-h)` for `k in 0..octaves`.
///
/// The first entry is always 1.
pub fn exponent_table(h: f32, lacunarity: f32, octaves: u32) -> Vec<f32> {
    let mut frequency = 1.0f32;
    (0..octaves)
        .map(|_| {
            let exponent = frequency.powf(-h);
            frequency *= lacunarity;
            exponent
        })
        .collect()
}

/// Sample cursor that walks `(i, j)` through successive octaves.
///
/// Indices and strides are kept reduced modulo the field size, which selects
/// the same cell as the unreduced product would.
struct OctaveCursor {
    i: u64,
    j: u64,
    width: u64,
    height: u64,
    stride_i: u64,
    stride_j: u64,
}

impl OctaveCursor {
    fn new(i: u32, j: u32, raw: &ScalarField, stride: u64) -> Self {
        Self {
            i: i as u64,
            j: j as u64,
            width: raw.width() as u64,
            height: raw.height() as u64,
            stride_i: stride % raw.width() as u64,
            stride_j: stride % raw.height() as u64,
        }
    }

    #[inline]
    fn sample(&self, raw: &ScalarField) -> f32 {
        raw.get((self.i % self.width) as u32, (self.j % self.height) as u32)
    }

    #[inline]
    fn advance(&mut self) {
        self.i = (self.i % self.width) * self.stride_i % self.width;
        self.j = (self.j % self.height) * self.stride_j % self.height;
    }
}

fn fbm_cell(raw: &ScalarField, mut cursor: OctaveCursor, exponents: &[f32], offset: f32) -> f32 {
    let mut value = 0.0f32;
    for &exponent in exponents {
        value += (cursor.sample(raw) + offset) * exponent;
        cursor.advance();
    }
    value
}

fn hybrid_cell(raw: &ScalarField, mut cursor: OctaveCursor, exponents: &[f32], offset: f32) -> f32 {
    let mut perlin = 1.0 - cursor.sample(raw).abs();
    let mut weight = perlin;
    cursor.advance();

    for &exponent in &exponents[1..] {
        // Keeps the running weight from compounding geometrically.
        if weight > 1.0 {
            weight = 1.0;
        }
        let signal = (perlin + offset) * exponent;
        perlin += weight * signal;
        weight *= signal;
        cursor.advance();
    }
    perlin
}

/// Accumulates octaves of an already generated raw noise field.
///
/// The output has the raw field's dimensions; `config.width`, `config.height`
/// and `config.base_period` are not consulted. Fails with
/// [`NoiseError::NonFiniteOutput`] if any cell overflows.
pub fn compose_octaves(
    raw: &ScalarField,
    config: &FractalConfig,
    variant: FractalVariant,
) -> Result<ScalarField, NoiseError> {
    config.validate_octaves()?;

    let exponents = exponent_table(config.h, config.lacunarity, config.octaves);
    let stride = config.index_stride();
    let offset = config.offset;
    let width = raw.width();
    let mut out = ScalarField::new(width, raw.height())?;

    out.par_rows_mut().enumerate().for_each(|(j, row)| {
        for (i, cell) in row.iter_mut().take(width as usize).enumerate() {
            let cursor = OctaveCursor::new(i as u32, j as u32, raw, stride);
            *cell = match variant {
                FractalVariant::Fbm => fbm_cell(raw, cursor, &exponents, offset),
                FractalVariant::HybridMultifractal => hybrid_cell(raw, cursor, &exponents, offset),
            };
        }
    });

    if let Some((i, j, _)) = out.cells().find(|(_, _, v)| !v.is_finite()) {
        return Err(NoiseError::NonFiniteOutput { variant: variant.name(), i, j });
    }

    tracing::debug!(
        variant = variant.name(),
        octaves = config.octaves,
        width,
        height = raw.height(),
        "composited octaves"
    );
    Ok(out)
}

/// Generates a fresh raw noise field and composites it with `variant`.
pub fn synthesize_with<R: Rng + ?Sized>(
    config: &FractalConfig,
    variant: FractalVariant,
    rng: &mut R,
) -> Result<ScalarField, NoiseError> {
    config.validate()?;
    let raw = perlin_2d(config.width, config.height, config.base_period, rng)?;
    compose_octaves(&raw, config, variant)
}

/// Plain fBm heightfield.
pub fn synthesize<R: Rng + ?Sized>(config: &FractalConfig, rng: &mut R) -> Result<ScalarField, NoiseError> {
    synthesize_with(config, FractalVariant::Fbm, rng)
}

/// Hybrid multifractal heightfield.
pub fn synthesize_hybrid<R: Rng + ?Sized>(
    config: &FractalConfig,
    rng: &mut R,
) -> Result<ScalarField, NoiseError> {
    synthesize_with(config, FractalVariant::HybridMultifractal, rng)
}
