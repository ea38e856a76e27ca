//! Heightmap generation using fractal noise.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::field::ScalarField;
use crate::noise::{synthesize_with, FractalConfig, FractalVariant, NoiseError};

/// Generates a heightmap from a seed.
///
/// The same seed, configuration and variant always produce the same field.
///
/// # Arguments
/// * `config` - Fractal parameters and output size
/// * `variant` - Octave weighting scheme
/// * `seed` - Seed for the gradient lattice
pub fn generate_heightmap(
    config: &FractalConfig,
    variant: FractalVariant,
    seed: u64,
) -> Result<ScalarField, NoiseError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_heightmap_with_rng(config, variant, &mut rng)
}

/// Generates a heightmap drawing the gradient lattice from `rng`.
pub fn generate_heightmap_with_rng<R: Rng + ?Sized>(
    config: &FractalConfig,
    variant: FractalVariant,
    rng: &mut R,
) -> Result<ScalarField, NoiseError> {
    let start = Instant::now();
    let field = synthesize_with(config, variant, rng)?;
    let (min, max) = field.value_range();

    tracing::info!(
        variant = variant.name(),
        width = config.width,
        height = config.height,
        octaves = config.octaves,
        min,
        max,
        elapsed = ?start.elapsed(),
        "generated heightmap"
    );
    Ok(field)
}
