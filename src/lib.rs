//! Procedural heightfield synthesis.
//!
//! Builds a 2D gradient noise field from a random lattice of unit
//! gradients and composites it into fractal Brownian motion or a hybrid
//! multifractal. The result is a single-channel float field used as
//! terrain elevation and as animated wave displacement.

pub mod export;
pub mod noise;
pub mod terrain;

pub use noise::{FractalConfig, FractalVariant, GradientLattice, NoiseError};
pub use terrain::{generate_heightmap, ScalarField, WavePhase, WaveSampler};
