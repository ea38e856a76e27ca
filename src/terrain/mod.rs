//! Terrain heightfields.
//!
//! Provides the owned [`ScalarField`] buffer, the end-to-end heightmap
//! entry point and animated wave sampling over a generated field.

mod field;
mod heightmap;
mod wave;

pub use field::ScalarField;
pub use heightmap::{generate_heightmap, generate_heightmap_with_rng};
pub use wave::{WavePhase, WaveSampler};
