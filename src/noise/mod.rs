//! Noise generation for heightfield synthesis.
//!
//! Gradient noise over a random lattice, composited into fractal octaves.

mod error;
mod fractal;
mod gradient;

pub use error::{validate_dimensions, NoiseError};
pub use fractal::{
    compose_octaves, exponent_table, synthesize, synthesize_hybrid, synthesize_with,
    FractalConfig, FractalVariant,
};
pub use gradient::{fade, lerp, perlin_2d, perlin_2d_with_lattice, GradientLattice};
