//! Animated wave displacement read from a static heightfield.
//!
//! The field is generated once; motion comes from sliding the lookup
//! coordinates by a phase that advances every frame.

use serde::{Deserialize, Serialize};

use super::field::ScalarField;

/// Per-frame wave phase.
///
/// The phase grows by `step` each frame and jumps back to `restart` once it
/// passes `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePhase {
    pub value: f32,
    pub step: f32,
    pub restart: f32,
}

impl Default for WavePhase {
    fn default() -> Self {
        Self {
            value: 0.5,
            step: 0.00004,
            restart: 0.4,
        }
    }
}

impl WavePhase {
    /// Returns the phase for the current frame and moves to the next one.
    pub fn advance(&mut self) -> f32 {
        let current = self.value;
        self.value += self.step;
        if self.value > 1.0 {
            self.value = self.restart;
        }
        current
    }
}

/// Reads displacement from a heightfield at phase-shifted coordinates.
#[derive(Debug)]
pub struct WaveSampler<'a> {
    field: &'a ScalarField,
    scale: f32,
}

impl<'a> WaveSampler<'a> {
    pub fn new(field: &'a ScalarField, scale: f32) -> Self {
        Self { field, scale }
    }

    /// Displacement at `(u, v)` for the given phase, with repeat wrapping.
    pub fn displacement(&self, u: f32, v: f32, phase: f32) -> f32 {
        self.field.sample_repeat(u + phase, v + phase) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_advances_and_restarts() {
        let mut phase = WavePhase::default();
        assert_eq!(phase.advance(), 0.5);
        assert!(phase.value > 0.5);

        let mut phase = WavePhase { value: 0.99998, step: 0.1, restart: 0.4 };
        phase.advance();
        assert_eq!(phase.value, 0.4);
    }

    #[test]
    fn test_phase_stays_in_range() {
        let mut phase = WavePhase { step: 0.01, ..Default::default() };
        for _ in 0..1000 {
            let p = phase.advance();
            assert!((0.4..=1.0).contains(&p), "phase {p} out of range");
        }
    }

    #[test]
    fn test_displacement_shifts_with_phase() {
        let mut field = ScalarField::new(4, 4).unwrap();
        field.set(2, 2, 1.0);
        let sampler = WaveSampler::new(&field, 2.0);

        // Texel (2, 2) is centred at 0.625; a phase of 0.25 moves it to 0.375.
        assert!((sampler.displacement(0.625, 0.625, 0.0) - 2.0).abs() < 1e-6);
        assert!((sampler.displacement(0.375, 0.375, 0.25) - 2.0).abs() < 1e-6);
        assert!(sampler.displacement(0.375, 0.375, 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_cycle_phase_is_identity() {
        let mut field = ScalarField::new(4, 4).unwrap();
        field.set(1, 3, 0.5);
        let sampler = WaveSampler::new(&field, 1.0);
        let a = sampler.displacement(0.2, 0.8, 0.0);
        let b = sampler.displacement(0.2, 0.8, 1.0);
        assert!((a - b).abs() < 1e-5);
    }
}
