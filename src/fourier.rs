//! Closed-form Fourier series synthesis for the waveform card game.
//!
//! [`FourierSynth`] accumulates played [`FourierCard`]s into a coefficient
//! table and samples the two curves the game charts: the summed real-space
//! signal ([`FourierSynth::real_space`]) and the theoretical magnitude
//! spectrum ([`FourierSynth::frequency_space`]). Both read the same
//! per-coefficient parameters, so the displayed pair is always a consistent
//! transform pair.

use std::collections::HashMap;
use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::deck::FourierCard;

/// Number of real-space samples per curve.
pub const REAL_SAMPLES: usize = 1000;

/// Real-space sample spacing; the grid is symmetric about x = 0.
pub const REAL_STEP: f32 = 0.005;

/// Number of spectrum bins per curve.
pub const FREQUENCY_BINS: usize = 200;

/// Spectrum bin spacing in Hz.
pub const FREQUENCY_STEP: f32 = 0.05;

/// Half-width of a spectral line bucket. Empirically chosen; tunable, but
/// kept at this value for output compatibility.
pub const BIN_TOLERANCE: f32 = 0.025;

/// Highest odd harmonic synthesized for square and triangle waves.
/// Empirically chosen truncation; tunable.
pub const ODD_HARMONIC_LIMIT: u32 = 15;

/// Highest harmonic synthesized for sawtooth waves. Empirically chosen.
pub const SAWTOOTH_HARMONIC_LIMIT: u32 = 20;

/// Standard deviation of the narrow Gaussian approximating an impulse.
pub const IMPULSE_SIGMA: f32 = 0.05;

/// Real-space standard deviation of the gaussian card.
pub const GAUSSIAN_SIGMA: f32 = 0.5;

/// Spectral standard deviation of the gaussian card.
pub const GAUSSIAN_SPECTRAL_SIGMA: f32 = 2.0;

/// Two-sided exponential decay rate. The same constant is the Lorentzian
/// half-width in the spectrum, keeping the pair consistent.
pub const DECAY_RATE: f32 = 2.0;

/// Flat spectral level an impulse card contributes to every bin.
pub const IMPULSE_SPECTRAL_LEVEL: f32 = 0.1;

/// A sampled curve point handed to chart renderers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub x: f32,
    pub y: f32,
}

/// Waveform families a card can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Waveform {
    Sin,
    Cos,
    Square,
    Triangle,
    Sawtooth,
    Impulse,
    Gaussian,
    Exponential,
}

/// One accumulated coefficient, keyed by (waveform, frequency).
///
/// Repeat plays of the same key increment `count` — an integer amplitude
/// multiplier — rather than blending the stored base amplitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FourierCoefficient {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
    /// Times this (waveform, frequency) has been played since the last reset.
    pub count: u32,
}

/// Frequencies are keyed in integer millihertz so the map key is hashable.
type CoefficientKey = (Waveform, u32);

fn coefficient_key(waveform: Waveform, frequency: f32) -> CoefficientKey {
    (waveform, (frequency * 1000.0).round() as u32)
}

/// Accumulates played waveform cards and samples the transform pair.
#[derive(Clone, Debug, Default)]
pub struct FourierSynth {
    coefficients: HashMap<CoefficientKey, FourierCoefficient>,
}

impl FourierSynth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a played card into the coefficient table.
    ///
    /// A first play stores the card's parameters with count 1; repeat plays
    /// of the same (waveform, frequency) only increment the count.
    pub fn play(&mut self, card: &FourierCard) {
        self.coefficients
            .entry(coefficient_key(card.waveform, card.frequency))
            .and_modify(|coeff| coeff.count += 1)
            .or_insert(FourierCoefficient {
                frequency: card.frequency,
                amplitude: card.amplitude,
                phase: card.phase,
                count: 1,
            });
    }

    /// Clears every coefficient.
    pub fn reset(&mut self) {
        self.coefficients.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Number of distinct (waveform, frequency) keys played.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Play count for a given key, zero if never played.
    pub fn count(&self, waveform: Waveform, frequency: f32) -> u32 {
        self.coefficients
            .get(&coefficient_key(waveform, frequency))
            .map_or(0, |coeff| coeff.count)
    }

    /// Samples the summed real-space signal over the symmetric x grid.
    ///
    /// An empty table yields an all-zero curve.
    pub fn real_space(&self) -> Vec<GraphPoint> {
        (0..REAL_SAMPLES)
            .map(|i| {
                let x = (i as f32 - REAL_SAMPLES as f32 / 2.0) * REAL_STEP;
                let y = self
                    .coefficients
                    .iter()
                    .map(|(&(waveform, _), coeff)| real_term(waveform, coeff, x))
                    .sum();
                GraphPoint { x, y }
            })
            .collect()
    }

    /// Samples the theoretical magnitude spectrum over the fixed bin grid.
    ///
    /// Periodic waveforms contribute exact harmonic lines; gaussian and
    /// exponential cards contribute their transform lobes. Values clamp
    /// at zero.
    pub fn frequency_space(&self) -> Vec<GraphPoint> {
        (0..FREQUENCY_BINS)
            .map(|i| {
                let f = i as f32 * FREQUENCY_STEP;
                let y: f32 = self
                    .coefficients
                    .iter()
                    .map(|(&(waveform, _), coeff)| spectral_term(waveform, coeff, f))
                    .sum();
                GraphPoint { x: f, y: y.max(0.0) }
            })
            .collect()
    }
}

/// One coefficient's contribution to the real-space signal at `x`.
fn real_term(waveform: Waveform, coeff: &FourierCoefficient, x: f32) -> f32 {
    let amplitude = coeff.amplitude * coeff.count as f32;
    let omega = 2.0 * PI * coeff.frequency;

    match waveform {
        Waveform::Sin => amplitude * (omega * x + coeff.phase).sin(),
        Waveform::Cos => amplitude * (omega * x + coeff.phase).cos(),
        Waveform::Square => (1..=ODD_HARMONIC_LIMIT)
            .step_by(2)
            .map(|n| {
                let n_f = n as f32;
                (amplitude * 4.0 / PI) / n_f * (omega * n_f * x + coeff.phase).sin()
            })
            .sum(),
        Waveform::Triangle => (1..=ODD_HARMONIC_LIMIT)
            .step_by(2)
            .map(|n| {
                let n_f = n as f32;
                let sign = if ((n - 1) / 2) % 2 == 0 { 1.0 } else { -1.0 };
                (amplitude * 8.0 / (PI * PI)) * sign / (n_f * n_f)
                    * (omega * n_f * x + coeff.phase).sin()
            })
            .sum(),
        Waveform::Sawtooth => (1..=SAWTOOTH_HARMONIC_LIMIT)
            .map(|n| {
                let n_f = n as f32;
                let sign = if n % 2 == 1 { 1.0 } else { -1.0 };
                (amplitude * 2.0 / PI) * sign / n_f * (omega * n_f * x + coeff.phase).sin()
            })
            .sum(),
        Waveform::Impulse => {
            amplitude * (-(x / IMPULSE_SIGMA).powi(2) / 2.0).exp()
                / (IMPULSE_SIGMA * (2.0 * PI).sqrt())
        }
        Waveform::Gaussian => amplitude * (-(x / GAUSSIAN_SIGMA).powi(2) / 2.0).exp(),
        Waveform::Exponential => amplitude * (-DECAY_RATE * x.abs()).exp(),
    }
}

/// One coefficient's contribution to the magnitude spectrum at bin `f`.
fn spectral_term(waveform: Waveform, coeff: &FourierCoefficient, f: f32) -> f32 {
    let amplitude = coeff.amplitude * coeff.count as f32;
    let f0 = coeff.frequency;

    match waveform {
        Waveform::Sin | Waveform::Cos => {
            if (f - f0).abs() < BIN_TOLERANCE {
                amplitude
            } else {
                0.0
            }
        }
        Waveform::Square => (1..=ODD_HARMONIC_LIMIT)
            .step_by(2)
            .filter(|&n| (f - n as f32 * f0).abs() < BIN_TOLERANCE)
            .map(|n| (amplitude * 4.0 / PI) / n as f32)
            .sum(),
        Waveform::Triangle => (1..=ODD_HARMONIC_LIMIT)
            .step_by(2)
            .filter(|&n| (f - n as f32 * f0).abs() < BIN_TOLERANCE)
            .map(|n| (amplitude * 8.0 / (PI * PI)) / (n * n) as f32)
            .sum(),
        Waveform::Sawtooth => (1..=SAWTOOTH_HARMONIC_LIMIT)
            .filter(|&n| (f - n as f32 * f0).abs() < BIN_TOLERANCE)
            .map(|n| (amplitude * 2.0 / PI) / n as f32)
            .sum(),
        Waveform::Impulse => amplitude * IMPULSE_SPECTRAL_LEVEL,
        Waveform::Gaussian => {
            amplitude * (-((f - f0) / GAUSSIAN_SPECTRAL_SIGMA).powi(2) / 2.0).exp()
        }
        Waveform::Exponential => {
            // Lorentzian lobe whose half-width equals the real-space decay rate.
            amplitude * (2.0 * DECAY_RATE) / (DECAY_RATE * DECAY_RATE + (f - f0).powi(2))
        }
    }
}
