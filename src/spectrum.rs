//! Inverse-direction synthesis for the frequency card game.
//!
//! Where [`crate::fourier::FourierSynth`] starts from waveforms and derives a
//! spectrum, [`SpectrumSynth`] starts from played pure-frequency components
//! and derives the time signal: the inverse transform
//! ([`SpectrumSynth::time_domain`]) plus a display spectrum with soft spread
//! lobes around each line ([`SpectrumSynth::frequency_domain`]).

use std::collections::HashMap;
use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::deck::FrequencyCard;
use crate::fourier::GraphPoint;

/// Number of time-domain samples per curve.
pub const TIME_SAMPLES: usize = 500;

/// Total sampled time span in seconds, symmetric about t = 0.
pub const TIME_SPAN: f32 = 10.0;

/// Number of display-spectrum bins per curve.
pub const SPECTRUM_BINS: usize = 200;

/// Highest displayed frequency in Hz.
pub const SPECTRUM_MAX_HZ: f32 = 12.0;

/// Half-width of exact spectral line matching, Hz.
pub const MATCH_TOLERANCE: f32 = 0.1;

/// Radius of the soft spread lobe drawn around each component, Hz.
pub const SPREAD_RADIUS: f32 = 0.5;

/// Gaussian falloff rate of the spread lobe.
pub const SPREAD_FALLOFF: f32 = 10.0;

/// Fraction of a component's amplitude feeding its spread lobe.
pub const SPREAD_GAIN: f32 = 0.3;

/// Fraction of a repeat card's amplitude blended into an occupied bucket.
pub const STACKING_GAIN: f32 = 0.5;

/// One accumulated spectrum entry.
///
/// Unlike the waveform game's coefficients, repeat plays blend amplitude
/// (at [`STACKING_GAIN`]) instead of multiplying by the count; `count`
/// records how many cards landed in the bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyComponent {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
    /// Cards played into this bucket since the last reset.
    pub count: u32,
}

/// Components bucket to 0.1 Hz so nearby card frequencies merge.
fn bucket(frequency: f32) -> i32 {
    (frequency * 10.0).round() as i32
}

/// Accumulates played frequency cards and synthesizes the time signal.
#[derive(Clone, Debug, Default)]
pub struct SpectrumSynth {
    components: HashMap<i32, FrequencyComponent>,
}

impl SpectrumSynth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a played card into the spectrum.
    ///
    /// A first play stores the card's parameters; a repeat play into the same
    /// bucket adds `amplitude * STACKING_GAIN` and increments the count, so
    /// stacking the same frequency has diminishing effect.
    pub fn play(&mut self, card: &FrequencyCard) {
        self.components
            .entry(bucket(card.frequency))
            .and_modify(|component| {
                component.amplitude += card.amplitude * STACKING_GAIN;
                component.count += 1;
            })
            .or_insert(FrequencyComponent {
                frequency: card.frequency,
                amplitude: card.amplitude,
                phase: card.phase,
                count: 1,
            });
    }

    /// Clears the whole spectrum.
    pub fn reset(&mut self) {
        self.components.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of occupied frequency buckets.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// The component occupying `frequency`'s bucket, if any.
    pub fn component(&self, frequency: f32) -> Option<&FrequencyComponent> {
        self.components.get(&bucket(frequency))
    }

    /// Inverse transform: sums every component into a sampled time signal.
    ///
    /// DC components (frequency 0) contribute a constant offset; every other
    /// component contributes `amplitude * cos(2π f t + phase)`. An empty
    /// spectrum yields an all-zero signal.
    pub fn time_domain(&self) -> Vec<GraphPoint> {
        let step = TIME_SPAN / TIME_SAMPLES as f32;
        (0..TIME_SAMPLES)
            .map(|i| {
                let t = (i as f32 - TIME_SAMPLES as f32 / 2.0) * step;
                let y = self
                    .components
                    .values()
                    .map(|component| {
                        if component.frequency == 0.0 {
                            component.amplitude
                        } else {
                            component.amplitude
                                * (2.0 * PI * component.frequency * t + component.phase).cos()
                        }
                    })
                    .sum();
                GraphPoint { x: t, y }
            })
            .collect()
    }

    /// Display spectrum: an exact line per component plus a soft spread lobe
    /// so single lines read as peaks on a chart. Values clamp at zero.
    pub fn frequency_domain(&self) -> Vec<GraphPoint> {
        (0..SPECTRUM_BINS)
            .map(|i| {
                let f = i as f32 * SPECTRUM_MAX_HZ / SPECTRUM_BINS as f32;
                let mut amplitude = 0.0f32;
                for component in self.components.values() {
                    let distance = (f - component.frequency).abs();
                    if distance < MATCH_TOLERANCE {
                        amplitude += component.amplitude;
                    }
                    if distance < SPREAD_RADIUS {
                        amplitude += (-distance * distance * SPREAD_FALLOFF).exp()
                            * component.amplitude
                            * SPREAD_GAIN;
                    }
                }
                GraphPoint {
                    x: f,
                    y: amplitude.max(0.0),
                }
            })
            .collect()
    }
}
