//! Card definitions and the rarity-weighted draw feeding both synth games.

use std::f32::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fourier::Waveform;

/// Draw-rate tiers shared by both decks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Sampling order for cumulative-weight draws.
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];
}

/// Per-rarity draw probabilities; expected to sum to 1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RarityWeights {
    pub common: f32,
    pub rare: f32,
    pub epic: f32,
    pub legendary: f32,
}

impl RarityWeights {
    pub fn weight(&self, rarity: Rarity) -> f32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }
}

/// Flat draw odds used by the waveform deck.
pub const FOURIER_WEIGHTS: RarityWeights = RarityWeights {
    common: 0.25,
    rare: 0.25,
    epic: 0.25,
    legendary: 0.25,
};

/// Rarity-skewed draw odds used by the frequency deck.
pub const FREQUENCY_WEIGHTS: RarityWeights = RarityWeights {
    common: 0.4,
    rare: 0.3,
    epic: 0.2,
    legendary: 0.1,
};

/// A playable waveform card consumed by [`crate::fourier::FourierSynth`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FourierCard {
    pub id: String,
    pub name: String,
    pub waveform: Waveform,
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
    pub rarity: Rarity,
}

/// A playable pure-frequency card consumed by
/// [`crate::spectrum::SpectrumSynth`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyCard {
    pub id: String,
    pub name: String,
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
    pub rarity: Rarity,
}

/// Cards that participate in rarity-weighted drawing.
pub trait DeckCard {
    fn rarity(&self) -> Rarity;
}

impl DeckCard for FourierCard {
    fn rarity(&self) -> Rarity {
        self.rarity
    }
}

impl DeckCard for FrequencyCard {
    fn rarity(&self) -> Rarity {
        self.rarity
    }
}

fn fourier_card(
    id: &str,
    name: &str,
    waveform: Waveform,
    frequency: f32,
    rarity: Rarity,
) -> FourierCard {
    FourierCard {
        id: id.into(),
        name: name.into(),
        waveform,
        frequency,
        amplitude: 1.0,
        phase: 0.0,
        rarity,
    }
}

/// The fixed waveform deck.
pub fn fourier_deck() -> Vec<FourierCard> {
    vec![
        fourier_card("sin-1-basic", "Sine (fundamental)", Waveform::Sin, 1.0, Rarity::Common),
        fourier_card("cos-1-basic", "Cosine (fundamental)", Waveform::Cos, 1.0, Rarity::Common),
        fourier_card("sin-2-double", "Sine (2nd harmonic)", Waveform::Sin, 2.0, Rarity::Common),
        fourier_card("cos-2-double", "Cosine (2nd harmonic)", Waveform::Cos, 2.0, Rarity::Common),
        fourier_card("sin-3-triple", "Sine (3rd harmonic)", Waveform::Sin, 3.0, Rarity::Rare),
        fourier_card("cos-3-triple", "Cosine (3rd harmonic)", Waveform::Cos, 3.0, Rarity::Rare),
        fourier_card("square-1-basic", "Square wave", Waveform::Square, 1.0, Rarity::Epic),
        fourier_card("triangle-1-basic", "Triangle wave", Waveform::Triangle, 1.0, Rarity::Epic),
        fourier_card("sawtooth-1-basic", "Sawtooth wave", Waveform::Sawtooth, 1.0, Rarity::Epic),
        fourier_card("impulse-1-delta", "Impulse", Waveform::Impulse, 1.0, Rarity::Legendary),
        fourier_card("gaussian-1-bell", "Gaussian", Waveform::Gaussian, 1.0, Rarity::Legendary),
        fourier_card(
            "exponential-1-decay",
            "Exponential decay",
            Waveform::Exponential,
            1.0,
            Rarity::Rare,
        ),
    ]
}

fn frequency_card(
    id: &str,
    name: &str,
    frequency: f32,
    amplitude: f32,
    phase: f32,
    rarity: Rarity,
) -> FrequencyCard {
    FrequencyCard {
        id: id.into(),
        name: name.into(),
        frequency,
        amplitude,
        phase,
        rarity,
    }
}

/// The fixed frequency deck.
pub fn frequency_deck() -> Vec<FrequencyCard> {
    vec![
        // Low components.
        frequency_card("freq-0.5-low", "Low Bass", 0.5, 1.0, 0.0, Rarity::Common),
        frequency_card("freq-1-fundamental", "Fundamental", 1.0, 1.0, 0.0, Rarity::Common),
        frequency_card("freq-1.5-sub", "Sub Harmonic", 1.5, 0.8, 0.0, Rarity::Common),
        // Mid components.
        frequency_card("freq-2-second", "2nd Harmonic", 2.0, 0.7, 0.0, Rarity::Rare),
        frequency_card("freq-3-third", "3rd Harmonic", 3.0, 0.5, 0.0, Rarity::Rare),
        frequency_card("freq-4-fourth", "4th Harmonic", 4.0, 0.4, 0.0, Rarity::Rare),
        frequency_card("freq-2.5-off", "Off-Harmonic", 2.5, 0.6, PI / 4.0, Rarity::Rare),
        // High components.
        frequency_card("freq-5-fifth", "5th Harmonic", 5.0, 0.3, 0.0, Rarity::Epic),
        frequency_card("freq-6-sixth", "6th Harmonic", 6.0, 0.25, PI / 2.0, Rarity::Epic),
        frequency_card("freq-7-seventh", "7th Harmonic", 7.0, 0.2, 0.0, Rarity::Epic),
        frequency_card("freq-8-eighth", "8th Harmonic", 8.0, 0.15, PI, Rarity::Epic),
        // Specials.
        frequency_card("freq-dc-offset", "DC Offset", 0.0, 0.5, 0.0, Rarity::Legendary),
        frequency_card("freq-10-high", "High Frequency", 10.0, 0.1, 0.0, Rarity::Legendary),
        frequency_card("freq-noise-wide", "White Noise", 0.0, 0.05, 0.0, Rarity::Legendary),
        frequency_card("freq-complex-beat", "Beat Frequency", 1.1, 0.8, PI / 3.0, Rarity::Legendary),
    ]
}

/// Draws one card by rarity-weighted sampling.
///
/// A rarity tier is sampled by cumulative weight, then a uniform card of that
/// tier. Falls back to the deck's first card when the sampled tier is empty.
/// Returns `None` only for an empty deck.
pub fn draw_weighted<'a, C: DeckCard, R: Rng>(
    deck: &'a [C],
    weights: &RarityWeights,
    rng: &mut R,
) -> Option<&'a C> {
    if deck.is_empty() {
        return None;
    }

    let roll = rng.gen_range(0.0..1.0f32);
    let mut cumulative = 0.0;
    for rarity in Rarity::ALL {
        cumulative += weights.weight(rarity);
        if roll <= cumulative {
            let tier: Vec<&C> = deck.iter().filter(|card| card.rarity() == rarity).collect();
            if tier.is_empty() {
                break;
            }
            return Some(tier[rng.gen_range(0..tier.len())]);
        }
    }
    deck.first()
}
