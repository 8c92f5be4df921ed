// tests/synth_pair.rs
use std::f32::consts::PI;

use florasynth::{
    BIN_TOLERANCE, FOURIER_WEIGHTS, FourierSynth, FrequencyCard, GraphPoint, Rarity,
    SpectrumSynth, Waveform, draw_weighted, fourier_deck, frequency_deck,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn find_card(waveform: Waveform) -> florasynth::FourierCard {
    fourier_deck()
        .into_iter()
        .find(|card| card.waveform == waveform && (card.frequency - 1.0).abs() < 1e-6)
        .expect("deck card")
}

fn sample_at(points: &[GraphPoint], x: f32) -> f32 {
    points
        .iter()
        .min_by(|a, b| (a.x - x).abs().partial_cmp(&(b.x - x).abs()).unwrap())
        .unwrap()
        .y
}

#[test]
fn sine_card_round_trips_through_both_spaces() {
    let mut synth = FourierSynth::new();
    synth.play(&find_card(Waveform::Sin));

    // Quarter period of the 1 Hz fundamental: amplitude exactly.
    let real = synth.real_space();
    assert!((sample_at(&real, 0.25) - 1.0).abs() < 1e-4);

    // Spectrum: one line at 1 Hz, nothing anywhere else.
    let spectrum = synth.frequency_space();
    let mut hot_bins = 0;
    for point in &spectrum {
        if point.y != 0.0 {
            hot_bins += 1;
            assert!((point.x - 1.0).abs() < BIN_TOLERANCE);
            assert!((point.y - 1.0).abs() < 1e-4);
        }
    }
    assert_eq!(hot_bins, 1);
}

#[test]
fn square_card_plateaus_near_amplitude() {
    let mut synth = FourierSynth::new();
    synth.play(&find_card(Waveform::Square));
    let plateau = sample_at(&synth.real_space(), 0.25);
    // Truncated at the 15th harmonic, the quarter-period sample sits within
    // the alternating-series error bound of the ideal unit amplitude.
    assert!((plateau - 1.0).abs() < 4.0 / (PI * 17.0));
    assert!(plateau > 0.9 && plateau < 1.1);
}

#[test]
fn square_spectrum_and_signal_share_harmonics() {
    let mut synth = FourierSynth::new();
    synth.play(&find_card(Waveform::Square));
    let spectrum = synth.frequency_space();
    for n in [1.0f32, 3.0, 5.0, 7.0] {
        assert!((sample_at(&spectrum, n) - 4.0 / (PI * n)).abs() < 1e-4);
    }
    for n in [2.0f32, 4.0, 6.0] {
        assert_eq!(sample_at(&spectrum, n), 0.0);
    }
}

#[test]
fn exponential_pair_shares_its_decay_rate() {
    let mut synth = FourierSynth::new();
    synth.play(&find_card(Waveform::Exponential));

    // Real space: e^(-2|x|) at x = 0.5 is e^-1.
    let real = synth.real_space();
    assert!((sample_at(&real, 0.5) - (-1.0f32).exp()).abs() < 1e-4);

    // Spectrum: the Lorentzian 2λ/(λ² + Δ²) with the same λ = 2 peaks at
    // exactly the base amplitude over the component frequency.
    let spectrum = synth.frequency_space();
    assert!((sample_at(&spectrum, 1.0) - 1.0).abs() < 1e-3);
}

#[test]
fn replaying_a_card_scales_both_spaces_identically() {
    let card = find_card(Waveform::Cos);
    let mut once = FourierSynth::new();
    once.play(&card);
    let mut twice = FourierSynth::new();
    twice.play(&card);
    twice.play(&card);

    assert_eq!(twice.count(Waveform::Cos, 1.0), 2);
    let real_once = once.real_space();
    let real_twice = twice.real_space();
    for (a, b) in real_once.iter().zip(&real_twice) {
        assert!((b.y - 2.0 * a.y).abs() < 1e-4);
    }
    let spec_once = once.frequency_space();
    let spec_twice = twice.frequency_space();
    for (a, b) in spec_once.iter().zip(&spec_twice) {
        assert!((b.y - 2.0 * a.y).abs() < 1e-4);
    }
}

#[test]
fn frequency_card_replay_bumps_count_by_two() {
    let deck = frequency_deck();
    let second = deck
        .iter()
        .find(|card| card.id == "freq-2-second")
        .expect("deck card");
    let mut synth = SpectrumSynth::new();
    synth.play(second);
    synth.play(second);
    assert_eq!(synth.component(2.0).unwrap().count, 2);
    // Nothing leaked into other buckets.
    assert_eq!(synth.len(), 1);
    assert!(synth.component(1.0).is_none());

    synth.reset();
    assert!(synth.is_empty());
}

#[test]
fn played_spectrum_inverts_to_the_expected_tone() {
    let synth = {
        let mut synth = SpectrumSynth::new();
        synth.play(&FrequencyCard {
            id: "tone".into(),
            name: "tone".into(),
            frequency: 2.0,
            amplitude: 0.7,
            phase: 0.0,
            rarity: Rarity::Common,
        });
        synth
    };
    let signal = synth.time_domain();
    // cos peaks at t = 0 and at whole periods of the 2 Hz tone.
    assert!((sample_at(&signal, 0.0) - 0.7).abs() < 1e-4);
    assert!((sample_at(&signal, 0.5) - 0.7).abs() < 1e-3);
    // Near the quarter period the tone is close to its zero crossing; the
    // 0.02 s sample grid lands at t = 0.12, not 0.125 exactly.
    assert!(sample_at(&signal, 0.125).abs() < 0.05);
}

#[test]
fn weighted_draws_feed_the_synth_end_to_end() {
    let mut rng = StdRng::seed_from_u64(23);
    let deck = fourier_deck();
    let mut synth = FourierSynth::new();
    for _ in 0..40 {
        let card = draw_weighted(&deck, &FOURIER_WEIGHTS, &mut rng).expect("non-empty deck");
        synth.play(card);
    }
    assert!(!synth.is_empty());
    let real = synth.real_space();
    let spectrum = synth.frequency_space();
    assert_eq!(real.len(), 1000);
    assert_eq!(spectrum.len(), 200);
    assert!(spectrum.iter().all(|p| p.y >= 0.0));
}
