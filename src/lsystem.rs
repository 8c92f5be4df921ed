//! L-System string rewriting and the preset plant grammars.
//!
//! [`LSystemConfig`] describes one plant: the grammar (axiom + production
//! rules + iteration count) and the turtle parameters the interpreter reads
//! (angle, segment length/thickness with per-step decay, leaf size).
//! [`LSystemConfig::generate`] expands the axiom into the flat symbol string
//! consumed by [`crate::interpreter::PlantInterpreter`].

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single production: every occurrence of `symbol` is replaced by
/// `replacement` on each pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LSystemRule {
    /// Source symbol the production matches.
    pub symbol: char,

    /// Replacement string substituted for the source symbol.
    pub replacement: String,
}

impl LSystemRule {
    pub fn new(symbol: char, replacement: impl Into<String>) -> Self {
        Self {
            symbol,
            replacement: replacement.into(),
        }
    }
}

/// Complete configuration for one generated plant.
///
/// Immutable once generation begins: the rewriter and the interpreter both
/// read it, neither writes it. Callers are expected to keep `iterations` in
/// the low single digits — the expanded string grows combinatorially with the
/// branching factor of the rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LSystemConfig {
    /// Start string of the derivation.
    pub axiom: String,

    /// Productions tested in order; the first rule whose `symbol` matches
    /// wins. Symbols with no matching rule pass through unchanged.
    pub rules: Vec<LSystemRule>,

    /// Number of full rewrite passes applied to the axiom.
    pub iterations: u32,

    /// Rotation step in degrees for every turn symbol.
    pub angle: f32,

    /// Length of the first branch segment.
    pub length: f32,

    /// Multiplier applied to the segment length after each forward move.
    pub length_decay: f32,

    /// Radius of the first branch segment.
    pub thickness: f32,

    /// Multiplier applied to the thickness after each forward move.
    pub thickness_decay: f32,

    /// Midrib length of emitted leaves.
    pub leaf_size: f32,

    /// Carried by every preset but not consulted during interpretation —
    /// leaf symbols currently emit unconditionally.
    pub leaf_probability: f32,
}

/// Applies every production once, scanning `symbols` left to right.
///
/// Each call fully consumes its input and returns a freshly owned string;
/// no in-place mutation.
pub fn rewrite_once(symbols: &str, rules: &[LSystemRule]) -> String {
    let mut out = String::with_capacity(symbols.len() * 2);
    for sym in symbols.chars() {
        match rules.iter().find(|rule| rule.symbol == sym) {
            Some(rule) => out.push_str(&rule.replacement),
            None => out.push(sym),
        }
    }
    out
}

impl LSystemConfig {
    /// Expands the axiom through `iterations` rewrite passes.
    ///
    /// Deterministic: identical configs yield identical strings. With
    /// `iterations == 0` the axiom is returned unchanged.
    pub fn generate(&self) -> String {
        let mut result = self.axiom.clone();
        for _ in 0..self.iterations {
            result = rewrite_once(&result, &self.rules);
        }
        tracing::debug!(
            symbols = result.len(),
            iterations = self.iterations,
            "expanded axiom"
        );
        result
    }
}

fn rule(symbol: char, replacement: &str) -> LSystemRule {
    LSystemRule::new(symbol, replacement)
}

/// The fixed table of complete plant presets.
///
/// Each entry is a full [`LSystemConfig`] tuned by hand; the demos pick one
/// at random via [`random_preset`].
pub fn presets() -> Vec<LSystemConfig> {
    vec![
        // Omnidirectional bush.
        LSystemConfig {
            axiom: "F".into(),
            rules: vec![rule('F', "F[&+FL][&-FL][^+FL][^-FL]")],
            iterations: 4,
            angle: 30.0,
            length: 1.2,
            length_decay: 0.75,
            thickness: 0.12,
            thickness_decay: 0.65,
            leaf_size: 0.4,
            leaf_probability: 0.9,
        },
        // Spiralling tree.
        LSystemConfig {
            axiom: "A".into(),
            rules: vec![
                rule('A', "F[\\&AL][/&AL][\\^AL][/^AL]FA"),
                rule('F', "FFL"),
            ],
            iterations: 4,
            angle: 25.0,
            length: 1.0,
            length_decay: 0.8,
            thickness: 0.1,
            thickness_decay: 0.7,
            leaf_size: 0.35,
            leaf_probability: 0.8,
        },
        // Dense branching.
        LSystemConfig {
            axiom: "F".into(),
            rules: vec![rule('F', "FF[&+F\\L][&-F/L][^+F\\L][^-F/L]")],
            iterations: 3,
            angle: 22.5,
            length: 1.1,
            length_decay: 0.7,
            thickness: 0.11,
            thickness_decay: 0.6,
            leaf_size: 0.3,
            leaf_probability: 0.85,
        },
        // Spherical bush.
        LSystemConfig {
            axiom: "F".into(),
            rules: vec![rule('F', "F[&FL][^FL][+FL][-FL][\\FL][/FL]")],
            iterations: 3,
            angle: 35.0,
            length: 0.9,
            length_decay: 0.8,
            thickness: 0.09,
            thickness_decay: 0.75,
            leaf_size: 0.45,
            leaf_probability: 1.0,
        },
        // Compound structure.
        LSystemConfig {
            axiom: "X".into(),
            rules: vec![
                rule('X', "F[&+X\\L][&-X/L]F[^+X\\L][^-X/L]FX"),
                rule('F', "FFL"),
            ],
            iterations: 4,
            angle: 28.0,
            length: 0.85,
            length_decay: 0.85,
            thickness: 0.08,
            thickness_decay: 0.8,
            leaf_size: 0.32,
            leaf_probability: 0.75,
        },
        // Flower-like whorl.
        LSystemConfig {
            axiom: "F".into(),
            rules: vec![rule(
                'F',
                "F[&++FL][&+FL][&FL][&-FL][&--FL][^++FL][^+FL][^FL][^-FL][^--FL]",
            )],
            iterations: 3,
            angle: 20.0,
            length: 1.0,
            length_decay: 0.75,
            thickness: 0.1,
            thickness_decay: 0.7,
            leaf_size: 0.5,
            leaf_probability: 1.0,
        },
        // Irregular branching.
        LSystemConfig {
            axiom: "F".into(),
            rules: vec![rule('F', "F[\\&+FL][/&-FL][\\^+FL][/^-FL]F[+FL][-FL]")],
            iterations: 4,
            angle: 32.0,
            length: 1.15,
            length_decay: 0.78,
            thickness: 0.105,
            thickness_decay: 0.68,
            leaf_size: 0.38,
            leaf_probability: 0.88,
        },
        // Weeping tree.
        LSystemConfig {
            axiom: "F".into(),
            rules: vec![rule('F', "F[&F[&FL]][^F[^FL]][+F[+FL]][-F[-FL]]")],
            iterations: 4,
            angle: 40.0,
            length: 1.3,
            length_decay: 0.72,
            thickness: 0.13,
            thickness_decay: 0.62,
            leaf_size: 0.42,
            leaf_probability: 0.92,
        },
    ]
}

/// Picks one preset uniformly from [`presets`].
pub fn random_preset<R: Rng>(rng: &mut R) -> LSystemConfig {
    let mut configs = presets();
    let idx = rng.gen_range(0..configs.len());
    configs.swap_remove(idx)
}
