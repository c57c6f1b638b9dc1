//! Phoneme extraction

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

const DEFAULT_CONSONANTS: &[&str] = &[
    "b", "c", "d", "f", "g", "h", "k", "l", "m", "n", "p", "r", "s", "t", "v", "z",
];

const DEFAULT_VOWELS: &[&str] = &["a", "e", "i", "o", "u"];

const CONSONANT_CLUSTERS: &[&str] = &["th", "sh", "ch", "kr", "vr", "zh"];

const VOWEL_CLUSTERS: &[&str] = &["ae", "ou", "ei", "ia"];

/// Consonant and vowel inventories a name is assembled from
///
/// Both lists are sorted, deduplicated and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemeSet {
    pub consonants: Vec<String>,
    pub vowels: Vec<String>,
}

impl PhonemeSet {
    /// The default alphabet plus clusters, used when no seed word exists
    pub fn default_alphabet() -> Self {
        extract_phonemes("")
    }
}

impl Default for PhonemeSet {
    fn default() -> Self {
        Self::default_alphabet()
    }
}

/// Split a seed word into consonant and vowel inventories
pub fn extract_phonemes(seed: &str) -> PhonemeSet {
    let mut consonants: BTreeSet<String> = BTreeSet::new();
    let mut vowels: BTreeSet<String> = BTreeSet::new();

    for c in seed.chars().filter(|c| c.is_ascii_alphabetic()) {
        let c = c.to_ascii_lowercase();
        if VOWELS.contains(&c) {
            vowels.insert(c.to_string());
        } else {
            consonants.insert(c.to_string());
        }
    }

    if consonants.is_empty() {
        consonants.extend(DEFAULT_CONSONANTS.iter().map(|s| s.to_string()));
    }
    if vowels.is_empty() {
        vowels.extend(DEFAULT_VOWELS.iter().map(|s| s.to_string()));
    }

    consonants.extend(CONSONANT_CLUSTERS.iter().map(|s| s.to_string()));
    vowels.extend(VOWEL_CLUSTERS.iter().map(|s| s.to_string()));

    PhonemeSet {
        consonants: consonants.into_iter().collect(),
        vowels: vowels.into_iter().collect(),
    }
}
