//! Procedural naming
//!
//! Names are built from consonant+vowel syllables drawn from a phoneme set.
//! Each species carries its own set, so its people, places and institutions
//! share a recognisable sound.

pub mod phonemes;
pub mod synthesis;

pub use phonemes::{extract_phonemes, PhonemeSet};
pub use synthesis::{generate_name, generate_names, NameKind};
