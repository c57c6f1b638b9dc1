//! Name synthesis from a phoneme set

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::naming::phonemes::PhonemeSet;

/// What a generated name will be used for; decides the affix rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameKind {
    /// 15% chance of an apostrophe after the first syllable
    Personal,
    /// 35% chance of a lineage suffix
    Family,
    /// 50% chance of a leading honorific
    Title,
    /// 30% chance of a place suffix
    Location,
    /// 40% chance of a leading qualifier, 30% chance of a trailing body noun
    Organization,
}

const FAMILY_SUFFIXES: &[&str] = &["ar", "eth", "is", "orn", "ven"];
const TITLE_PREFIXES: &[&str] = &["High", "Grand", "Elder", "First"];
const LOCATION_SUFFIXES: &[&str] = &["polis", "heim", "ia", "prime", "haven"];
const ORGANIZATION_QUALIFIERS: &[&str] = &["United", "Free", "Grand", "Sovereign", "Allied"];
const ORGANIZATION_BODIES: &[&str] = &[
    "Collective",
    "Federation",
    "Consortium",
    "Union",
    "Compact",
];

/// Generate exactly `count` names of the given kind
pub fn generate_names(
    phonemes: &PhonemeSet,
    count: usize,
    kind: NameKind,
    rng: &mut RandomSource,
) -> Vec<String> {
    (0..count).map(|_| generate_name(phonemes, kind, rng)).collect()
}

/// Generate a single name of the given kind
pub fn generate_name(phonemes: &PhonemeSet, kind: NameKind, rng: &mut RandomSource) -> String {
    let syllable_count = rng.range_usize(2, 4);
    let syllables: Vec<String> = (0..syllable_count)
        .map(|_| syllable(phonemes, rng))
        .collect();

    match kind {
        NameKind::Personal => {
            let body = if rng.chance(0.15) {
                format!("{}'{}", syllables[0], syllables[1..].concat())
            } else {
                syllables.concat()
            };
            capitalize(&body)
        }
        NameKind::Family => {
            let mut body = syllables.concat();
            if rng.chance(0.35) {
                body.push_str(*rng.pick(FAMILY_SUFFIXES));
            }
            capitalize(&body)
        }
        NameKind::Title => {
            let body = capitalize(&syllables.concat());
            if rng.chance(0.5) {
                format!("{} {}", rng.pick(TITLE_PREFIXES), body)
            } else {
                body
            }
        }
        NameKind::Location => {
            let mut body = syllables.concat();
            if rng.chance(0.3) {
                body.push_str(*rng.pick(LOCATION_SUFFIXES));
            }
            capitalize(&body)
        }
        NameKind::Organization => {
            let mut name = capitalize(&syllables.concat());
            if rng.chance(0.4) {
                name = format!("{} {}", rng.pick(ORGANIZATION_QUALIFIERS), name);
            }
            if rng.chance(0.3) {
                name = format!("{} {}", name, rng.pick(ORGANIZATION_BODIES));
            }
            name
        }
    }
}

fn syllable(phonemes: &PhonemeSet, rng: &mut RandomSource) -> String {
    let consonant = rng.pick(&phonemes.consonants);
    let vowel = rng.pick(&phonemes.vowels);
    format!("{}{}", consonant, vowel)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::phonemes::extract_phonemes;

    const ALL_KINDS: [NameKind; 5] = [
        NameKind::Personal,
        NameKind::Family,
        NameKind::Title,
        NameKind::Location,
        NameKind::Organization,
    ];

    #[test]
    fn test_exact_count_and_capitalized() {
        let phonemes = extract_phonemes("Velshari");
        let mut rng = RandomSource::seeded(9);
        for kind in ALL_KINDS {
            let names = generate_names(&phonemes, 25, kind, &mut rng);
            assert_eq!(names.len(), 25);
            for name in names {
                assert!(!name.is_empty());
                assert!(name.chars().next().unwrap().is_uppercase(), "{}", name);
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = RandomSource::seeded(1);
        assert!(generate_names(&PhonemeSet::default(), 0, NameKind::Personal, &mut rng).is_empty());
    }

    #[test]
    fn test_degenerate_seed_still_names() {
        let phonemes = extract_phonemes("q");
        let mut rng = RandomSource::seeded(2);
        let names = generate_names(&phonemes, 10, NameKind::Location, &mut rng);
        assert_eq!(names.len(), 10);
        assert!(names.iter().all(|n| n.len() >= 4));
    }

    #[test]
    fn test_reproducible_from_stream_position() {
        let phonemes = extract_phonemes("Orvanthe");
        let a = generate_names(&phonemes, 8, NameKind::Organization, &mut RandomSource::seeded(77));
        let b = generate_names(&phonemes, 8, NameKind::Organization, &mut RandomSource::seeded(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_organization_affixes_appear() {
        let phonemes = PhonemeSet::default();
        let mut rng = RandomSource::seeded(4);
        let names = generate_names(&phonemes, 200, NameKind::Organization, &mut rng);
        assert!(names
            .iter()
            .any(|n| ORGANIZATION_QUALIFIERS.iter().any(|q| n.starts_with(q))));
        assert!(names
            .iter()
            .any(|n| ORGANIZATION_BODIES.iter().any(|b| n.ends_with(b))));
    }
}
