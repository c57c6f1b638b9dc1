//! Species generation
//!
//! A species is drawn as a body plan plus an origin. Everything else is
//! derived from the two modifier tables below, then clamped into range, so
//! the generator is total and never fails.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::config::GalaxyGenerationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{clamp, score, SpeciesId};
use crate::galaxy::atmosphere::Gas;
use crate::naming::{extract_phonemes, generate_name, generate_names, NameKind, PhonemeSet};

/// A generated sentient species
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    pub body_plan: BodyPlan,
    pub origin: Origin,
    pub physical: PhysicalTraits,
    pub mental: MentalTraits,
    pub cultural: CulturalTraits,
    pub technology: TechnologyProfile,
    pub biology: BiologicalNeeds,
    pub language: LinguisticProfile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum BodyPlan {
    Humanoid,
    Insectoid,
    Reptilian,
    Aquatic,
    Avian,
    Plantlike,
    Crystalline,
    #[display(fmt = "Energy Being")]
    EnergyBeing,
    Machine,
    #[display(fmt = "Hive Mind")]
    HiveMind,
}

impl BodyPlan {
    pub const ALL: [BodyPlan; 10] = [
        BodyPlan::Humanoid,
        BodyPlan::Insectoid,
        BodyPlan::Reptilian,
        BodyPlan::Aquatic,
        BodyPlan::Avian,
        BodyPlan::Plantlike,
        BodyPlan::Crystalline,
        BodyPlan::EnergyBeing,
        BodyPlan::Machine,
        BodyPlan::HiveMind,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Origin {
    Terrestrial,
    Oceanic,
    Subterranean,
    #[display(fmt = "Gas Giant")]
    GasGiant,
    Void,
    Artificial,
}

impl Origin {
    pub const ALL: [Origin; 6] = [
        Origin::Terrestrial,
        Origin::Oceanic,
        Origin::Subterranean,
        Origin::GasGiant,
        Origin::Void,
        Origin::Artificial,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MemoryType {
    Individual,
    Collective,
    Genetic,
    Digital,
    Eidetic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SocialStructure {
    Tribal,
    Feudal,
    Democratic,
    Hierarchical,
    Collective,
    Meritocratic,
    Theocratic,
    Anarchic,
}

impl SocialStructure {
    pub const ALL: [SocialStructure; 8] = [
        SocialStructure::Tribal,
        SocialStructure::Feudal,
        SocialStructure::Democratic,
        SocialStructure::Hierarchical,
        SocialStructure::Collective,
        SocialStructure::Meritocratic,
        SocialStructure::Theocratic,
        SocialStructure::Anarchic,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Diet {
    Herbivore,
    Carnivore,
    Omnivore,
    Photosynthetic,
    Lithotroph,
    #[display(fmt = "Energy Absorber")]
    EnergyAbsorber,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum TechField {
    Computing,
    Engineering,
    Energy,
    Biology,
    Physics,
    Psionics,
    Weapons,
    Propulsion,
}

impl TechField {
    pub const ALL: [TechField; 8] = [
        TechField::Computing,
        TechField::Engineering,
        TechField::Energy,
        TechField::Biology,
        TechField::Physics,
        TechField::Psionics,
        TechField::Weapons,
        TechField::Propulsion,
    ];

    /// Level at which a field unlocks its unique technology
    pub const UNLOCK_LEVEL: u8 = 8;

    /// The technology a field unlocks once mastered
    pub fn unique_technology(&self) -> &'static str {
        match self {
            TechField::Computing => "Quantum Cognition Lattice",
            TechField::Engineering => "Self-Assembling Megastructures",
            TechField::Energy => "Zero-Point Reactors",
            TechField::Biology => "Directed Evolution",
            TechField::Physics => "Gravity Manipulation",
            TechField::Psionics => "Telepathic Networks",
            TechField::Weapons => "Antimatter Lances",
            TechField::Propulsion => "Fold-Space Drive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalTraits {
    /// Average adult height in metres, always positive
    pub height_m: f64,
    /// Natural lifespan in standard years, always positive
    pub lifespan_years: u32,
    pub body_type: String,
    pub special_features: Vec<String>,
    pub environment_needs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MentalTraits {
    pub intelligence: u8,
    pub emotional_range: u8,
    pub collective_mind: bool,
    pub memory_type: MemoryType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CulturalTraits {
    pub social_structure: SocialStructure,
    pub values: Vec<String>,
    pub taboos: Vec<String>,
    pub art_forms: Vec<String>,
    pub philosophy: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechnologyProfile {
    pub level: u8,
    pub specializations: BTreeMap<TechField, u8>,
    pub unique_technologies: Vec<String>,
}

impl TechnologyProfile {
    /// Highest field; ties resolve to the earliest field
    pub fn strongest_field(&self) -> Option<TechField> {
        let mut best: Option<(TechField, u8)> = None;
        for (&field, &level) in &self.specializations {
            if best.map_or(true, |(_, l)| level > l) {
                best = Some((field, level));
            }
        }
        best.map(|(field, _)| field)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiologicalNeeds {
    pub atmosphere: Vec<Gas>,
    /// Tolerable surface temperature, degrees Celsius (min, max)
    pub temperature_range: (f64, f64),
    /// Tolerable gravity in G (min, max)
    pub gravity_range: (f64, f64),
    pub radiation_tolerance: u8,
    pub diet: Diet,
}

/// Phonemes plus sample name pools for one species
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinguisticProfile {
    pub phonemes: PhonemeSet,
    pub personal_names: Vec<String>,
    pub family_names: Vec<String>,
    pub titles: Vec<String>,
    pub location_names: Vec<String>,
    pub organization_names: Vec<String>,
}

/// Per-body-plan modifier table
struct BodyPlanProfile {
    intelligence: (i64, i64),
    emotional_range: (i64, i64),
    height_m: (f64, f64),
    lifespan_years: (i64, i64),
    body_types: &'static [&'static str],
    features: &'static [&'static str],
    collective_mind: bool,
    memory_type: Option<MemoryType>,
    diet: Option<Diet>,
    art_forms: &'static [&'static str],
    tech_bonus: &'static [(TechField, i32)],
    signature_technologies: &'static [&'static str],
}

impl BodyPlan {
    fn profile(&self) -> BodyPlanProfile {
        match self {
            BodyPlan::Humanoid => BodyPlanProfile {
                intelligence: (4, 9),
                emotional_range: (4, 9),
                height_m: (1.4, 2.2),
                lifespan_years: (60, 150),
                body_types: &["Bipedal", "Stocky", "Slender"],
                features: &[
                    "Opposable thumbs",
                    "Binocular vision",
                    "Endurance running",
                    "Vocal range",
                ],
                collective_mind: false,
                memory_type: None,
                diet: None,
                art_forms: &["Music", "Sculpture", "Theatre", "Poetry"],
                tech_bonus: &[],
                signature_technologies: &["Adaptive Diplomacy Protocols"],
            },
            BodyPlan::Insectoid => BodyPlanProfile {
                intelligence: (3, 8),
                emotional_range: (1, 5),
                height_m: (0.5, 2.5),
                lifespan_years: (5, 60),
                body_types: &["Hexapod", "Winged", "Segmented"],
                features: &["Exoskeleton", "Compound eyes", "Pheromone signalling", "Mandibles"],
                collective_mind: false,
                memory_type: None,
                diet: None,
                art_forms: &["Hive Architecture", "Pheromone Composition", "Dance"],
                tech_bonus: &[(TechField::Engineering, 1)],
                signature_technologies: &["Organic Hive Construction"],
            },
            BodyPlan::Reptilian => BodyPlanProfile {
                intelligence: (4, 8),
                emotional_range: (2, 6),
                height_m: (1.2, 3.0),
                lifespan_years: (80, 300),
                body_types: &["Bipedal", "Serpentine", "Quadrupedal"],
                features: &["Scales", "Cold-blooded metabolism", "Regeneration", "Heat sensing"],
                collective_mind: false,
                memory_type: None,
                diet: Some(Diet::Carnivore),
                art_forms: &["Scale Painting", "Ritual Combat", "Sun Chants"],
                tech_bonus: &[(TechField::Weapons, 1)],
                signature_technologies: &["Thermal Regulation Suits"],
            },
            BodyPlan::Aquatic => BodyPlanProfile {
                intelligence: (4, 9),
                emotional_range: (3, 8),
                height_m: (1.0, 6.0),
                lifespan_years: (50, 400),
                body_types: &["Finned", "Tentacled", "Cetacean"],
                features: &["Gills", "Echolocation", "Bioluminescence", "Pressure resistance"],
                collective_mind: false,
                memory_type: None,
                diet: None,
                art_forms: &["Song Cycles", "Current Sculpture", "Light Displays"],
                tech_bonus: &[(TechField::Biology, 1)],
                signature_technologies: &["Hydrostatic Habitats"],
            },
            BodyPlan::Avian => BodyPlanProfile {
                intelligence: (4, 9),
                emotional_range: (4, 9),
                height_m: (0.6, 2.0),
                lifespan_years: (30, 120),
                body_types: &["Winged", "Flightless", "Gliding"],
                features: &["Hollow bones", "Keen eyesight", "Flight", "Magnetic sense"],
                collective_mind: false,
                memory_type: None,
                diet: None,
                art_forms: &["Aerial Choreography", "Song", "Feather Weaving"],
                tech_bonus: &[(TechField::Propulsion, 1)],
                signature_technologies: &["Atmospheric Gliders"],
            },
            BodyPlan::Plantlike => BodyPlanProfile {
                intelligence: (3, 8),
                emotional_range: (1, 6),
                height_m: (0.5, 12.0),
                lifespan_years: (200, 2000),
                body_types: &["Rooted", "Mobile Vine", "Fungal Mat"],
                features: &["Photosynthesis", "Spore dispersal", "Root networks", "Slow cognition"],
                collective_mind: false,
                memory_type: Some(MemoryType::Genetic),
                diet: Some(Diet::Photosynthetic),
                art_forms: &["Growth Sculpture", "Scent Gardens", "Seasonal Blooming"],
                tech_bonus: &[(TechField::Biology, 2)],
                signature_technologies: &["Living Architecture", "Symbiotic Terraforming"],
            },
            BodyPlan::Crystalline => BodyPlanProfile {
                intelligence: (5, 10),
                emotional_range: (1, 5),
                height_m: (0.3, 8.0),
                lifespan_years: (1000, 100000),
                body_types: &["Lattice", "Geode", "Shardform"],
                features: &["Silicon substrate", "Resonant communication", "Radiation feeding"],
                collective_mind: false,
                memory_type: Some(MemoryType::Eidetic),
                diet: Some(Diet::Lithotroph),
                art_forms: &["Harmonic Resonance", "Light Refraction", "Growth Patterns"],
                tech_bonus: &[(TechField::Physics, 2)],
                signature_technologies: &["Crystal Data Storage"],
            },
            BodyPlan::EnergyBeing => BodyPlanProfile {
                intelligence: (6, 10),
                emotional_range: (2, 10),
                height_m: (1.0, 20.0),
                lifespan_years: (5000, 1000000),
                body_types: &["Plasma Cloud", "Coherent Field", "Light Pattern"],
                features: &["Incorporeal form", "Electromagnetic sensing", "Phase shifting"],
                collective_mind: false,
                memory_type: None,
                diet: Some(Diet::EnergyAbsorber),
                art_forms: &["Aurora Weaving", "Field Harmonics", "Thought Sculpture"],
                tech_bonus: &[(TechField::Energy, 3), (TechField::Psionics, 2)],
                signature_technologies: &["Energy Form Projection", "Stellar Siphons"],
            },
            BodyPlan::Machine => BodyPlanProfile {
                intelligence: (5, 10),
                emotional_range: (1, 4),
                height_m: (0.5, 10.0),
                lifespan_years: (500, 50000),
                body_types: &["Modular Chassis", "Swarm Units", "Monolithic Frame"],
                features: &["Self-repair", "Networked cognition", "Modular limbs", "Backup cores"],
                collective_mind: false,
                memory_type: Some(MemoryType::Digital),
                diet: Some(Diet::EnergyAbsorber),
                art_forms: &["Algorithmic Composition", "Fractal Design", "Code Poetry"],
                tech_bonus: &[(TechField::Computing, 2), (TechField::Engineering, 2)],
                signature_technologies: &[
                    "Self-Replicating Foundries",
                    "Distributed Consciousness",
                ],
            },
            BodyPlan::HiveMind => BodyPlanProfile {
                intelligence: (6, 10),
                emotional_range: (1, 5),
                height_m: (0.2, 3.0),
                lifespan_years: (2, 40),
                body_types: &["Drone Caste", "Worker Caste", "Queen Caste"],
                features: &["Shared consciousness", "Caste specialization", "Rapid breeding"],
                collective_mind: true,
                memory_type: Some(MemoryType::Collective),
                diet: None,
                art_forms: &["Collective Architecture", "Synchronized Movement"],
                tech_bonus: &[(TechField::Engineering, 1), (TechField::Biology, 1)],
                signature_technologies: &["Neural Hive Link"],
            },
        }
    }
}

/// Per-origin modifier table
struct OriginProfile {
    environment_needs: &'static [&'static str],
    atmospheres: &'static [&'static [Gas]],
    /// Centre of the tolerated temperature band, degrees Celsius
    temperature_centre: f64,
    gravity: (f64, f64),
    radiation: (i64, i64),
    diets: &'static [Diet],
}

impl Origin {
    fn profile(&self) -> OriginProfile {
        match self {
            Origin::Terrestrial => OriginProfile {
                environment_needs: &["Liquid water", "Stable climate", "Arable land"],
                atmospheres: &[
                    &[Gas::Nitrogen, Gas::Oxygen],
                    &[Gas::Nitrogen, Gas::Oxygen, Gas::Argon],
                ],
                temperature_centre: 15.0,
                gravity: (0.7, 1.3),
                radiation: (2, 5),
                diets: &[Diet::Herbivore, Diet::Carnivore, Diet::Omnivore],
            },
            Origin::Oceanic => OriginProfile {
                environment_needs: &["Deep oceans", "Dissolved oxygen", "Tidal cycles"],
                atmospheres: &[&[Gas::Nitrogen, Gas::Oxygen, Gas::WaterVapor]],
                temperature_centre: 10.0,
                gravity: (0.8, 1.6),
                radiation: (1, 4),
                diets: &[Diet::Carnivore, Diet::Omnivore],
            },
            Origin::Subterranean => OriginProfile {
                environment_needs: &["Cave systems", "Geothermal heat", "Mineral deposits"],
                atmospheres: &[&[Gas::Nitrogen, Gas::CarbonDioxide], &[Gas::Nitrogen, Gas::Oxygen]],
                temperature_centre: 25.0,
                gravity: (0.9, 2.0),
                radiation: (3, 7),
                diets: &[Diet::Lithotroph, Diet::Omnivore, Diet::Herbivore],
            },
            Origin::GasGiant => OriginProfile {
                environment_needs: &["Dense atmosphere", "Buoyant layers", "Storm currents"],
                atmospheres: &[
                    &[Gas::Hydrogen, Gas::Helium],
                    &[Gas::Hydrogen, Gas::Helium, Gas::Methane],
                ],
                temperature_centre: -80.0,
                gravity: (1.5, 3.0),
                radiation: (4, 8),
                diets: &[Diet::Herbivore, Diet::EnergyAbsorber],
            },
            Origin::Void => OriginProfile {
                environment_needs: &["Vacuum", "Stellar radiation", "Asteroid fields"],
                atmospheres: &[&[]],
                temperature_centre: -150.0,
                gravity: (0.0, 0.5),
                radiation: (7, 10),
                diets: &[Diet::EnergyAbsorber, Diet::Lithotroph],
            },
            Origin::Artificial => OriginProfile {
                environment_needs: &["Power supply", "Manufacturing base", "Data networks"],
                atmospheres: &[&[], &[Gas::Nitrogen], &[Gas::Argon]],
                temperature_centre: 20.0,
                gravity: (0.5, 2.0),
                radiation: (5, 9),
                diets: &[Diet::EnergyAbsorber],
            },
        }
    }
}

const CULTURAL_VALUES: &[&str] = &[
    "Honor", "Knowledge", "Harmony", "Strength", "Prosperity", "Freedom", "Tradition",
    "Innovation", "Family", "Faith", "Beauty", "Order", "Survival", "Curiosity", "Loyalty",
    "Balance",
];

const TABOOS: &[&str] = &[
    "Wasting water", "Breaking oaths", "Speaking the names of the dead", "Eating kin",
    "Unshielded emotion", "Solitude", "Altering the genome", "Destroying records",
    "Refusing hospitality", "Deep-space burial", "Machine sentience", "Touching the young",
];

const PHILOSOPHIES: &[&str] = &[
    "The universe rewards those who endure",
    "All minds are threads of one pattern",
    "Knowledge is the only true wealth",
    "Balance between the self and the many",
    "The stars are a ladder to be climbed",
    "What is built must outlast its builders",
    "Change is the only constant worth worshipping",
    "Every life is a debt to the ancestors",
    "Strength exists to protect the weak",
    "The void listens; speak carefully",
];

/// Species generator carrying the galaxy-wide knobs it depends on
#[derive(Clone, Debug)]
pub struct SpeciesGenerator {
    technology_spread: f64,
    cultural_diversity: f64,
}

impl SpeciesGenerator {
    pub fn new(config: &GalaxyGenerationConfig) -> Self {
        Self {
            technology_spread: config.technology_spread,
            cultural_diversity: config.cultural_diversity,
        }
    }

    pub fn generate(&self, rng: &mut RandomSource) -> Species {
        let id = SpeciesId(rng.uuid());
        let body_plan = *rng.pick(&BodyPlan::ALL);
        let origin = *rng.pick(&Origin::ALL);
        let plan = body_plan.profile();
        let env = origin.profile();

        let mental = generate_mental(&plan, rng);
        let physical = generate_physical(&plan, &env, rng);
        let cultural = self.generate_cultural(body_plan, &plan, rng);
        let technology = self.generate_technology(&plan, mental.intelligence, rng);
        let biology = generate_biology(&plan, &env, rng);
        let (name, language) = generate_language(rng);

        Species {
            id,
            name,
            body_plan,
            origin,
            physical,
            mental,
            cultural,
            technology,
            biology,
            language,
        }
    }

    fn generate_cultural(
        &self,
        body_plan: BodyPlan,
        plan: &BodyPlanProfile,
        rng: &mut RandomSource,
    ) -> CulturalTraits {
        let social_structure = match body_plan {
            BodyPlan::HiveMind => SocialStructure::Collective,
            BodyPlan::Machine => *rng.pick(&[
                SocialStructure::Hierarchical,
                SocialStructure::Meritocratic,
                SocialStructure::Collective,
            ]),
            _ => *rng.pick(&SocialStructure::ALL),
        };

        let list_len = 1 + (2.0 * self.cultural_diversity).round() as usize;
        let art_count = rng.range_usize(1, plan.art_forms.len());

        CulturalTraits {
            social_structure,
            values: to_strings(rng.subset(CULTURAL_VALUES, list_len)),
            taboos: to_strings(rng.subset(TABOOS, list_len)),
            art_forms: to_strings(rng.subset(plan.art_forms, art_count)),
            philosophy: rng.pick(PHILOSOPHIES).to_string(),
        }
    }

    fn generate_technology(
        &self,
        plan: &BodyPlanProfile,
        intelligence: u8,
        rng: &mut RandomSource,
    ) -> TechnologyProfile {
        let noise = 1 + (2.0 * self.technology_spread).round() as i64;

        let mut specializations = BTreeMap::new();
        for field in TechField::ALL {
            let bonus: i32 = plan
                .tech_bonus
                .iter()
                .filter(|(f, _)| *f == field)
                .map(|(_, b)| *b)
                .sum();
            let raw = intelligence as i32 - 2 + rng.range(-noise, noise) as i32 + bonus;
            specializations.insert(field, score(raw));
        }

        let total: u32 = specializations.values().map(|&v| v as u32).sum();
        let level = score((total as f64 / specializations.len() as f64).round() as i32);

        let mut unique_technologies: Vec<String> = specializations
            .iter()
            .filter(|(_, &lvl)| lvl >= TechField::UNLOCK_LEVEL)
            .map(|(field, _)| field.unique_technology().to_string())
            .collect();

        let signature_count = rng.range_usize(1, plan.signature_technologies.len());
        unique_technologies.extend(to_strings(
            plan.signature_technologies[..signature_count].to_vec(),
        ));

        TechnologyProfile {
            level,
            specializations,
            unique_technologies,
        }
    }
}

fn generate_mental(plan: &BodyPlanProfile, rng: &mut RandomSource) -> MentalTraits {
    let intelligence = score(rng.range(plan.intelligence.0, plan.intelligence.1) as i32);
    let emotional_range = score(rng.range(plan.emotional_range.0, plan.emotional_range.1) as i32);

    let memory_type = match plan.memory_type {
        Some(fixed) => fixed,
        None => *rng.weighted(&[
            (MemoryType::Individual, 0.6),
            (MemoryType::Genetic, 0.2),
            (MemoryType::Eidetic, 0.2),
        ]),
    };

    MentalTraits {
        intelligence,
        emotional_range,
        collective_mind: plan.collective_mind,
        memory_type,
    }
}

fn generate_physical(
    plan: &BodyPlanProfile,
    env: &OriginProfile,
    rng: &mut RandomSource,
) -> PhysicalTraits {
    let height_m = clamp(rng.range_f64(plan.height_m.0, plan.height_m.1), 0.1, f64::MAX);
    let lifespan_years = rng.range(plan.lifespan_years.0, plan.lifespan_years.1).max(1) as u32;
    let feature_count = rng.range_usize(1, 3);
    let need_count = rng.range_usize(1, env.environment_needs.len());

    PhysicalTraits {
        height_m,
        lifespan_years,
        body_type: rng.pick(plan.body_types).to_string(),
        special_features: to_strings(rng.subset(plan.features, feature_count)),
        environment_needs: to_strings(rng.subset(env.environment_needs, need_count)),
    }
}

fn generate_biology(
    plan: &BodyPlanProfile,
    env: &OriginProfile,
    rng: &mut RandomSource,
) -> BiologicalNeeds {
    let atmosphere = rng.pick(env.atmospheres).to_vec();
    let low = env.temperature_centre - rng.range_f64(10.0, 40.0);
    let high = env.temperature_centre + rng.range_f64(10.0, 40.0);
    let gravity_low = rng.range_f64(env.gravity.0, (env.gravity.0 + env.gravity.1) / 2.0);
    let gravity_high = rng.range_f64((env.gravity.0 + env.gravity.1) / 2.0, env.gravity.1);
    let radiation_tolerance = score(rng.range(env.radiation.0, env.radiation.1) as i32);
    let diet = match plan.diet {
        Some(fixed) => fixed,
        None => *rng.pick(env.diets),
    };

    BiologicalNeeds {
        atmosphere,
        temperature_range: (low, high),
        gravity_range: (gravity_low, gravity_high),
        radiation_tolerance,
        diet,
    }
}

/// Species name plus the language its names are drawn from
///
/// A random seed word is synthesized first; the species name is built from
/// it, and the phoneme set of that name seeds every later name pool.
fn generate_language(rng: &mut RandomSource) -> (String, LinguisticProfile) {
    const LETTERS: &[char] = &[
        'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q',
        'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    ];

    let seed_len = rng.range_usize(5, 9);
    let seed_word: String = (0..seed_len).map(|_| *rng.pick(LETTERS)).collect();
    let name = generate_name(&extract_phonemes(&seed_word), NameKind::Personal, rng);
    let phonemes = extract_phonemes(&name);

    let language = LinguisticProfile {
        personal_names: generate_names(&phonemes, 5, NameKind::Personal, rng),
        family_names: generate_names(&phonemes, 5, NameKind::Family, rng),
        titles: generate_names(&phonemes, 3, NameKind::Title, rng),
        location_names: generate_names(&phonemes, 5, NameKind::Location, rng),
        organization_names: generate_names(&phonemes, 3, NameKind::Organization, rng),
        phonemes,
    };

    (name, language)
}

fn to_strings(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_many(n: u64) -> Vec<Species> {
        let generator = SpeciesGenerator::new(&GalaxyGenerationConfig::default());
        (0..n)
            .map(|i| generator.generate(&mut RandomSource::seeded(i)))
            .collect()
    }

    #[test]
    fn test_scores_stay_in_range() {
        for species in generate_many(300) {
            assert!((1..=10).contains(&species.mental.intelligence));
            assert!((1..=10).contains(&species.mental.emotional_range));
            assert!((1..=10).contains(&species.technology.level));
            assert!((1..=10).contains(&species.biology.radiation_tolerance));
            for level in species.technology.specializations.values() {
                assert!((1..=10).contains(level));
            }
            assert!(species.physical.height_m > 0.0);
            assert!(species.physical.lifespan_years > 0);
            assert_eq!(species.technology.specializations.len(), TechField::ALL.len());
        }
    }

    #[test]
    fn test_category_tech_bonuses() {
        // Zero spread keeps field noise at +/-1, so a bonus always shows
        let config = GalaxyGenerationConfig {
            technology_spread: 0.0,
            ..Default::default()
        };
        let generator = SpeciesGenerator::new(&config);
        let floor = |intelligence: u8, bonus: i32| score(intelligence as i32 - 3 + bonus);

        let (mut machines, mut energy_beings) = (0, 0);
        for seed in 0..600 {
            let species = generator.generate(&mut RandomSource::seeded(seed));
            let tech = &species.technology.specializations;
            let int = species.mental.intelligence;
            match species.body_plan {
                BodyPlan::Machine => {
                    machines += 1;
                    assert!(tech[&TechField::Computing] >= floor(int, 2));
                    assert!(tech[&TechField::Engineering] >= floor(int, 2));
                }
                BodyPlan::EnergyBeing => {
                    energy_beings += 1;
                    assert!(tech[&TechField::Energy] >= floor(int, 3));
                    assert!(tech[&TechField::Psionics] >= floor(int, 2));
                }
                _ => {}
            }
        }
        assert!(machines > 0 && energy_beings > 0);
    }

    #[test]
    fn test_hive_mind_overrides() {
        let hives: Vec<_> = generate_many(400)
            .into_iter()
            .filter(|s| s.body_plan == BodyPlan::HiveMind)
            .collect();
        assert!(!hives.is_empty());
        for hive in hives {
            assert!(hive.mental.collective_mind);
            assert_eq!(hive.mental.memory_type, MemoryType::Collective);
            assert!(hive.mental.intelligence >= 6);
            assert_eq!(hive.cultural.social_structure, SocialStructure::Collective);
        }
    }

    #[test]
    fn test_machine_overrides() {
        let machines: Vec<_> = generate_many(400)
            .into_iter()
            .filter(|s| s.body_plan == BodyPlan::Machine)
            .collect();
        assert!(!machines.is_empty());
        for machine in machines {
            assert_eq!(machine.mental.memory_type, MemoryType::Digital);
            assert!(machine.mental.emotional_range <= 4);
            assert!(machine
                .technology
                .unique_technologies
                .contains(&"Self-Replicating Foundries".to_string()));
        }
    }

    #[test]
    fn test_unique_tech_requires_mastery() {
        for species in generate_many(200) {
            for (field, level) in &species.technology.specializations {
                let unlocked = species
                    .technology
                    .unique_technologies
                    .contains(&field.unique_technology().to_string());
                assert_eq!(unlocked, *level >= TechField::UNLOCK_LEVEL, "{:?}", field);
            }
            // At least one signature technology on top of the field unlocks
            assert!(!species.technology.unique_technologies.is_empty());
        }
    }

    #[test]
    fn test_deterministic_for_same_stream() {
        let generator = SpeciesGenerator::new(&GalaxyGenerationConfig::default());
        let a = generator.generate(&mut RandomSource::seeded(99));
        let b = generator.generate(&mut RandomSource::seeded(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_name_pools_filled() {
        for species in generate_many(20) {
            assert!(!species.name.is_empty());
            assert_eq!(species.language.personal_names.len(), 5);
            assert_eq!(species.language.family_names.len(), 5);
            assert_eq!(species.language.titles.len(), 3);
            assert_eq!(species.language.location_names.len(), 5);
            assert_eq!(species.language.organization_names.len(), 3);
        }
    }

    #[test]
    fn test_cultural_diversity_scales_lists() {
        let narrow = SpeciesGenerator::new(&GalaxyGenerationConfig {
            cultural_diversity: 0.0,
            ..Default::default()
        });
        let wide = SpeciesGenerator::new(&GalaxyGenerationConfig {
            cultural_diversity: 1.0,
            ..Default::default()
        });
        let a = narrow.generate(&mut RandomSource::seeded(5));
        let b = wide.generate(&mut RandomSource::seeded(5));
        assert_eq!(a.cultural.values.len(), 1);
        assert_eq!(b.cultural.values.len(), 3);
    }

    #[test]
    fn test_strongest_field() {
        let mut specializations = BTreeMap::new();
        specializations.insert(TechField::Computing, 4);
        specializations.insert(TechField::Energy, 9);
        specializations.insert(TechField::Physics, 9);
        let profile = TechnologyProfile {
            level: 6,
            specializations,
            unique_technologies: Vec::new(),
        };
        assert_eq!(profile.strongest_field(), Some(TechField::Energy));
    }
}
