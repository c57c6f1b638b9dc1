//! The generation pass
//!
//! Tiers run in order with a barrier between them: species, then systems
//! (which need the species pool), then civilizations (which need both).
//! Within a tier every entity draws from its own stream derived from the
//! master seed and its index, and rayon's ordered collect keeps the output
//! independent of thread count.

use std::time::Instant;

use rayon::prelude::*;

use crate::core::config::GalaxyGenerationConfig;
use crate::core::error::Result;
use crate::core::random::{RandomSource, Stream};
use crate::galaxy::civilization::{Civilization, CivilizationAssembler};
use crate::galaxy::events::{
    civilization_emblem_prompt, species_portrait_prompt, EventSender, ImageSubject,
};
use crate::galaxy::index::{WorldIndex, WorldSnapshot};
use crate::galaxy::species::{Species, SpeciesGenerator};
use crate::galaxy::star::{StarSystem, StarSystemGenerator};

pub struct GalaxyGenerator {
    config: GalaxyGenerationConfig,
    events: Option<EventSender>,
}

impl GalaxyGenerator {
    /// Fails with `InvalidConfiguration` before anything is sampled
    pub fn new(config: GalaxyGenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            events: None,
        })
    }

    /// Emit image requests for species and civilizations on `events`
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(&self) -> &GalaxyGenerationConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<WorldIndex> {
        let config = &self.config;
        let started = Instant::now();

        let mut galaxy_rng = RandomSource::for_entity(config.seed, Stream::Galaxy, 0);
        let species_count =
            galaxy_rng.range(config.species_count.min, config.species_count.max) as usize;
        let civilization_count = galaxy_rng.range(
            config.civilization_count.min,
            config.civilization_count.max,
        ) as usize;

        // Each tier finishes before the next reads it
        let tier = Instant::now();
        let species = self.generate_species(species_count);
        tracing::info!(
            count = species.len(),
            elapsed_ms = tier.elapsed().as_millis() as u64,
            "Generated species"
        );

        let tier = Instant::now();
        let systems = self.generate_systems(&species);
        tracing::info!(
            count = systems.len(),
            population = systems
                .iter()
                .fold(0u64, |acc, s| acc.saturating_add(s.total_population)),
            elapsed_ms = tier.elapsed().as_millis() as u64,
            "Generated star systems"
        );

        let tier = Instant::now();
        let mut civ_rng = RandomSource::for_entity(config.seed, Stream::Civilization, 0);
        let civilizations = CivilizationAssembler::new(config).assemble(
            &species,
            &systems,
            civilization_count,
            &mut civ_rng,
        );
        tracing::info!(
            count = civilizations.len(),
            elapsed_ms = tier.elapsed().as_millis() as u64,
            "Assembled civilizations"
        );

        // After all tiers so the event order is fixed
        if let Some(events) = &self.events {
            request_images(events, &species, &civilizations);
        }

        let world = WorldIndex::new(WorldSnapshot {
            seed: config.seed,
            galaxy_radius: config.galaxy_radius,
            species,
            systems,
            civilizations,
        });
        tracing::info!(
            seed = config.seed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Galaxy generation complete"
        );
        Ok(world)
    }

    fn generate_species(&self, count: usize) -> Vec<Species> {
        let generator = SpeciesGenerator::new(&self.config);
        let seed = self.config.seed;
        (0..count as u64)
            .into_par_iter()
            .map(|i| generator.generate(&mut RandomSource::for_entity(seed, Stream::Species, i)))
            .collect()
    }

    fn generate_systems(&self, species: &[Species]) -> Vec<StarSystem> {
        let generator = StarSystemGenerator::new(&self.config);
        let seed = self.config.seed;
        (0..self.config.total_systems.max(0) as u64)
            .into_par_iter()
            .map(|i| {
                generator.generate(&mut RandomSource::for_entity(seed, Stream::System, i), species)
            })
            .collect()
    }
}

fn request_images(events: &EventSender, species: &[Species], civilizations: &[Civilization]) {
    for s in species {
        events.request_image(ImageSubject::SpeciesPortrait(s.id), species_portrait_prompt(s));
    }
    for civilization in civilizations {
        if let Some(founder) = species.iter().find(|s| s.id == civilization.founding_species) {
            events.request_image(
                ImageSubject::CivilizationEmblem(civilization.id),
                civilization_emblem_prompt(civilization, founder),
            );
        }
    }
}

/// Run one generation pass without an event queue
pub fn generate(config: &GalaxyGenerationConfig) -> Result<WorldIndex> {
    GalaxyGenerator::new(config.clone())?.generate()
}
