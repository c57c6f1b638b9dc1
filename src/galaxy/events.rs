//! Fire-and-forget events emitted during generation

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::types::{CivilizationId, SpeciesId};
use crate::galaxy::civilization::Civilization;
use crate::galaxy::species::Species;

/// What an image is requested for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ImageSubject {
    #[display(fmt = "species portrait {}", _0)]
    SpeciesPortrait(SpeciesId),
    #[display(fmt = "civilization emblem {}", _0)]
    CivilizationEmblem(CivilizationId),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GenerationEvent {
    ImageGenerationRequested { subject: ImageSubject, prompt: String },
}

pub fn species_portrait_prompt(species: &Species) -> String {
    let mut prompt = format!(
        "Portrait of the {}, a {} species of {} origin. {} body, about {:.1} m tall",
        species.name,
        species.body_plan,
        species.origin,
        species.physical.body_type,
        species.physical.height_m,
    );
    if !species.physical.special_features.is_empty() {
        prompt.push_str(&format!(
            ", with {}",
            species.physical.special_features.join(", ").to_lowercase()
        ));
    }
    prompt.push('.');
    prompt
}

pub fn civilization_emblem_prompt(civilization: &Civilization, founder: &Species) -> String {
    let government = civilization
        .government
        .dominant_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| "stateless".to_string());
    format!(
        "Emblem of the {}, a {} civilization founded by the {}. Values: {}. Technology level {}.",
        civilization.name,
        government.to_lowercase(),
        founder.name,
        civilization.culture.values.join(", "),
        civilization.technology.level,
    )
}

/// Sending half of the image request queue
///
/// Sending never blocks. A closed queue is logged and otherwise ignored.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: UnboundedSender<GenerationEvent>,
}

impl EventSender {
    pub fn new(tx: UnboundedSender<GenerationEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, UnboundedReceiver<GenerationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn send(&self, event: GenerationEvent) {
        if let Err(err) = self.tx.send(event) {
            let GenerationEvent::ImageGenerationRequested { subject, .. } = err.0;
            tracing::warn!(%subject, "Image request dropped, event queue closed");
        }
    }

    pub fn request_image(&self, subject: ImageSubject, prompt: String) {
        self.send(GenerationEvent::ImageGenerationRequested { subject, prompt });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_send_delivers_in_order() {
        let (sender, mut rx) = EventSender::channel();
        let first = ImageSubject::SpeciesPortrait(SpeciesId(Uuid::from_u128(1)));
        let second = ImageSubject::CivilizationEmblem(CivilizationId(Uuid::from_u128(2)));
        sender.request_image(first, "a".into());
        sender.request_image(second, "b".into());

        match rx.try_recv().unwrap() {
            GenerationEvent::ImageGenerationRequested { subject, prompt } => {
                assert_eq!(subject, first);
                assert_eq!(prompt, "a");
            }
        }
        match rx.try_recv().unwrap() {
            GenerationEvent::ImageGenerationRequested { subject, .. } => {
                assert_eq!(subject, second)
            }
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_queue_is_swallowed() {
        let (sender, rx) = EventSender::channel();
        drop(rx);
        sender.request_image(
            ImageSubject::SpeciesPortrait(SpeciesId(Uuid::nil())),
            "ignored".into(),
        );
    }
}
