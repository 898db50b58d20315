use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::intent::IntentCatalog;

/// Reply used when the tag is unknown or its intent has no responses.
pub const FALLBACK_RESPONSE: &str = "Sorry, I don't understand.";

/// Picks a canned reply for a predicted tag.
#[derive(Debug, Clone)]
pub struct Responder {
    rng: StdRng,
}

impl Responder {
    /// Responder seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Responder whose choices are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn respond(&mut self, label: &str, catalog: &IntentCatalog) -> String {
        let Some(intent) = catalog.get(label) else {
            debug!("No intent tagged '{label}'");
            return FALLBACK_RESPONSE.to_string();
        };

        match intent.responses.choose(&mut self.rng) {
            Some(response) => response.clone(),
            None => {
                debug!("Intent '{label}' has no responses");
                FALLBACK_RESPONSE.to_string()
            }
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;

    fn catalog() -> IntentCatalog {
        IntentCatalog::new(vec![
            Intent::new(
                "greeting",
                vec!["hi".into()],
                vec!["Hello!".into(), "Hi there!".into(), "Hey!".into()],
            ),
            Intent::new("mute", vec!["shh".into()], vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        let mut responder = Responder::with_seed(1);
        assert_eq!(responder.respond("weather", &catalog()), FALLBACK_RESPONSE);
        assert_eq!(responder.respond("weather", &catalog()), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_empty_responses_fall_back() {
        let mut responder = Responder::with_seed(1);
        assert_eq!(responder.respond("mute", &catalog()), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_response_is_member_of_intent() {
        let catalog = catalog();
        let responses = &catalog.get("greeting").unwrap().responses;
        let mut responder = Responder::new();

        for _ in 0..50 {
            let response = responder.respond("greeting", &catalog);
            assert!(responses.contains(&response), "{response}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let catalog = catalog();
        let mut a = Responder::with_seed(7);
        let mut b = Responder::with_seed(7);

        let first: Vec<String> = (0..20).map(|_| a.respond("greeting", &catalog)).collect();
        let second: Vec<String> = (0..20).map(|_| b.respond("greeting", &catalog)).collect();

        assert_eq!(first, second);
    }
}
