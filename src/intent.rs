//! Intent catalog: the labeled dataset the bot is built from.
//!
//! The catalog is read once from a JSON file at startup and never changes
//! afterwards. Both lowercase keys and the PascalCase keys written by older
//! tooling are accepted:
//!
//! ```json
//! {
//!   "intents": [
//!     {
//!       "tag": "greeting",
//!       "patterns": ["hi", "hello"],
//!       "responses": ["Hello!"],
//!       "actions": []
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BotError, Result};

/// A named category of user utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier, also the classifier label.
    #[serde(alias = "Tag")]
    pub tag: String,
    /// Example utterances used as training data.
    #[serde(alias = "Patterns")]
    pub patterns: Vec<String>,
    /// Canned replies; one is picked at random per turn.
    #[serde(alias = "Responses")]
    pub responses: Vec<String>,
    /// Commands launched whenever this intent is predicted.
    #[serde(alias = "Actions", default, deserialize_with = "null_as_empty")]
    pub actions: Vec<String>,
}

impl Intent {
    /// Create an intent without actions.
    pub fn new<S: Into<String>>(tag: S, patterns: Vec<String>, responses: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            patterns,
            responses,
            actions: Vec::new(),
        }
    }

    /// Attach actions to this intent.
    pub fn with_actions(mut self, actions: Vec<String>) -> Self {
        self.actions = actions;
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(alias = "Intents")]
    intents: Vec<Intent>,
}

/// Ordered, immutable collection of intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
}

impl IntentCatalog {
    /// Build a catalog from intents, rejecting duplicate tags.
    pub fn new(intents: Vec<Intent>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(intents.len());
        for intent in &intents {
            if !seen.insert(intent.tag.as_str()) {
                return Err(BotError::configuration(format!(
                    "duplicate intent tag '{}'",
                    intent.tag
                )));
            }
        }

        for intent in &intents {
            if intent.patterns.is_empty() {
                warn!(
                    "Intent '{}' has no patterns and can never be predicted",
                    intent.tag
                );
            }
            if intent.responses.is_empty() {
                warn!(
                    "Intent '{}' has no responses; the fallback reply will be used",
                    intent.tag
                );
            }
        }

        Ok(Self { intents })
    }

    /// Load the catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BotError::configuration(format!(
                "cannot read intents file {}: {e}",
                path.display()
            ))
        })?;

        let catalog = Self::from_json_str(&content).map_err(|e| match e {
            BotError::Configuration(msg) => {
                BotError::configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;

        info!(
            "Loaded {} intents from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse the catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| BotError::configuration(format!("malformed intents data: {e}")))?;
        Self::new(file.intents)
    }

    /// Find the intent with the given tag.
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }

    /// Iterate intents in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Intent> {
        self.intents.iter()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// CRC32 over tags and patterns, in order.
    ///
    /// Responses and actions do not affect training, so editing them does not
    /// change the fingerprint.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for intent in &self.intents {
            hasher.update(intent.tag.as_bytes());
            hasher.update(&[0]);
            for pattern in &intent.patterns {
                hasher.update(pattern.as_bytes());
                hasher.update(&[0]);
            }
            hasher.update(&[1]);
        }
        hasher.finalize()
    }
}

impl<'a> IntoIterator for &'a IntentCatalog {
    type Item = &'a Intent;
    type IntoIter = std::slice::Iter<'a, Intent>;

    fn into_iter(self) -> Self::IntoIter {
        self.intents.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"{
        "intents": [
            {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]},
            {"tag": "farewell", "patterns": ["bye"], "responses": ["Goodbye!"], "actions": ["true"]}
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = IntentCatalog::from_json_str(SAMPLE).unwrap();

        assert_eq!(catalog.len(), 2);
        let greeting = catalog.get("greeting").unwrap();
        assert_eq!(greeting.patterns, vec!["hi", "hello"]);
        assert!(greeting.actions.is_empty());
        assert_eq!(catalog.get("farewell").unwrap().actions, vec!["true"]);
        assert!(catalog.get("unknown").is_none());
    }

    #[test]
    fn test_pascal_case_keys_and_null_actions() {
        let json = r#"{
            "Intents": [
                {"Tag": "joke", "Patterns": ["tell me a joke"], "Responses": ["No."], "Actions": null}
            ]
        }"#;
        let catalog = IntentCatalog::from_json_str(json).unwrap();

        let joke = catalog.get("joke").unwrap();
        assert_eq!(joke.responses, vec!["No."]);
        assert!(joke.actions.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = IntentCatalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, BotError::Configuration(_)));

        let err = IntentCatalog::from_json_str(r#"{"intents": [{"tag": "x"}]}"#).unwrap_err();
        assert!(matches!(err, BotError::Configuration(_)));
    }

    #[test]
    fn test_duplicate_tags_rejected() {
        let intents = vec![
            Intent::new("a", vec!["x".into()], vec!["r".into()]),
            Intent::new("a", vec!["y".into()], vec!["r".into()]),
        ];
        let err = IntentCatalog::new(intents).unwrap_err();
        assert!(err.to_string().contains("duplicate intent tag 'a'"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = IntentCatalog::load("/definitely/not/here/intents.json").unwrap_err();
        assert!(matches!(err, BotError::Configuration(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = IntentCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.iter().map(|i| i.tag.as_str()).collect::<Vec<_>>(), vec!["greeting", "farewell"]);
    }

    #[test]
    fn test_fingerprint_tracks_training_fields_only() {
        let base = IntentCatalog::from_json_str(SAMPLE).unwrap();

        let mut intents: Vec<Intent> = base.iter().cloned().collect();
        intents[0].responses.push("Hey!".into());
        let same = IntentCatalog::new(intents.clone()).unwrap();
        assert_eq!(base.fingerprint(), same.fingerprint());

        intents[0].patterns.push("hey".into());
        let changed = IntentCatalog::new(intents).unwrap();
        assert_ne!(base.fingerprint(), changed.fingerprint());
    }
}
