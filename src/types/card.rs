use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub traits: Vec<String>,
}

impl Card {
    #[cfg(test)]
    pub fn new(name: &str, traits: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            traits: traits.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Card names and trait labels compare after trimming surrounding whitespace.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_string()
}

/// Ordered, name-unique card list. Enumeration order follows this order.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        let cards = cards
            .into_iter()
            .map(|card| Card {
                name: normalize_label(&card.name),
                traits: card.traits.iter().map(|label| normalize_label(label)).collect(),
            })
            .collect::<Vec<_>>();
        let mut seen = HashSet::new();
        for card in &cards {
            let name = card.name.as_str();
            if name.is_empty() {
                return Err(DeckError::ConfigParse(
                    "cards entries must have a non-empty name".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(DeckError::ConfigParse(format!(
                    "cards contains duplicate name: {name}"
                )));
            }
            if card.traits.is_empty() {
                return Err(DeckError::ConfigParse(format!(
                    "card '{name}' must carry at least one trait"
                )));
            }
            let mut traits = HashSet::new();
            for label in &card.traits {
                if label.is_empty() {
                    return Err(DeckError::ConfigParse(format!(
                        "card '{name}' has an empty trait label"
                    )));
                }
                if !traits.insert(label.as_str()) {
                    return Err(DeckError::ConfigParse(format!(
                        "card '{name}' repeats trait: {label}"
                    )));
                }
            }
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.name == name)
    }

    pub fn resolve(&self, name: &str) -> Result<&Card> {
        self.get(name.trim())
            .ok_or_else(|| DeckError::UnknownCard(name.to_string()))
    }

    /// Sorted, de-duplicated trait labels present anywhere in the catalog.
    pub fn trait_labels(&self) -> Vec<&str> {
        let mut labels = self
            .cards
            .iter()
            .flat_map(|card| card.traits.iter().map(String::as_str))
            .collect::<Vec<_>>();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// SHA-256 over a canonical `name:trait,trait` line per card, in catalog order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for card in &self.cards {
            hasher.update(card.name.as_bytes());
            hasher.update(b":");
            hasher.update(card.traits.join(",").as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}
