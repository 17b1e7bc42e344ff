use crate::error::DeckError;
use crate::types::card::{normalize_label, Card, Catalog};
use crate::types::rules::{ThresholdRule, TraitTable};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_MODE: &str = "default";

#[derive(Debug, Clone, Deserialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub classes: BTreeMap<String, ClassConfig>,
    #[serde(default)]
    pub modes: BTreeMap<String, ModeConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_deck_size")]
    pub deck_size: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
    #[serde(default)]
    pub dummy_traits: Vec<String>,
    pub mode: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            deck_size: default_deck_size(),
            max_results: default_max_results(),
            display_limit: default_display_limit(),
            dummy_traits: Vec::new(),
            mode: None,
        }
    }
}

fn default_deck_size() -> usize {
    7
}

fn default_max_results() -> usize {
    200
}

fn default_display_limit() -> usize {
    50
}

/// A threshold rule shared by a group of trait labels.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassConfig {
    #[serde(flatten)]
    pub rule: ThresholdRule,
    #[serde(default)]
    pub traits: Vec<String>,
}

/// An alternative trait-class assignment selectable by name.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeConfig {
    #[serde(default)]
    pub classes: BTreeMap<String, ClassConfig>,
}

impl DeckConfig {
    pub fn builtin() -> Result<Self, DeckError> {
        let cfg: DeckConfig = toml::from_str(include_str!("../../presets/default.toml"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn catalog(&self) -> Result<Catalog, DeckError> {
        Catalog::new(self.cards.clone())
    }

    pub fn mode_names(&self) -> Vec<&str> {
        std::iter::once(DEFAULT_MODE)
            .chain(self.modes.keys().map(String::as_str))
            .collect()
    }

    /// Trait table of `mode`, or of `search.mode` / the top-level classes when `None`.
    pub fn trait_table(&self, mode: Option<&str>) -> Result<TraitTable, DeckError> {
        let classes = self.classes_for(mode)?;
        let mut table = TraitTable::new();
        for class in classes.values() {
            for label in &class.traits {
                table.insert(normalize_label(label), class.rule.clone());
            }
        }
        Ok(table)
    }

    pub fn classes_for(
        &self,
        mode: Option<&str>,
    ) -> Result<&BTreeMap<String, ClassConfig>, DeckError> {
        match mode.or(self.search.mode.as_deref()) {
            None | Some(DEFAULT_MODE) => Ok(&self.classes),
            Some(name) => self
                .modes
                .get(name)
                .map(|mode| &mode.classes)
                .ok_or_else(|| DeckError::UnknownMode(name.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::ConfigParse(
                "cards must list at least one card".to_string(),
            ));
        }
        Catalog::new(self.cards.clone())?;

        if self.search.deck_size == 0 {
            return Err(DeckError::ConfigParse(
                "search.deck_size must be greater than 0".to_string(),
            ));
        }
        if self.search.max_results == 0 {
            return Err(DeckError::ConfigParse(
                "search.max_results must be greater than 0".to_string(),
            ));
        }
        if let Some(mode) = &self.search.mode {
            if mode != DEFAULT_MODE && !self.modes.contains_key(mode) {
                return Err(DeckError::ConfigParse(format!(
                    "search.mode names an unknown mode: {mode}"
                )));
            }
        }

        validate_class_assignment("classes", &self.classes)?;
        for (name, mode) in &self.modes {
            if name == DEFAULT_MODE {
                return Err(DeckError::ConfigParse(format!(
                    "modes.{DEFAULT_MODE} is reserved for the top-level classes"
                )));
            }
            validate_class_assignment(&format!("modes.{name}.classes"), &mode.classes)?;
        }

        Ok(())
    }
}

fn validate_class_assignment(
    scope: &str,
    classes: &BTreeMap<String, ClassConfig>,
) -> Result<(), DeckError> {
    let mut seen = HashMap::<String, &str>::new();
    for (class_name, class) in classes {
        class.rule.validate(&format!("{scope}.{class_name}"))?;
        for label in &class.traits {
            let normalized = normalize_label(label);
            if normalized.is_empty() {
                return Err(DeckError::ConfigParse(format!(
                    "{scope}.{class_name}.traits entries must be non-empty trait labels"
                )));
            }
            if let Some(existing) = seen.get(&normalized) {
                if *existing == class_name.as_str() {
                    return Err(DeckError::ConfigParse(format!(
                        "{scope}.{class_name}.traits contains duplicate trait: {normalized}"
                    )));
                }
                return Err(DeckError::ConfigParse(format!(
                    "trait '{normalized}' cannot appear in both {scope}.{existing} and {scope}.{class_name}"
                )));
            }
            seen.insert(normalized, class_name.as_str());
        }
    }
    Ok(())
}
