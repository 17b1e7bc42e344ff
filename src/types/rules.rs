use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a fixed-count rule compares the distinct card count against its threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    #[default]
    AtLeast,
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub count: u32,
    pub bonus: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdRule {
    Fixed {
        threshold: u32,
        bonus: u32,
        #[serde(default)]
        policy: CountPolicy,
    },
    /// Ascending steps; only the highest step reached pays.
    Stepped { steps: Vec<Step> },
}

impl ThresholdRule {
    #[cfg(test)]
    pub fn fixed(threshold: u32, bonus: u32, policy: CountPolicy) -> Self {
        ThresholdRule::Fixed {
            threshold,
            bonus,
            policy,
        }
    }

    #[cfg(test)]
    pub fn stepped(steps: &[(u32, u32)]) -> Self {
        ThresholdRule::Stepped {
            steps: steps
                .iter()
                .map(|&(count, bonus)| Step { count, bonus })
                .collect(),
        }
    }

    /// Points for `count` distinct contributing cards.
    pub fn award(&self, count: u32) -> u32 {
        match self {
            ThresholdRule::Fixed {
                threshold,
                bonus,
                policy,
            } => {
                let met = match policy {
                    CountPolicy::AtLeast => count >= *threshold,
                    CountPolicy::Exact => count == *threshold,
                };
                if met {
                    *bonus
                } else {
                    0
                }
            }
            ThresholdRule::Stepped { steps } => steps
                .iter()
                .take_while(|step| step.count <= count)
                .last()
                .map(|step| step.bonus)
                .unwrap_or(0),
        }
    }

    pub fn validate(&self, path: &str) -> Result<()> {
        match self {
            ThresholdRule::Fixed { threshold, .. } => {
                if *threshold == 0 {
                    return Err(DeckError::ConfigParse(format!(
                        "{path}.threshold must be greater than 0"
                    )));
                }
            }
            ThresholdRule::Stepped { steps } => {
                if steps.is_empty() {
                    return Err(DeckError::ConfigParse(format!(
                        "{path}.steps cannot be empty"
                    )));
                }
                if steps.iter().any(|step| step.count == 0) {
                    return Err(DeckError::ConfigParse(format!(
                        "{path}.steps counts must be greater than 0"
                    )));
                }
                if steps.windows(2).any(|pair| pair[0].count >= pair[1].count) {
                    return Err(DeckError::ConfigParse(format!(
                        "{path}.steps must be strictly ascending by count"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        match self {
            ThresholdRule::Fixed {
                threshold,
                bonus,
                policy: CountPolicy::AtLeast,
            } => format!(">={threshold} -> {bonus}"),
            ThresholdRule::Fixed {
                threshold,
                bonus,
                policy: CountPolicy::Exact,
            } => format!("=={threshold} -> {bonus}"),
            ThresholdRule::Stepped { steps } => steps
                .iter()
                .map(|step| format!("{}->{}", step.count, step.bonus))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Trait label to threshold rule. Labels without an entry never score.
#[derive(Debug, Clone, Default)]
pub struct TraitTable {
    rules: BTreeMap<String, ThresholdRule>,
}

impl TraitTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(mut self, label: &str, rule: ThresholdRule) -> Self {
        self.rules.insert(label.to_string(), rule);
        self
    }

    pub fn insert(&mut self, label: String, rule: ThresholdRule) -> Option<ThresholdRule> {
        self.rules.insert(label, rule)
    }

    pub fn rule(&self, label: &str) -> Option<&ThresholdRule> {
        self.rules.get(label)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
