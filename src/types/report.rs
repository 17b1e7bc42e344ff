use serde::Serialize;

/// One trait that cleared its threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitAward {
    #[serde(rename = "trait")]
    pub label: String,
    pub points: u32,
    /// Catalog cards bearing the trait, in deck order.
    pub cards: Vec<String>,
    /// Whether the synthetic dummy card counted toward this trait.
    pub dummy: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckScore {
    pub total: u32,
    /// Sorted by trait label.
    pub breakdown: Vec<TraitAward>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredDeck {
    pub cards: Vec<String>,
    pub score: DeckScore,
}

impl ScoredDeck {
    pub fn contains(&self, name: &str) -> bool {
        self.cards.iter().any(|card| card == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// `None` only when cancellation hit before the first evaluation.
    pub max_score: Option<u32>,
    pub best: Vec<ScoredDeck>,
    /// All decks tied at `max_score`, including ones beyond the materialization cap.
    pub best_count: u64,
    pub evaluated: u64,
    pub total: u64,
    pub complete: bool,
}

impl SearchOutcome {
    pub fn truncated(&self) -> bool {
        self.best_count > self.best.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondPick {
    pub name: String,
    pub count: usize,
}
