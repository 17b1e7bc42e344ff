pub mod combinations;
pub mod narrow;

use crate::error::{DeckError, Result};
use crate::score::score;
use crate::types::card::{Card, Catalog};
use crate::types::report::{ScoredDeck, SearchOutcome};
use crate::types::rules::TraitTable;
use combinations::{binomial, Combinations};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative stop signal, polled once per combination.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_cap(cap: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + cap),
        }
    }

    /// Stops every clone of this token; safe to call from a signal handler thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub deck_size: usize,
    pub pinned: Vec<String>,
    pub dummy_traits: Vec<String>,
    /// Cap on best decks kept in memory; ties beyond it are only counted.
    pub max_results: usize,
    /// Stop after this many evaluations and report a partial result.
    pub max_evaluations: Option<u64>,
}

impl SearchRequest {
    pub fn new(deck_size: usize) -> Self {
        Self {
            deck_size,
            pinned: Vec::new(),
            dummy_traits: Vec::new(),
            max_results: usize::MAX,
            max_evaluations: None,
        }
    }

    pub fn pin(mut self, name: &str) -> Self {
        self.pinned.push(name.to_string());
        self
    }

    pub fn dummy(mut self, label: &str) -> Self {
        self.dummy_traits.push(label.to_string());
        self
    }
}

/// Exhaustively searches every completion of the pinned cards up to `deck_size`.
pub fn optimize(
    catalog: &Catalog,
    table: &TraitTable,
    request: &SearchRequest,
    cancel: &CancelToken,
) -> Result<SearchOutcome> {
    let pinned = resolve_pins(catalog, request)?;
    let pinned_names = pinned
        .iter()
        .map(|card| card.name.as_str())
        .collect::<HashSet<_>>();
    let pool = catalog
        .cards()
        .iter()
        .filter(|card| !pinned_names.contains(card.name.as_str()))
        .collect::<Vec<_>>();
    let k = request.deck_size - pinned.len();

    tracing::info!(
        pool = pool.len(),
        pinned = pinned.len(),
        k,
        rules = table.len(),
        total = binomial(pool.len(), k),
        "search started"
    );
    let outcome = enumerate(&pinned, &pool, k, table, request, cancel)?;
    tracing::info!(
        evaluated = outcome.evaluated,
        complete = outcome.complete,
        max_score = ?outcome.max_score,
        best_count = outcome.best_count,
        "search finished"
    );
    Ok(outcome)
}

fn resolve_pins<'a>(catalog: &'a Catalog, request: &SearchRequest) -> Result<Vec<&'a Card>> {
    let mut seen = HashSet::new();
    let mut pinned = Vec::with_capacity(request.pinned.len());
    for name in &request.pinned {
        let card = catalog.resolve(name)?;
        if !seen.insert(card.name.as_str()) {
            return Err(DeckError::DuplicatePin(card.name.clone()));
        }
        pinned.push(card);
    }
    if pinned.len() > request.deck_size {
        return Err(DeckError::PinnedExceedsDeckSize {
            pinned: pinned.len(),
            size: request.deck_size,
        });
    }
    if request.deck_size > catalog.len() {
        return Err(DeckError::DeckSizeExceedsCatalog {
            size: request.deck_size,
            catalog: catalog.len(),
        });
    }
    Ok(pinned)
}

fn enumerate(
    pinned: &[&Card],
    pool: &[&Card],
    k: usize,
    table: &TraitTable,
    request: &SearchRequest,
    cancel: &CancelToken,
) -> Result<SearchOutcome> {
    let mut outcome = SearchOutcome {
        max_score: None,
        best: Vec::new(),
        best_count: 0,
        evaluated: 0,
        total: binomial(pool.len(), k),
        complete: true,
    };

    let mut deck: Vec<&Card> = Vec::with_capacity(pinned.len() + k);
    for combo in Combinations::new(pool.len(), k) {
        if cancel.is_cancelled()
            || request
                .max_evaluations
                .is_some_and(|budget| outcome.evaluated >= budget)
        {
            outcome.complete = false;
            break;
        }

        deck.clear();
        deck.extend_from_slice(pinned);
        deck.extend(combo.iter().map(|&i| pool[i]));
        let result = score(&deck, &request.dummy_traits, table);
        outcome.evaluated += 1;

        match outcome.max_score {
            Some(max) if result.total < max => continue,
            Some(max) if result.total == max => {}
            _ => {
                tracing::debug!(score = result.total, evaluated = outcome.evaluated, "new maximum");
                outcome.max_score = Some(result.total);
                outcome.best.clear();
                outcome.best_count = 0;
            }
        }
        outcome.best_count += 1;
        if outcome.best.len() < request.max_results {
            outcome.best.push(ScoredDeck {
                cards: deck.iter().map(|card| card.name.clone()).collect(),
                score: result,
            });
        }
    }

    if outcome.complete && outcome.evaluated == 0 {
        return Err(DeckError::NoSolution);
    }
    Ok(outcome)
}
