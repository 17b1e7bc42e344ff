use crate::types::report::{ScoredDeck, SecondPick};

/// Cards that share a best deck with `first`, most frequent first.
///
/// Ties keep the order in which cards were first seen across `best`.
pub fn candidate_second_cards(best: &[ScoredDeck], first: &str) -> Vec<SecondPick> {
    let mut picks: Vec<SecondPick> = Vec::new();
    for deck in best.iter().filter(|deck| deck.contains(first)) {
        for name in deck.cards.iter().filter(|name| name.as_str() != first) {
            match picks.iter_mut().find(|pick| &pick.name == name) {
                Some(pick) => pick.count += 1,
                None => picks.push(SecondPick {
                    name: name.clone(),
                    count: 1,
                }),
            }
        }
    }
    picks.sort_by(|a, b| b.count.cmp(&a.count));
    picks
}

pub fn decks_containing<'a>(best: &'a [ScoredDeck], names: &[&str]) -> Vec<&'a ScoredDeck> {
    best.iter()
        .filter(|deck| names.iter().all(|name| deck.contains(name)))
        .collect()
}
