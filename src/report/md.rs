use super::OptimizeReport;
use crate::types::card::Catalog;
use crate::types::config::ClassConfig;
use crate::types::report::{DeckScore, ScoredDeck, SecondPick, TraitAward};
use crate::types::rules::TraitTable;
use std::collections::BTreeMap;

pub fn to_markdown(report: &OptimizeReport, display_limit: usize) -> String {
    let outcome = &report.outcome;
    let mut output = String::new();
    output.push_str("# Deck Optimization\n\n");
    output.push_str(&format!(
        "- mode: {}\n- deck size: {}\n- pinned: {}\n- dummy traits: {}\n\n",
        report.mode,
        report.deck_size,
        join_or_none(&report.pinned),
        join_or_none(&report.dummy_traits)
    ));

    match outcome.max_score {
        Some(max) => output.push_str(&format!("Max score: {max}\n")),
        None => output.push_str("Max score: none (no deck evaluated)\n"),
    }
    output.push_str(&format!(
        "Evaluated {} of {} combinations\n\n",
        outcome.evaluated, outcome.total
    ));
    if !outcome.complete {
        output.push_str("> search stopped early: results are partial\n\n");
    }

    output.push_str(&format!("## Best Decks ({})\n\n", outcome.best_count));
    if outcome.best.is_empty() {
        output.push_str("- none\n");
    } else if outcome.best_count > display_limit as u64 {
        output.push_str(&format!(
            "{} decks tie at the max score; narrow the search (pin cards) to list them.\n",
            outcome.best_count
        ));
    } else {
        for deck in &outcome.best {
            output.push_str(&deck_line(deck));
        }
        if outcome.truncated() {
            output.push_str(&format!(
                "\n... {} more not kept\n",
                outcome.best_count - outcome.best.len() as u64
            ));
        }
    }

    output
}

pub fn deck_line(deck: &ScoredDeck) -> String {
    let mut line = format!("- {} ({})\n", deck.cards.join(", "), deck.score.total);
    for award in &deck.score.breakdown {
        line.push_str(&format!(
            "  - {}: +{}{}\n",
            award.label,
            award.points,
            contributors(award)
        ));
    }
    line
}

fn contributors(award: &TraitAward) -> String {
    let mut names = award.cards.clone();
    if award.dummy {
        names.push("<dummy>".to_string());
    }
    format!(" [{}]", names.join(", "))
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

pub fn score_text(cards: &[String], score: &DeckScore) -> String {
    let mut output = format!("Score: {}\n", score.total);
    output.push_str(&format!("Deck: {}\n", cards.join(", ")));
    if score.breakdown.is_empty() {
        output.push_str("- no trait reached its threshold\n");
    }
    for award in &score.breakdown {
        output.push_str(&format!(
            "- {}: +{}{}\n",
            award.label,
            award.points,
            contributors(award)
        ));
    }
    output
}

pub fn catalog_text(
    catalog: &Catalog,
    mode: &str,
    modes: &[&str],
    classes: &BTreeMap<String, ClassConfig>,
    table: &TraitTable,
) -> String {
    let mut output = format!("Catalog ({} cards, {})\n", catalog.len(), catalog.fingerprint());
    for card in catalog.cards() {
        output.push_str(&format!("- {}: {}\n", card.name, card.traits.join(", ")));
    }
    output.push_str(&format!("\nClasses (mode {mode})\n"));
    if classes.is_empty() {
        output.push_str("- none\n");
    }
    for (name, class) in classes {
        output.push_str(&format!(
            "- {} [{}]: {}\n",
            name,
            class.rule.describe(),
            class.traits.join(", ")
        ));
    }
    let unscored = catalog
        .trait_labels()
        .into_iter()
        .filter(|label| table.rule(label).is_none())
        .collect::<Vec<_>>();
    if !unscored.is_empty() {
        output.push_str(&format!("\nUnscored traits: {}\n", unscored.join(", ")));
    }
    output.push_str(&format!("\nModes: {}\n", modes.join(", ")));
    output
}

pub fn second_picks_text(first: &str, picks: &[SecondPick]) -> String {
    let mut output = format!("Second-card candidates with {first}\n");
    if picks.is_empty() {
        output.push_str("- none\n");
    }
    for pick in picks {
        output.push_str(&format!("- {} ({})\n", pick.name, pick.count));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::SearchOutcome;

    fn report(decks: usize, complete: bool) -> OptimizeReport {
        let best = (0..decks)
            .map(|i| ScoredDeck {
                cards: vec!["A".to_string(), format!("C{i}")],
                score: DeckScore {
                    total: 2,
                    breakdown: vec![TraitAward {
                        label: "x".to_string(),
                        points: 2,
                        cards: vec!["A".to_string()],
                        dummy: true,
                    }],
                },
            })
            .collect::<Vec<_>>();
        OptimizeReport {
            generated_at: String::new(),
            catalog_digest: String::new(),
            mode: "default".to_string(),
            deck_size: 2,
            pinned: vec!["A".to_string()],
            dummy_traits: vec!["x".to_string()],
            outcome: SearchOutcome {
                max_score: Some(2),
                best_count: decks as u64,
                best,
                evaluated: 10,
                total: 10,
                complete,
            },
        }
    }

    #[test]
    fn markdown_lists_decks_within_limit() {
        let rendered = to_markdown(&report(2, true), 5);
        assert!(rendered.contains("# Deck Optimization"));
        assert!(rendered.contains("Max score: 2"));
        assert!(rendered.contains("- A, C1 (2)"));
        assert!(rendered.contains("x: +2 [A, <dummy>]"));
        assert!(!rendered.contains("partial"));
    }

    #[test]
    fn markdown_summarizes_when_over_limit() {
        let rendered = to_markdown(&report(4, true), 3);
        assert!(rendered.contains("4 decks tie at the max score"));
        assert!(!rendered.contains("- A, C0"));
    }

    #[test]
    fn markdown_summarizes_large_tie_set_beyond_kept_decks() {
        let mut capped = report(2, true);
        capped.outcome.best_count = 500;
        let rendered = to_markdown(&capped, 50);
        assert!(rendered.contains("## Best Decks (500)"));
        assert!(rendered.contains("500 decks tie at the max score"));
        assert!(!rendered.contains("- A, C0"));
    }

    #[test]
    fn markdown_flags_partial_results() {
        let rendered = to_markdown(&report(1, false), 3);
        assert!(rendered.contains("results are partial"));
    }

    #[test]
    fn catalog_text_lists_unscored_traits_and_modes() {
        let cfg: crate::types::config::DeckConfig = toml::from_str(
            r#"
[[cards]]
name = "A"
traits = ["x", "y"]

[classes.pair]
kind = "fixed"
threshold = 2
bonus = 2
traits = ["x"]
"#,
        )
        .expect("config should parse");
        let catalog = cfg.catalog().expect("catalog should build");
        let table = cfg.trait_table(None).expect("default mode should resolve");
        let rendered = catalog_text(&catalog, "default", &cfg.mode_names(), &cfg.classes, &table);
        assert!(rendered.contains("- A: x, y"));
        assert!(rendered.contains("- pair [>=2 -> 2]: x"));
        assert!(rendered.contains("Unscored traits: y"));
        assert!(rendered.contains("Modes: default"));
    }

    #[test]
    fn score_text_notes_empty_breakdown() {
        let rendered = score_text(&["A".to_string()], &DeckScore::default());
        assert!(rendered.contains("Score: 0"));
        assert!(rendered.contains("no trait reached its threshold"));
    }
}
