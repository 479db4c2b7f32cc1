use intent_relay::scoring::{normalize, rank, RankedResult, RawModelResponse};
use intent_relay::RelayError;
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::json;

/// A small pool of scores so that ties are common; includes values outside [0, 1].
fn score_strategy() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![-2.5, 0.0, 0.1, 0.25, 0.5, 0.87, 1.0, 3.75])
}

/// Prefix plus a name that may itself contain a colon.
fn prefix_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["in", "intent", "in:nested"])
}

/// Labels carry their input position in the name so order can be checked after ranking.
fn label_name(prefix: &str, position: usize) -> String {
    format!("{prefix}:label_{position}")
}

fn position_of(name: &str) -> usize {
    name.rsplit("label_").next().and_then(|p| p.parse().ok()).expect("generated name")
}

fn check_ranking(ranked: &RankedResult, scores: &[f64]) -> Result<(), TestCaseError> {
    prop_assert_eq!(ranked.all.len(), scores.len());
    prop_assert_eq!(&ranked.top, &ranked.all[0]);

    for pair in ranked.all.windows(2) {
        prop_assert!(pair[0].confidence >= pair[1].confidence);
        if pair[0].confidence == pair[1].confidence {
            prop_assert!(position_of(&pair[0].name) < position_of(&pair[1].name));
        }
    }

    let mut positions: Vec<usize> = ranked.all.iter().map(|l| position_of(&l.name)).collect();
    positions.sort_unstable();
    prop_assert_eq!(positions, (0..scores.len()).collect::<Vec<_>>());

    for label in &ranked.all {
        prop_assert_eq!(label.confidence, scores[position_of(&label.name)]);
    }
    Ok(())
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn text_blob_ranks_descending_and_stable(
        entries in prop::collection::vec((prefix_strategy(), score_strategy()), 1..24),
        blank_every in 2_usize..6
    ) {
        let mut blob = String::new();
        for (position, (prefix, score)) in entries.iter().enumerate() {
            if position % blank_every == 0 {
                blob.push('\n');
            }
            blob.push_str(&format!("{}:{}\n", label_name(prefix, position), score));
        }

        let labels = normalize(&RawModelResponse::TextBlob(blob)).expect("valid blob");
        let ranked = rank("q", labels).expect("non-empty");

        let scores: Vec<f64> = entries.iter().map(|(_, s)| *s).collect();
        check_ranking(&ranked, &scores)?;
        for label in &ranked.all {
            let prefix = entries[position_of(&label.name)].0;
            prop_assert!(label.name.starts_with(prefix));
        }
    }

    #[test]
    fn json_ranking_keeps_every_entry(
        scores in prop::collection::vec(score_strategy(), 1..24)
    ) {
        let ranking: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(position, score)| json!({"name": label_name("intent", position), "confidence": score}))
            .collect();
        let body = json!({"text": "q", "intent_ranking": ranking, "entities": []});

        let labels = normalize(&RawModelResponse::JsonRanking(body)).expect("valid ranking");
        let ranked = rank("q", labels).expect("non-empty");
        check_ranking(&ranked, &scores)?;
    }

    #[test]
    fn unparseable_score_is_rejected(
        good in prop::collection::vec(score_strategy(), 0..8),
        junk in "[a-z]{1,8}"
    ) {
        prop_assume!(junk.parse::<f64>().is_err());
        let mut blob: String = good
            .iter()
            .enumerate()
            .map(|(position, score)| format!("{}:{}\n", label_name("in", position), score))
            .collect();
        blob.push_str(&format!("in:broken:{junk}\n"));

        let result = normalize(&RawModelResponse::TextBlob(blob));
        prop_assert!(matches!(result, Err(RelayError::MalformedResponse(_))));
    }
}

#[test]
fn empty_ranking_never_yields_a_prediction() {
    for raw in [
        RawModelResponse::TextBlob("\n\n".to_string()),
        RawModelResponse::JsonRanking(json!({"intent_ranking": []})),
    ] {
        let labels = normalize(&raw).unwrap();
        assert!(matches!(rank("q", labels), Err(RelayError::EmptyResult)));
    }
}
