//! Integration tests for suggestion matching helpers

use argot_grammar::{Suggestion, SuggestionsBuilder};
use argot_stdlib::{should_suggest, suggest_matching};
use proptest::prelude::*;

#[test]
fn matches_after_word_boundaries() {
    let candidates = ["minecraft:stone", "player.pos", "player_name", "pos"];
    let builder = SuggestionsBuilder::new("get pos", 4);
    let suggestions = suggest_matching(candidates, builder);
    let texts: Vec<_> = suggestions.iter().map(Suggestion::text).collect();
    assert_eq!(texts, ["player.pos"]);
}

#[test]
fn empty_token_offers_everything() {
    let builder = SuggestionsBuilder::new("get ", 4);
    assert_eq!(suggest_matching(["b", "a", "c"], builder).len(), 3);
}

proptest! {
    #[test]
    fn matching_candidates_extend_the_token(
        candidate in "[a-z]{1,6}([._][a-z]{1,6}){0,2}",
        token in "[a-z]{0,3}",
    ) {
        if should_suggest(&token, &candidate) {
            let dotted = format!(".{token}");
            let underscored = format!("_{token}");
            prop_assert!(
                candidate.starts_with(&token)
                    || candidate.contains(&dotted)
                    || candidate.contains(&underscored)
            );
        }
    }
}
