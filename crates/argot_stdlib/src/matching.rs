//! Prefix matching for suggestion providers.

use argot_grammar::{Suggestions, SuggestionsBuilder};

/// Returns true if `candidate` should be offered for the typed `remaining`.
///
/// Matches when `remaining` is a prefix of `candidate`, or of any part of it
/// that follows a `.` or `_` word boundary, so `pos` matches `player_pos`.
#[must_use]
pub fn should_suggest(remaining: &str, candidate: &str) -> bool {
    let mut i = 0;
    while !candidate[i..].starts_with(remaining) {
        match candidate[i..].find(['.', '_']) {
            Some(offset) => i += offset + 1,
            None => return false,
        }
    }
    true
}

/// Suggests every candidate that [`should_suggest`] accepts for the
/// lowercased token being typed.
pub fn suggest_matching<I>(candidates: I, builder: SuggestionsBuilder) -> Suggestions
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let remaining = builder.remaining_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| should_suggest(&remaining, candidate.as_ref()))
        .fold(builder, |builder, candidate| builder.suggest(candidate.as_ref()))
        .build()
}
