//! `{{name}}` placeholder substitution.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Key for the acting user's display name.
pub const USER: &str = "user";
/// Key for the addressed character's display name.
pub const CHAR: &str = "char";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9]*)\}\}").expect("placeholder pattern is a valid regex")
});

/// Replaces every `{{identifier}}` token with its mapped value.
///
/// Unmapped identifiers become the empty string rather than staying
/// literal; hosts rely on unknown tokens disappearing.
#[must_use]
pub fn replace_tags(source: &str, replacements: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(source, |caps: &Captures<'_>| {
            replacements.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Builds the `user`/`char` mapping used for chat messages.
#[must_use]
pub fn participant_names(user: String, character: String) -> HashMap<String, String> {
    HashMap::from([(USER.to_owned(), user), (CHAR.to_owned(), character)])
}
