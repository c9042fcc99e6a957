//! Display-name lookup.

use std::collections::HashMap;

/// Resolves participant identifiers to display names.
pub trait NameDirectory: Send + Sync {
    /// Returns the display name for `id`, or `None` if unknown.
    fn display_name(&self, id: &str) -> Option<String>;

    /// Resolves an optional identifier, yielding an empty name when the
    /// identifier is absent or unknown.
    fn name_or_empty(&self, id: Option<&str>) -> String {
        id.and_then(|id| self.display_name(id)).unwrap_or_default()
    }
}

impl NameDirectory for HashMap<String, String> {
    fn display_name(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}
