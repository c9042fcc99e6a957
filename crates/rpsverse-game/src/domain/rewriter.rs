//! Outgoing message sanitation.
//!
//! Models occasionally echo internal asides ("System: ...") or the
//! scoreboard separator back into their reply. Everything from the first
//! such token onward is cut.

use std::borrow::Cow;

/// Keyword that opens an internal system aside.
pub const SYSTEM_MARKER: &str = "System:";

/// Punctuation that delimits out-of-band notes.
pub const NOTE_SEPARATOR: &str = "---";

/// Trims generated text at the earliest marker or separator.
#[derive(Debug, Clone)]
pub struct MessageRewriter {
    marker: String,
    separator: String,
}

impl Default for MessageRewriter {
    fn default() -> Self {
        Self::new(SYSTEM_MARKER, NOTE_SEPARATOR)
    }
}

impl MessageRewriter {
    /// A rewriter with custom tokens.
    #[must_use]
    pub fn new(marker: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            separator: separator.into(),
        }
    }

    /// Index at which the text should be cut, if any.
    #[must_use]
    pub fn cut_index(&self, text: &str) -> Option<usize> {
        match (text.find(&self.marker), text.find(&self.separator)) {
            (Some(marker), Some(separator)) => Some(marker.min(separator)),
            (marker, separator) => marker.or(separator),
        }
    }

    /// Cuts at the earliest token and trims the remainder. Text with no
    /// token is returned untouched, whitespace included.
    #[must_use]
    pub fn sanitize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.cut_index(text) {
            Some(index) => Cow::Borrowed(text[..index].trim()),
            None => Cow::Borrowed(text),
        }
    }

    /// Absent in, absent out.
    #[must_use]
    pub fn rewrite(&self, content: Option<&str>) -> Option<String> {
        content.map(|text| self.sanitize(text).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_before_separator_cuts_at_marker() {
        let text = "Done.System: a --- b";
        let rewriter = MessageRewriter::default();

        assert_eq!(rewriter.cut_index(text), Some(5));
        assert_eq!(rewriter.sanitize(text), "Done.");
    }

    #[test]
    fn test_separator_only_cuts_at_separator() {
        let text = "Hi ---\n{{user}}'s record: 1-0-0.";
        let rewriter = MessageRewriter::default();

        assert_eq!(rewriter.cut_index(text), Some(3));
        assert_eq!(rewriter.sanitize(text), "Hi");
    }

    #[test]
    fn test_separator_before_marker_cuts_at_separator() {
        let text = "  The duel ends. --- System: note";
        assert_eq!(MessageRewriter::default().sanitize(text), "The duel ends.");
    }

    #[test]
    fn test_marker_only_cuts_at_marker() {
        let text = "Bo grins.\n\nSystem: remember the score";
        assert_eq!(MessageRewriter::default().sanitize(text), "Bo grins.");
    }

    #[test]
    fn test_text_without_tokens_is_returned_untouched() {
        let text = "  Bo throws paper.  ";
        let sanitized = MessageRewriter::default().sanitize(text);

        assert_eq!(sanitized, text);
        assert!(matches!(sanitized, Cow::Borrowed(_)));
    }

    #[test]
    fn test_leading_token_yields_empty_text() {
        assert_eq!(MessageRewriter::default().sanitize("System: internal"), "");
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let text = "The system: works.";
        assert_eq!(MessageRewriter::default().cut_index(text), None);
    }

    #[test]
    fn test_rewrite_absent_content_is_absent() {
        assert_eq!(MessageRewriter::default().rewrite(None), None);
    }

    #[test]
    fn test_rewrite_present_content() {
        assert_eq!(
            MessageRewriter::default().rewrite(Some("Fine. --- extra")),
            Some("Fine.".to_owned())
        );
    }

    #[test]
    fn test_custom_tokens() {
        let rewriter = MessageRewriter::new("OOC:", "***");
        assert_eq!(rewriter.sanitize("Sure *** hidden"), "Sure");
        assert_eq!(rewriter.sanitize("Sure OOC: hidden"), "Sure");
        assert_eq!(rewriter.sanitize("Sure --- kept"), "Sure --- kept");
    }
}
