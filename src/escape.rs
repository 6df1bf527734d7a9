/// HTML escaping for description text
use serde::Serialize;
use std::fmt;

/// Text that is safe to place in HTML element content or a quoted attribute.
///
/// A value can only be built from raw text by escaping it, or inside the crate
/// from fragments of text that was already escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Escaped(String);

impl Escaped {
    /// Escape raw text.
    pub fn new(raw: &str) -> Self {
        Escaped(escape_html(raw))
    }

    /// Wrap a fragment cut out of the output of [`escape_html`].
    pub(crate) fn from_escaped(fragment: String) -> Self {
        Escaped(fragment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace `&`, `<`, `>` and `"` with their entities in a single pass.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_html("5 < 10 & done"), "5 &lt; 10 &amp; done");
        assert_eq!(escape_html("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn does_not_double_escape_generated_entities() {
        assert_eq!(escape_html("<<script>>"), "&lt;&lt;script&gt;&gt;");
        // an entity already present in the input is escaped once, not decoded
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn leaves_other_text_alone() {
        assert_eq!(escape_html("it's **fine** • ok"), "it's **fine** • ok");
    }

    #[test]
    fn escaped_display_matches_escape_html() {
        let escaped = Escaped::new("a > b");
        assert_eq!(escaped.to_string(), "a &gt; b");
        assert_eq!(escaped.as_str(), "a &gt; b");
    }
}
