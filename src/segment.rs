//! Splitting of escaped description text into logical lines
//!
//! Descriptions are often stored as one long string. Section headings and list
//! markers that follow whitespace are treated as the start of a new line.

/// Re-segment `escaped` text and split it into trimmed logical lines.
///
/// Blank lines are kept; they close open lists during block parsing.
pub fn logical_lines(escaped: &str) -> Vec<String> {
    let text = break_before(escaped, match_section_heading);
    let text = break_before(&text, match_bullet_marker);
    let text = break_before(&text, match_ordered_marker);

    text.split('\n')
        .map(|line| line.trim_matches(is_space).to_string())
        .collect()
}

/// Whitespace as descriptions were written against: Unicode white space and
/// the byte order mark, but not NEL (U+0085).
pub(crate) fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Rewrite every whitespace run that is immediately followed by a pattern.
///
/// `pattern` sees the characters after the run and returns how many of them it
/// consumed together with the text that replaces run and match.
fn break_before(text: &str, pattern: fn(&[char]) -> Option<(usize, String)>) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        if !is_space(chars[i]) {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        let run_start = i;
        while i < chars.len() && is_space(chars[i]) {
            i += 1;
        }

        match pattern(&chars[i..]) {
            Some((consumed, replacement)) => {
                result.push_str(&replacement);
                i += consumed;
            }
            None => result.extend(&chars[run_start..i]),
        }
    }

    result
}

/// `**Heading**` with at least three non-asterisk characters inside.
fn match_section_heading(chars: &[char]) -> Option<(usize, String)> {
    if !chars.starts_with(&['*', '*']) {
        return None;
    }
    let len = chars[2..].iter().take_while(|&&c| c != '*').count();
    let close = 2 + len;
    if len < 3 || !chars[close..].starts_with(&['*', '*']) {
        return None;
    }

    let heading: String = chars[..close + 2].iter().collect();
    Some((close + 2, format!("\n\n{}", heading)))
}

/// `- ` bullet marker.
fn match_bullet_marker(chars: &[char]) -> Option<(usize, String)> {
    if chars.starts_with(&['-', ' ']) {
        Some((2, "\n- ".to_string()))
    } else {
        None
    }
}

/// `<digits>.` followed by a single whitespace character.
fn match_ordered_marker(chars: &[char]) -> Option<(usize, String)> {
    let digits = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || chars.get(digits) != Some(&'.') {
        return None;
    }
    if !chars.get(digits + 1).is_some_and(|&c| is_space(c)) {
        return None;
    }

    let number: String = chars[..digits].iter().collect();
    Some((digits + 2, format!("\n{}. ", number)))
}
