/// Inline markup: code spans, bold, italic and bare URLs
///
/// The passes run in a fixed order over a sequence of pieces. A piece is either
/// a single character or an element produced by an earlier pass, so later passes
/// treat earlier elements as opaque. Code span contents are never looked at again.
use crate::ast::Node;
use crate::escape::Escaped;
use crate::segment::is_space;

#[derive(Debug)]
enum Piece {
    Char(char),
    Code(String),
    Strong(Vec<Piece>),
    Emphasis(Vec<Piece>),
}

/// Parse the inline content of one logical line.
///
/// `text` must already be HTML-escaped.
pub fn parse_inline(text: &str) -> Vec<Node> {
    let chars: Vec<char> = text.chars().collect();
    let pieces = code_spans(&chars);
    let pieces = strong_runs(pieces);
    let pieces = emphasis_runs(pieces);
    into_nodes(pieces)
}

/// Characters that end a line for the purposes of `.` in the markup patterns.
pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_char(pieces: &[Piece], i: usize, expected: char) -> bool {
    matches!(pieces.get(i), Some(Piece::Char(c)) if *c == expected)
}

fn code_spans(chars: &[char]) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '`' {
            // Empty spans don't count; the second backtick may open a span instead
            if let Some(len) = chars[i + 1..].iter().position(|&c| c == '`') {
                if len > 0 {
                    let code = chars[i + 1..i + 1 + len].iter().collect();
                    pieces.push(Piece::Code(code));
                    i += len + 2;
                    continue;
                }
            }
        }
        pieces.push(Piece::Char(chars[i]));
        i += 1;
    }

    pieces
}

fn strong_runs(pieces: Vec<Piece>) -> Vec<Piece> {
    let spans = find_strong_spans(&pieces);
    wrap_spans(pieces, &spans, 2, Piece::Strong)
}

/// `**x**` with the shortest non-empty `x` that stays on one line.
fn find_strong_spans(pieces: &[Piece]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i + 1 < pieces.len() {
        if is_char(pieces, i, '*') && is_char(pieces, i + 1, '*') {
            let mut close = None;
            let mut j = i + 3;
            while j + 1 < pieces.len() {
                if matches!(pieces[j - 1], Piece::Char(c) if is_line_terminator(c)) {
                    break;
                }
                if is_char(pieces, j, '*') && is_char(pieces, j + 1, '*') {
                    close = Some(j);
                    break;
                }
                j += 1;
            }
            if let Some(j) = close {
                spans.push((i, j));
                i = j + 2;
                continue;
            }
        }
        i += 1;
    }

    spans
}

fn emphasis_runs(pieces: Vec<Piece>) -> Vec<Piece> {
    let spans = find_emphasis_spans(&pieces);
    wrap_spans(pieces, &spans, 1, Piece::Emphasis)
        .into_iter()
        .map(emphasize_within)
        .collect()
}

/// Apply the italic pass inside bold content, which starts a fresh sequence.
fn emphasize_within(piece: Piece) -> Piece {
    match piece {
        Piece::Strong(children) => Piece::Strong(emphasis_runs(children)),
        Piece::Emphasis(children) => {
            Piece::Emphasis(children.into_iter().map(emphasize_within).collect())
        }
        other => other,
    }
}

/// `*x*` where `x` has no asterisks and neither delimiter touches another `*`.
fn find_emphasis_spans(pieces: &[Piece]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < pieces.len() {
        let opens = is_char(pieces, i, '*') && !(i > 0 && is_char(pieces, i - 1, '*'));
        if opens {
            let close = pieces[i + 1..]
                .iter()
                .position(holds_asterisk)
                .map(|k| i + 1 + k);
            if let Some(close) = close {
                // An asterisk inside an element blocks the run but cannot close it
                if is_char(pieces, close, '*')
                    && close > i + 1
                    && !is_char(pieces, close + 1, '*')
                {
                    spans.push((i, close));
                    i = close + 1;
                    continue;
                }
            }
        }
        i += 1;
    }

    spans
}

fn holds_asterisk(piece: &Piece) -> bool {
    match piece {
        Piece::Char(c) => *c == '*',
        Piece::Code(code) => code.contains('*'),
        Piece::Strong(children) | Piece::Emphasis(children) => children.iter().any(holds_asterisk),
    }
}

/// Replace each `(open, close)` span, whose delimiters are `delim` pieces wide,
/// with `wrap(content)`. Spans must be sorted and disjoint.
fn wrap_spans(
    pieces: Vec<Piece>,
    spans: &[(usize, usize)],
    delim: usize,
    wrap: fn(Vec<Piece>) -> Piece,
) -> Vec<Piece> {
    if spans.is_empty() {
        return pieces;
    }

    let mut out = Vec::with_capacity(pieces.len());
    let mut iter = pieces.into_iter();
    let mut pos = 0;

    for &(open, close) in spans {
        out.extend(iter.by_ref().take(open - pos));
        iter.by_ref().take(delim).for_each(drop);
        let content: Vec<Piece> = iter.by_ref().take(close - open - delim).collect();
        iter.by_ref().take(delim).for_each(drop);
        out.push(wrap(content));
        pos = close + delim;
    }
    out.extend(iter);

    out
}

fn into_nodes(pieces: Vec<Piece>) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut text = String::new();

    for piece in pieces {
        let node = match piece {
            Piece::Char(c) => {
                text.push(c);
                continue;
            }
            Piece::Code(code) => Node::Code(Escaped::from_escaped(code)),
            Piece::Strong(children) => Node::Strong(into_nodes(children)),
            Piece::Emphasis(children) => Node::Emphasis(into_nodes(children)),
        };
        link_urls(&std::mem::take(&mut text), &mut nodes);
        nodes.push(node);
    }
    link_urls(&text, &mut nodes);

    nodes
}

/// Characters that end a bare URL. Escaped text has no raw `<`, `>` or `"`,
/// and their entities start with `&`.
fn ends_url(c: char) -> bool {
    is_space(c) || matches!(c, ',' | '\'' | '"' | '&')
}

/// Length of the URL starting at `chars[start]`, if one starts there.
fn url_len(chars: &[char], start: usize) -> Option<usize> {
    let rest = &chars[start..];
    let scheme = if rest.starts_with(&['h', 't', 't', 'p', 's', ':', '/', '/']) {
        8
    } else if rest.starts_with(&['h', 't', 't', 'p', ':', '/', '/']) {
        7
    } else {
        return None;
    };

    let tail = rest[scheme..].iter().take_while(|&&c| !ends_url(c)).count();
    (tail > 0).then_some(scheme + tail)
}

/// Split a plain text run into `Text` and `Link` nodes.
fn link_urls(text: &str, nodes: &mut Vec<Node>) {
    if text.is_empty() {
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut plain_start = 0;
    let mut i = 0;

    while i < chars.len() {
        let Some(len) = url_len(&chars, i) else {
            i += 1;
            continue;
        };

        if plain_start < i {
            let plain: String = chars[plain_start..i].iter().collect();
            nodes.push(Node::Text(Escaped::from_escaped(plain)));
        }
        let url: String = chars[i..i + len].iter().collect();
        nodes.push(Node::Link {
            destination: Escaped::from_escaped(url.clone()),
            children: vec![Node::Text(Escaped::from_escaped(url))],
        });
        i += len;
        plain_start = i;
    }

    if plain_start < chars.len() {
        let plain: String = chars[plain_start..].iter().collect();
        nodes.push(Node::Text(Escaped::from_escaped(plain)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(Escaped::from_escaped(s.to_string()))
    }

    fn code(s: &str) -> Node {
        Node::Code(Escaped::from_escaped(s.to_string()))
    }

    fn link(url: &str) -> Node {
        Node::Link {
            destination: Escaped::from_escaped(url.to_string()),
            children: vec![text(url)],
        }
    }

    #[test]
    fn plain_text_is_one_node() {
        assert_eq!(parse_inline("just words"), vec![text("just words")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn code_span() {
        assert_eq!(
            parse_inline("run `make` now"),
            vec![text("run "), code("make"), text(" now")]
        );
    }

    #[test]
    fn empty_code_span_is_literal() {
        assert_eq!(parse_inline("``a`"), vec![text("`"), code("a")]);
    }

    #[test]
    fn code_contents_are_not_reinterpreted() {
        assert_eq!(parse_inline("`**x**`"), vec![code("**x**")]);
        assert_eq!(
            parse_inline("`curl https://x.io`"),
            vec![code("curl https://x.io")]
        );
    }

    #[test]
    fn bold_is_lazy() {
        assert_eq!(
            parse_inline("**a** and **b**"),
            vec![
                Node::Strong(vec![text("a")]),
                text(" and "),
                Node::Strong(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn bold_may_contain_code() {
        assert_eq!(
            parse_inline("**run `x` now**"),
            vec![Node::Strong(vec![text("run "), code("x"), text(" now")])]
        );
    }

    #[test]
    fn italic_requires_lone_asterisks() {
        assert_eq!(
            parse_inline("an *important* note"),
            vec![
                text("an "),
                Node::Emphasis(vec![text("important")]),
                text(" note")
            ]
        );
        assert_eq!(parse_inline("*a**b*"), vec![text("*a**b*")]);
    }

    #[test]
    fn stray_asterisks_stay_literal() {
        assert_eq!(parse_inline("5 * 3 = 15"), vec![text("5 * 3 = 15")]);
        assert_eq!(parse_inline("****"), vec![text("****")]);
    }

    #[test]
    fn italic_inside_bold() {
        assert_eq!(
            parse_inline("**bold *and* italic**"),
            vec![Node::Strong(vec![
                text("bold "),
                Node::Emphasis(vec![text("and")]),
                text(" italic"),
            ])]
        );
    }

    #[test]
    fn italic_spanning_bold() {
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![Node::Emphasis(vec![
                text("a "),
                Node::Strong(vec![text("b")]),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn asterisk_inside_bold_blocks_italic() {
        assert_eq!(
            parse_inline("*1a ****Setup** b*x *2"),
            vec![
                text("*1a "),
                Node::Strong(vec![text("**Setup")]),
                text(" b"),
                Node::Emphasis(vec![text("x ")]),
                text("2"),
            ]
        );
    }

    #[test]
    fn asterisk_inside_code_blocks_italic() {
        assert_eq!(
            parse_inline("*see `a*b` here*"),
            vec![text("*see "), code("a*b"), text(" here*")]
        );
    }

    #[test]
    fn urls_stop_at_terminators() {
        assert_eq!(
            parse_inline("see https://example.com/a,b for info"),
            vec![
                text("see "),
                link("https://example.com/a"),
                text(",b for info")
            ]
        );
        assert_eq!(
            parse_inline("http://a.io/?x=1&amp;y=2"),
            vec![link("http://a.io/?x=1"), text("&amp;y=2")]
        );
    }

    #[test]
    fn scheme_without_body_is_not_a_link() {
        assert_eq!(parse_inline("https:// x"), vec![text("https:// x")]);
    }

    #[test]
    fn url_ends_at_element_boundary() {
        assert_eq!(
            parse_inline("https://a.com/*x*"),
            vec![link("https://a.com/"), Node::Emphasis(vec![text("x")])]
        );
    }

    #[test]
    fn url_inside_bold() {
        assert_eq!(
            parse_inline("**go https://x.io**"),
            vec![Node::Strong(vec![text("go "), link("https://x.io")])]
        );
    }
}
