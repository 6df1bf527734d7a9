/// Block parser for description text
use crate::ast::Node;
use crate::escape::escape_html;
use crate::inline::{is_line_terminator, parse_inline};
use crate::segment::{is_space, logical_lines};
use log::{debug, trace};

/// Classification of one logical line. Contents are still raw escaped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    Blank,
    Heading(String),
    HeadingWithBody { heading: String, body: String },
    UnorderedItem(String),
    OrderedItem(String),
    Paragraph(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

#[derive(Debug)]
struct OpenList {
    kind: ListKind,
    items: Vec<Node>,
}

impl OpenList {
    fn into_node(self) -> Node {
        match self.kind {
            ListKind::Unordered => Node::UnorderedList(self.items),
            ListKind::Ordered => Node::OrderedList(self.items),
        }
    }
}

/// Collects blocks in order. At most one list is open at a time, and it is
/// closed before any other block is appended.
#[derive(Debug, Default)]
struct BlockBuilder {
    blocks: Vec<Node>,
    open_list: Option<OpenList>,
}

impl BlockBuilder {
    fn close_list(&mut self) {
        if let Some(list) = self.open_list.take() {
            self.blocks.push(list.into_node());
        }
    }

    fn push_block(&mut self, block: Node) {
        self.close_list();
        self.blocks.push(block);
    }

    fn push_item(&mut self, kind: ListKind, item: Node) {
        if let Some(list) = self.open_list.as_mut().filter(|list| list.kind == kind) {
            list.items.push(item);
            return;
        }
        self.close_list();
        self.open_list = Some(OpenList {
            kind,
            items: vec![item],
        });
    }

    fn finish(mut self) -> Node {
        self.close_list();
        Node::Document(self.blocks)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parse raw description text into a `Node::Document`.
    pub fn parse(&self, input: &str) -> Node {
        let escaped = escape_html(input);
        let lines = logical_lines(&escaped);
        debug!("description split into {} logical lines", lines.len());

        let mut builder = BlockBuilder::default();
        for (index, line) in lines.iter().enumerate() {
            let line = classify_line(line);
            trace!("line {}: {:?}", index, line);

            match line {
                Line::Blank => builder.close_list(),
                Line::Heading(heading) => {
                    builder.push_block(Node::Heading(parse_inline(&heading)))
                }
                Line::HeadingWithBody { heading, body } => {
                    builder.push_block(Node::Heading(parse_inline(&heading)));
                    builder.push_block(Node::Paragraph(parse_inline(&body)));
                }
                Line::UnorderedItem(content) => {
                    builder.push_item(ListKind::Unordered, Node::ListItem(parse_inline(&content)))
                }
                Line::OrderedItem(content) => {
                    builder.push_item(ListKind::Ordered, Node::ListItem(parse_inline(&content)))
                }
                Line::Paragraph(text) => {
                    builder.push_block(Node::Paragraph(parse_inline(&text)))
                }
            }
        }

        let document = builder.finish();
        debug!("parsed {} blocks", document.blocks().len());
        document
    }
}

/// Classify a trimmed logical line. The first matching form wins.
pub(crate) fn classify_line(line: &str) -> Line {
    if line.is_empty() {
        return Line::Blank;
    }

    let chars: Vec<char> = line.chars().collect();

    if let Some(heading) = parse_heading_only(&chars) {
        return Line::Heading(heading);
    }
    if let Some((heading, body)) = parse_heading_with_body(&chars) {
        return Line::HeadingWithBody { heading, body };
    }
    if let Some(content) = parse_bullet_item(&chars) {
        return Line::UnorderedItem(content);
    }
    if let Some(content) = parse_ordered_item(&chars) {
        return Line::OrderedItem(content);
    }

    Line::Paragraph(line.to_string())
}

/// Text up to the first line terminator.
fn until_line_end(chars: &[char]) -> String {
    chars
        .iter()
        .take_while(|&&c| !is_line_terminator(c))
        .collect()
}

fn skip_whitespace(chars: &[char], start: usize) -> usize {
    start
        + chars[start..]
            .iter()
            .take_while(|&&c| is_space(c))
            .count()
}

/// The whole line is `**heading**`.
fn parse_heading_only(chars: &[char]) -> Option<String> {
    let len = chars.len();
    if len < 5 || !chars.starts_with(&['*', '*']) || !chars.ends_with(&['*', '*']) {
        return None;
    }

    let inner = &chars[2..len - 2];
    if inner.iter().any(|&c| is_line_terminator(c)) {
        return None;
    }
    Some(inner.iter().collect())
}

/// `**heading**` followed by whitespace and body text.
fn parse_heading_with_body(chars: &[char]) -> Option<(String, String)> {
    if !chars.starts_with(&['*', '*']) {
        return None;
    }

    // Shortest heading whose closing `**` is followed by whitespace
    let mut close = 3;
    while close + 2 < chars.len() {
        if is_line_terminator(chars[close - 1]) {
            return None;
        }
        if chars[close] == '*' && chars[close + 1] == '*' && is_space(chars[close + 2]) {
            let body_start = skip_whitespace(chars, close + 2);
            let body = until_line_end(&chars[body_start..]);
            if !body.is_empty() {
                let heading = chars[2..close].iter().collect();
                return Some((heading, body));
            }
        }
        close += 1;
    }

    None
}

/// `-` or `•`, whitespace, content.
fn parse_bullet_item(chars: &[char]) -> Option<String> {
    if !matches!(chars.first(), Some('-' | '•')) {
        return None;
    }
    if !chars.get(1).is_some_and(|&c| is_space(c)) {
        return None;
    }
    Some(until_line_end(&chars[skip_whitespace(chars, 1)..]))
}

/// ASCII digits, `.`, whitespace, content.
fn parse_ordered_item(chars: &[char]) -> Option<String> {
    let digits = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || chars.get(digits) != Some(&'.') {
        return None;
    }
    if !chars.get(digits + 1).is_some_and(|&c| is_space(c)) {
        return None;
    }
    Some(until_line_end(&chars[skip_whitespace(chars, digits + 1)..]))
}
