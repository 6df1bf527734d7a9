/// Document tree for formatted descriptions
use crate::escape::Escaped;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Document(Vec<Node>),
    // Block-level nodes
    Heading(Vec<Node>),
    Paragraph(Vec<Node>),
    UnorderedList(Vec<Node>), // Contains ListItem nodes
    OrderedList(Vec<Node>),   // Contains ListItem nodes
    ListItem(Vec<Node>),
    // Inline nodes
    Text(Escaped),
    Code(Escaped),
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    Link {
        destination: Escaped,
        children: Vec<Node>,
    },
}

impl Node {
    /// Top-level blocks of a document, or an empty slice for any other node.
    pub fn blocks(&self) -> &[Node] {
        match self {
            Node::Document(children) => children,
            _ => &[],
        }
    }
}
