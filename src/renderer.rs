/// HTML renderer for description documents
use crate::ast::Node;
use crate::escape::escape_html;
use crate::options::Styles;

pub struct HtmlRenderer {
    styles: Styles,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        HtmlRenderer {
            styles: Styles::default(),
        }
    }

    pub fn with_styles(styles: Styles) -> Self {
        HtmlRenderer { styles }
    }

    pub fn render(&self, node: &Node) -> String {
        self.render_node(node)
    }

    fn render_children(&self, children: &[Node]) -> String {
        children.iter().map(|child| self.render_node(child)).collect()
    }

    fn render_node(&self, node: &Node) -> String {
        match node {
            Node::Document(children) => self.render_children(children),
            Node::Heading(children) => format!(
                "<h4{}>{}</h4>",
                style_attr(&self.styles.heading),
                self.render_children(children)
            ),
            Node::Paragraph(children) => format!(
                "<p{}>{}</p>",
                style_attr(&self.styles.paragraph),
                self.render_children(children)
            ),
            Node::UnorderedList(children) => format!(
                "<ul{}>{}</ul>",
                style_attr(&self.styles.list),
                self.render_children(children)
            ),
            Node::OrderedList(children) => format!(
                "<ol{}>{}</ol>",
                style_attr(&self.styles.list),
                self.render_children(children)
            ),
            Node::ListItem(children) => format!(
                "<li{}>{}</li>",
                style_attr(&self.styles.list_item),
                self.render_children(children)
            ),
            // Already escaped
            Node::Text(text) => text.to_string(),
            Node::Code(code) => format!("<code{}>{}</code>", style_attr(&self.styles.code), code),
            Node::Strong(children) => format!("<strong>{}</strong>", self.render_children(children)),
            Node::Emphasis(children) => format!("<em>{}</em>", self.render_children(children)),
            Node::Link {
                destination,
                children,
            } => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"{}>{}</a>",
                destination,
                style_attr(&self.styles.link),
                self.render_children(children)
            ),
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn style_attr(style: &Option<String>) -> String {
    match style.as_deref() {
        Some(css) if !css.is_empty() => format!(" style=\"{}\"", escape_html(css)),
        _ => String::new(),
    }
}
