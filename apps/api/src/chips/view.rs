// A small element tree the widget renders into. Event handlers are carried
// as data (`Binding`) and serialised as `data-action` attributes, so the
// page wires them through one delegated listener instead of inline script.

use crate::models::{Field, Item};

/// A user action attached to a rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    AddItem { field: Field, item: Item },
    RemoveItem { field: Field, id: i64 },
}

impl Binding {
    fn data_attrs(&self) -> [(&'static str, String); 3] {
        match self {
            Binding::AddItem { field, item } => [
                ("data-action", "add".to_string()),
                ("data-field", field.as_str().to_string()),
                ("data-id", item.id.to_string()),
            ],
            Binding::RemoveItem { field, id } => [
                ("data-action", "remove".to_string()),
                ("data-field", field.as_str().to_string()),
                ("data-id", id.to_string()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub binding: Option<Binding>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            binding: None,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn on_click(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    /// All bindings in document order.
    pub fn bindings(&self) -> Vec<&Binding> {
        let mut out = Vec::new();
        self.collect_bindings(&mut out);
        out
    }

    fn collect_bindings<'a>(&'a self, out: &mut Vec<&'a Binding>) {
        if let Node::Element(el) = self {
            if let Some(b) = &el.binding {
                out.push(b);
            }
            for child in &el.children {
                child.collect_bindings(out);
            }
        }
    }

    /// Concatenated text content, unescaped.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(s) => s.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(&escape_html(s)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                let binding_attrs = el.binding.iter().flat_map(Binding::data_attrs);
                for (name, value) in el.attrs.iter().cloned().chain(binding_attrs) {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(&value));
                    out.push('"');
                }
                out.push('>');
                if is_void(el.tag) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(el.tag);
                out.push('>');
            }
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "img" | "br")
}

/// Escapes the five HTML metacharacters for use in text and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
