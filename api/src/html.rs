//! A small, lenient HTML tree builder.
//!
//! Good enough for the server-rendered vimgolf.com pages: tags, attributes,
//! text, comments and void elements. Unclosed elements are closed by the
//! nearest matching end tag of an ancestor, stray end tags are ignored.

use crate::util::decode_entities;

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    children: Vec<usize>,
}

/// A parsed page. Nodes are stored in document order.
#[derive(Debug)]
pub struct Html {
    nodes: Vec<Node>,
    roots: Vec<usize>,
}

/// Borrowed handle to one node of an [`Html`] tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    html: &'a Html,
    idx: usize,
}

impl Html {
    pub fn parse(src: &str) -> Self {
        let mut builder = Builder {
            html: Html {
                nodes: Vec::new(),
                roots: Vec::new(),
            },
            stack: Vec::new(),
        };
        let mut cursor = Cursor { src, pos: 0 };

        while !cursor.is_done() {
            if cursor.eat("<!--") {
                cursor.skip_past("-->");
            } else if cursor.eat("</") {
                let name = cursor.take_while(|c| !c.is_whitespace() && c != '>');
                cursor.skip_past(">");
                builder.close(&name.to_ascii_lowercase());
            } else if cursor.starts_with_tag() {
                cursor.bump();
                let (tag, attrs, self_closing) = parse_tag(&mut cursor);
                let raw_text = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
                let void = self_closing || VOID_ELEMENTS.contains(&tag.as_str());
                builder.open(tag.clone(), attrs, void);
                if raw_text && !void {
                    let text = cursor.take_until_ci(&format!("</{}", tag));
                    builder.text(text.to_string());
                }
            } else if cursor.eat("<!") || cursor.eat("<?") {
                cursor.skip_past(">");
            } else {
                // a `<` that does not start markup is text
                let first = cursor.bump().unwrap_or_default();
                let mut text = first.to_string();
                text.push_str(cursor.take_while(|c| c != '<'));
                builder.text(decode_entities(&text));
            }
        }

        builder.html
    }

    fn node(&self, idx: usize) -> NodeRef<'_> {
        NodeRef { html: self, idx }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len())
            .map(|idx| self.node(idx))
            .filter(|node| node.is_element())
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeRef<'_>> {
        self.elements().find(|node| node.attr("id") == Some(id))
    }

    pub fn elements_by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = NodeRef<'a>> {
        self.elements().filter(move |node| node.has_class(class))
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.roots.iter().map(|&idx| self.node(idx))
    }
}

impl<'a> NodeRef<'a> {
    fn inner(&self) -> &'a Node {
        &self.html.nodes[self.idx]
    }

    pub fn is_element(&self) -> bool {
        matches!(self.inner().kind, NodeKind::Element { .. })
    }

    /// Tag name in lowercase, `None` for text nodes.
    pub fn tag(&self) -> Option<&'a str> {
        match &self.inner().kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match &self.inner().kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Text of a text node, `None` for elements.
    pub fn own_text(&self) -> Option<&'a str> {
        match &self.inner().kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let html = self.html;
        self.inner()
            .children
            .iter()
            .map(move |&idx| NodeRef { html, idx })
    }

    /// Child elements with the given tag.
    pub fn child_elements(self, tag: &'a str) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(move |child| child.is(tag))
    }

    /// Descendants in document order, not including `self`.
    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef<'a>> = self.children().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut children: Vec<NodeRef<'a>> = node.children().collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    pub fn find(&self, pred: impl Fn(&NodeRef<'a>) -> bool) -> Option<NodeRef<'a>> {
        self.descendants().into_iter().find(|node| pred(node))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        if let Some(text) = self.own_text() {
            return text.to_string();
        }
        self.descendants()
            .iter()
            .filter_map(NodeRef::own_text)
            .collect()
    }
}

struct Builder {
    html: Html,
    stack: Vec<usize>,
}

impl Builder {
    fn push(&mut self, node: Node) -> usize {
        let idx = self.html.nodes.len();
        self.html.nodes.push(node);
        match self.stack.last() {
            Some(&parent) => self.html.nodes[parent].children.push(idx),
            None => self.html.roots.push(idx),
        }
        idx
    }

    fn open(&mut self, tag: String, attrs: Vec<(String, String)>, void: bool) {
        let idx = self.push(Node {
            kind: NodeKind::Element { tag, attrs },
            children: Vec::new(),
        });
        if !void {
            self.stack.push(idx);
        }
    }

    fn close(&mut self, tag: &str) {
        let open = self.stack.iter().rposition(|&idx| {
            matches!(&self.html.nodes[idx].kind, NodeKind::Element { tag: t, .. } if t == tag)
        });
        if let Some(pos) = open {
            self.stack.truncate(pos);
        }
    }

    fn text(&mut self, text: String) {
        if !text.is_empty() {
            self.push(Node {
                kind: NodeKind::Text(text),
                children: Vec::new(),
            });
        }
    }
}

/// Parse the rest of a start tag after `<`. Returns the lowercase tag name,
/// the attributes and whether the tag closed itself with `/>`.
fn parse_tag(cursor: &mut Cursor<'_>) -> (String, Vec<(String, String)>, bool) {
    let tag = cursor
        .take_while(|c| !c.is_whitespace() && c != '>' && c != '/')
        .to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        cursor.take_while(char::is_whitespace);
        if cursor.is_done() || cursor.eat(">") {
            return (tag, attrs, false);
        }
        if cursor.eat("/>") {
            return (tag, attrs, true);
        }
        if cursor.eat("/") {
            continue;
        }

        let name = cursor
            .take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
            .to_ascii_lowercase();
        if name.is_empty() {
            cursor.bump();
            continue;
        }
        cursor.take_while(char::is_whitespace);
        let value = if cursor.eat("=") {
            cursor.take_while(char::is_whitespace);
            match cursor.peek() {
                Some(quote @ ('"' | '\'')) => {
                    cursor.bump();
                    let value = cursor.take_while(|c| c != quote);
                    cursor.bump();
                    value
                }
                _ => cursor.take_while(|c| !c.is_whitespace() && c != '>'),
            }
        } else {
            ""
        };
        attrs.push((name, decode_entities(value)));
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn starts_with_tag(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(rest.len(), |(idx, _)| idx);
        self.pos += len;
        &rest[..len]
    }

    /// Move past the next `delim`, or to the end.
    fn skip_past(&mut self, delim: &str) {
        match self.rest().find(delim) {
            Some(idx) => self.pos += idx + delim.len(),
            None => self.pos = self.src.len(),
        }
    }

    /// Text up to (not including) `delim`, compared ASCII case-insensitively.
    fn take_until_ci(&mut self, delim: &str) -> &'a str {
        let rest = self.rest();
        let end = rest
            .to_ascii_lowercase()
            .find(&delim.to_ascii_lowercase())
            .unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }
}
