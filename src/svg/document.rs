//! Document tree: parse with quick-xml, mutate in place, write back.

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, Event},
};

use super::SvgError;
use super::namespace::{NamespaceScope, declared_prefix};

// ============================================================================
// Attribute
// ============================================================================

/// A single attribute with its namespace resolved at parse time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name as written (`serif:id`, `style`)
    pub name: String,
    /// Namespace URI of the prefix; `None` for unprefixed attributes
    pub namespace: Option<String>,
    /// Unescaped value
    pub value: String,
}

impl Attribute {
    /// Name without prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Check namespace URI and local name.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name() == local
    }
}

// ============================================================================
// Node / Element
// ============================================================================

/// Child of an element or top-level item of a document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Any non-element event, written back verbatim
    Other(Event<'static>),
}

/// An element with ordered attributes and children.
///
/// Attribute order is kept stable: replacing a value keeps its slot, new
/// attributes are appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified tag name as written
    pub name: String,
    /// Namespace URI of the tag
    pub namespace: Option<String>,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Written as `<x/>` when it still has no children
    self_closing: bool,
}

impl Element {
    /// Tag name without prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Value of an attribute by qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Value of an attribute by namespace URI and local name.
    pub fn attr_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.is(namespace, local))
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attr_ns(&self, namespace: &str, local: &str) -> bool {
        self.attrs.iter().any(|attr| attr.is(namespace, local))
    }

    /// Set an unprefixed attribute.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute {
                name: name.to_owned(),
                namespace: None,
                value,
            }),
        }
    }

    /// Set a namespaced attribute, written as `prefix:local`.
    ///
    /// An existing attribute in the same namespace keeps its slot and its
    /// original prefix.
    pub fn set_attr_ns(
        &mut self,
        prefix: &str,
        namespace: &str,
        local: &str,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match self.attrs.iter_mut().find(|attr| attr.is(namespace, local)) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute {
                name: format!("{prefix}:{local}"),
                namespace: Some(namespace.to_owned()),
                value,
            }),
        }
    }

    /// Remove an attribute by qualified name, returning its value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attrs.iter().position(|attr| attr.name == name)?;
        Some(self.attrs.remove(index).value)
    }

    /// Remove an attribute by namespace URI and local name.
    pub fn remove_attr_ns(&mut self, namespace: &str, local: &str) -> Option<String> {
        let index = self
            .attrs
            .iter()
            .position(|attr| attr.is(namespace, local))?;
        Some(self.attrs.remove(index).value)
    }

    /// Remove and return every attribute in `namespace`, in document order.
    pub fn take_attrs_ns(&mut self, namespace: &str) -> Vec<Attribute> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.attrs)
            .into_iter()
            .partition(|attr| attr.namespace.as_deref() == Some(namespace));
        self.attrs = kept;
        taken
    }

    /// Child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Other(_) => None,
        })
    }

    /// Mutable child elements, skipping text and comments.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Other(_) => None,
        })
    }

    /// Build an element from a start tag, opening a namespace frame.
    ///
    /// The caller closes the frame when the element ends.
    fn from_start(
        start: &BytesStart<'_>,
        scope: &mut NamespaceScope,
        self_closing: bool,
    ) -> Result<Self, SvgError> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_owned();

        let mut raw = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
            let value = attr.unescape_value()?.into_owned();
            raw.push((key, value));
        }

        scope.push(raw.iter().filter_map(|(key, value)| {
            declared_prefix(key).map(|prefix| (prefix.to_owned(), value.clone()))
        }));

        let namespace = scope.resolve_element(&name);
        let attrs = raw
            .into_iter()
            .map(|(name, value)| Attribute {
                namespace: scope.resolve_attribute(&name),
                name,
                value,
            })
            .collect();

        Ok(Self {
            name,
            namespace,
            attrs,
            children: Vec::new(),
            self_closing,
        })
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), SvgError> {
        let mut start = BytesStart::new(self.name.as_str());
        for attr in &self.attrs {
            start.push_attribute((attr.name.as_str(), attr.value.as_str()));
        }

        if self.self_closing && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

impl Node {
    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), SvgError> {
        match self {
            Node::Element(element) => element.write(writer),
            Node::Other(event) => {
                writer.write_event(event.clone())?;
                Ok(())
            }
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse a complete document.
    ///
    /// Namespace prefixes are resolved while reading, so later lookups
    /// compare URIs instead of prefixes.
    pub fn parse(xml: &str) -> Result<Self, SvgError> {
        let mut reader = Reader::from_str(xml);
        let mut scope = NamespaceScope::new();
        let mut open: Vec<Element> = Vec::new();
        let mut nodes = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    open.push(Element::from_start(&start, &mut scope, false)?);
                }
                Event::Empty(start) => {
                    let element = Element::from_start(&start, &mut scope, true)?;
                    scope.pop();
                    attach(&mut open, &mut nodes, Node::Element(element));
                }
                Event::End(end) => {
                    let element = open.pop().ok_or_else(|| {
                        SvgError::Unbalanced(String::from_utf8_lossy(end.name().as_ref()).into())
                    })?;
                    scope.pop();
                    attach(&mut open, &mut nodes, Node::Element(element));
                }
                Event::Eof => break,
                event => attach(&mut open, &mut nodes, Node::Other(event.into_owned())),
            }
        }

        if let Some(element) = open.last() {
            return Err(SvgError::Unclosed(element.name.clone()));
        }
        if !nodes.iter().any(|node| matches!(node, Node::Element(_))) {
            return Err(SvgError::NoRoot);
        }

        Ok(Self { nodes })
    }

    /// The document element.
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Other(_) => None,
        })
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Other(_) => None,
        })
    }

    /// Serialize back to XML text.
    pub fn to_xml(&self) -> Result<String, SvgError> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            node.write(&mut writer)?;
        }
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

/// Append a finished node to the innermost open element, or the top level.
fn attach(open: &mut [Element], nodes: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => nodes.push(node),
    }
}
