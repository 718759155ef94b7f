//! XML namespaces used by Affinity Designer and Shaper Origin files.

use super::Element;

/// Default namespace of SVG elements
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// Affinity Designer private namespace (`serif:id` carries the layer name)
pub const SERIF_NS: &str = "http://www.serif.com/";
/// Shaper Origin attribute vocabulary
pub const SHAPER_NS: &str = "http://www.shapertools.com/namespaces/shaper";
/// Prefix Shaper Studio expects for [`SHAPER_NS`]
pub const SHAPER_PREFIX: &str = "shaper";
/// Implicitly bound to the `xml` prefix
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
/// Namespace of `xmlns` / `xmlns:*` declarations
pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";

/// Stack of in-scope prefix bindings while reading a document.
///
/// One frame per open element. The default namespace is stored under the
/// empty prefix; `xmlns=""` undeclares it.
#[derive(Debug, Default)]
pub struct NamespaceScope {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a frame with the declarations of one element.
    pub fn push<I>(&mut self, declarations: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.frames.push(declarations.into_iter().collect());
    }

    /// Close the innermost frame.
    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Namespace URI bound to `prefix` (`""` = default namespace).
    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        match prefix {
            "xml" => return Some(XML_NS),
            "xmlns" => return Some(XMLNS_NS),
            _ => {}
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(bound, _)| bound == prefix)
            .map(|(_, uri)| uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    /// Resolve an element name; unprefixed names take the default namespace.
    pub fn resolve_element(&self, qname: &str) -> Option<String> {
        let prefix = qname.split_once(':').map_or("", |(prefix, _)| prefix);
        self.lookup(prefix).map(str::to_owned)
    }

    /// Resolve an attribute name; unprefixed attributes have no namespace.
    pub fn resolve_attribute(&self, qname: &str) -> Option<String> {
        if qname == "xmlns" {
            return Some(XMLNS_NS.to_owned());
        }
        let (prefix, _) = qname.split_once(':')?;
        self.lookup(prefix).map(str::to_owned)
    }
}

/// Prefix declared by an attribute, if it is a namespace declaration.
///
/// `xmlns` declares the default namespace (`""`), `xmlns:p` declares `p`.
pub fn declared_prefix(attr_name: &str) -> Option<&str> {
    if attr_name == "xmlns" {
        return Some("");
    }
    attr_name.strip_prefix("xmlns:")
}

/// How the converter treats an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<svg>`: receives the `xmlns:shaper` declaration
    Root,
    /// `<g>`: its layer name is inherited by descendants
    Group,
    /// Anything else
    Drawable,
}

impl ElementKind {
    /// Classify an element by its namespace-resolved tag.
    ///
    /// Unprefixed elements without any namespace binding count as SVG, so
    /// files missing `xmlns="http://www.w3.org/2000/svg"` still convert.
    pub fn of(element: &Element) -> Self {
        let in_svg = match element.namespace.as_deref() {
            Some(ns) => ns == SVG_NS,
            None => !element.name.contains(':'),
        };
        if !in_svg {
            return Self::Drawable;
        }
        match element.local_name() {
            "svg" => Self::Root,
            "g" => Self::Group,
            _ => Self::Drawable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::Document;

    fn scope_with(decls: &[(&str, &str)]) -> NamespaceScope {
        let mut scope = NamespaceScope::new();
        scope.push(
            decls
                .iter()
                .map(|(p, u)| ((*p).to_string(), (*u).to_string())),
        );
        scope
    }

    #[test]
    fn test_resolve_element_default_and_prefixed() {
        let scope = scope_with(&[("", SVG_NS), ("serif", SERIF_NS)]);
        assert_eq!(scope.resolve_element("path").as_deref(), Some(SVG_NS));
        assert_eq!(scope.resolve_element("serif:x").as_deref(), Some(SERIF_NS));
        assert_eq!(scope.resolve_element("other:x"), None);
    }

    #[test]
    fn test_resolve_attribute_ignores_default_namespace() {
        let scope = scope_with(&[("", SVG_NS), ("serif", SERIF_NS)]);
        assert_eq!(scope.resolve_attribute("style"), None);
        assert_eq!(scope.resolve_attribute("serif:id").as_deref(), Some(SERIF_NS));
        assert_eq!(scope.resolve_attribute("xmlns").as_deref(), Some(XMLNS_NS));
        assert_eq!(scope.resolve_attribute("xml:space").as_deref(), Some(XML_NS));
    }

    #[test]
    fn test_inner_frame_shadows_outer() {
        let mut scope = scope_with(&[("s", "urn:outer")]);
        scope.push([("s".to_string(), "urn:inner".to_string())]);
        assert_eq!(scope.lookup("s"), Some("urn:inner"));
        scope.pop();
        assert_eq!(scope.lookup("s"), Some("urn:outer"));
    }

    #[test]
    fn test_empty_default_namespace_undeclares() {
        let mut scope = scope_with(&[("", SVG_NS)]);
        scope.push([(String::new(), String::new())]);
        assert_eq!(scope.resolve_element("path"), None);
    }

    #[test]
    fn test_declared_prefix() {
        assert_eq!(declared_prefix("xmlns"), Some(""));
        assert_eq!(declared_prefix("xmlns:shaper"), Some("shaper"));
        assert_eq!(declared_prefix("xml:space"), None);
        assert_eq!(declared_prefix("id"), None);
    }

    #[test]
    fn test_element_kind_uses_namespace_not_suffix() {
        let doc = Document::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:x="urn:x">
                <g/><x:g/><x:svg/><path/><svg/>
            </svg>"#,
        )
        .unwrap();
        let root = doc.root().unwrap();
        assert_eq!(ElementKind::of(root), ElementKind::Root);

        let kinds: Vec<_> = root.child_elements().map(ElementKind::of).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Group,
                ElementKind::Drawable,
                ElementKind::Drawable,
                ElementKind::Drawable,
                ElementKind::Root,
            ]
        );
    }

    #[test]
    fn test_element_kind_without_namespace_declaration() {
        let doc = Document::parse("<svg><g><rect/></g></svg>").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(ElementKind::of(root), ElementKind::Root);
        let group = root.child_elements().next().unwrap();
        assert_eq!(ElementKind::of(group), ElementKind::Group);
    }
}
