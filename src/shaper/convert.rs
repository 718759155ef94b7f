//! Affinity Designer -> Shaper Origin.
//!
//! One depth-first pass over the document:
//!
//! - `<svg>`: declare `xmlns:shaper`
//! - `<g>`: its layer-name tokens become the group scope of its descendants
//! - anything else: own tokens, then missing group tokens, then missing
//!   global tokens, then cut type inference from the paint style
//!
//! Own tokens overwrite; group and global tokens only fill names that are
//! still unset, so precedence is own > group > global.

use uuid::Uuid;

use super::style::infer_cut_type;
use super::token::{CutType, ShaperAttr, ShaperToken, extract_tokens};
use crate::log;
use crate::svg::{Document, Element, ElementKind, SERIF_NS, SHAPER_NS, SHAPER_PREFIX, XMLNS_NS};

/// Local name of the Affinity Designer layer-name attribute (`serif:id`)
const LAYER_NAME: &str = "id";

/// Stroke width Shaper Studio expects when none is configured
pub const DEFAULT_STROKE_WIDTH: &str = "0.1";

/// Settings shared by every file of a run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Tokens applied to every element that does not set the name itself
    pub global: Vec<ShaperToken>,
    /// Written as `stroke-width` on drawable elements
    pub stroke_width: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            global: Vec::new(),
            stroke_width: DEFAULT_STROKE_WIDTH.to_string(),
        }
    }
}

/// Counters for one converted document
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub groups: usize,
    pub drawables: usize,
    /// Drawables whose paint maps to no cut type
    pub unmapped: usize,
}

/// Per-document traversal state.
///
/// Created fresh for every document so no group scope leaks between files.
struct ConvertContext<'a> {
    options: &'a ConvertOptions,
    /// Tokens of the nearest enclosing group (empty = none)
    group: Vec<ShaperToken>,
    stats: ConvertStats,
}

/// Convert a document in place.
pub fn convert_document(doc: &mut Document, options: &ConvertOptions) -> ConvertStats {
    let mut ctx = ConvertContext {
        options,
        group: Vec::new(),
        stats: ConvertStats::default(),
    };
    if let Some(root) = doc.root_mut() {
        visit(root, &mut ctx);
    }
    ctx.stats
}

fn visit(element: &mut Element, ctx: &mut ConvertContext<'_>) {
    match ElementKind::of(element) {
        ElementKind::Root => {
            declare_namespace(element);
            visit_children(element, ctx);
        }
        ElementKind::Group => {
            let tokens = convert_group(element);
            ctx.stats.groups += 1;
            let outer = std::mem::replace(&mut ctx.group, tokens);
            visit_children(element, ctx);
            ctx.group = outer;
        }
        ElementKind::Drawable => {
            convert_drawable(element, ctx);
            visit_children(element, ctx);
        }
    }
}

fn visit_children(element: &mut Element, ctx: &mut ConvertContext<'_>) {
    for child in element.child_elements_mut() {
        visit(child, ctx);
    }
}

/// Add `xmlns:shaper` unless present. Never rewrites an existing binding.
fn declare_namespace(root: &mut Element) {
    match root.attr_ns(XMLNS_NS, SHAPER_PREFIX) {
        Some(SHAPER_NS) => {}
        Some(other) => {
            log!("warning"; "`xmlns:shaper` is bound to `{}`, leaving it unchanged", other);
        }
        None => root.set_attr_ns("xmlns", XMLNS_NS, SHAPER_PREFIX, SHAPER_NS),
    }
}

/// Strip the layer name of a group and return its tokens.
fn convert_group(group: &mut Element) -> Vec<ShaperToken> {
    let tokens = group
        .remove_attr_ns(SERIF_NS, LAYER_NAME)
        .map(|layer| extract_tokens(&layer))
        .unwrap_or_default();
    group.set_attr("id", fresh_id());
    tokens
}

fn convert_drawable(element: &mut Element, ctx: &mut ConvertContext<'_>) {
    ctx.stats.drawables += 1;

    if let Some(layer) = element.remove_attr_ns(SERIF_NS, LAYER_NAME) {
        for token in extract_tokens(&layer) {
            set_token(element, &token);
        }
    }
    apply_missing(element, &ctx.group);
    apply_missing(element, &ctx.options.global);

    if !apply_style(element, &ctx.options.stroke_width) {
        ctx.stats.unmapped += 1;
    }
}

fn set_token(element: &mut Element, token: &ShaperToken) {
    element.set_attr_ns(SHAPER_PREFIX, SHAPER_NS, &token.name, token.value.as_str());
}

/// Apply tokens whose name the element does not carry yet.
fn apply_missing(element: &mut Element, tokens: &[ShaperToken]) {
    for token in tokens {
        if !element.has_attr_ns(SHAPER_NS, &token.name) {
            set_token(element, token);
        }
    }
}

/// Replace the paint style with Shaper presentation attributes.
///
/// An explicit known `cutType` decides the fill; otherwise the paint does.
/// Returns `false` when neither yields a cut type; the element then gets
/// no fill.
fn apply_style(element: &mut Element, stroke_width: &str) -> bool {
    element.set_attr("stroke-width", stroke_width);
    element.set_attr("id", fresh_id());
    let style = element.remove_attr("style");

    let inferred = infer_cut_type(style.as_deref());
    let explicit = element
        .attr_ns(SHAPER_NS, ShaperAttr::CutType.as_str())
        .map(CutType::from_name);

    let fill = match (explicit, inferred) {
        (Some(Some(cut)), _) | (Some(None), Ok(cut)) => cut.fill(),
        (None, Ok(cut)) => {
            element.set_attr_ns(SHAPER_PREFIX, SHAPER_NS, ShaperAttr::CutType.as_str(), cut.as_str());
            cut.fill()
        }
        (_, Err(err)) => {
            log!("warning"; "<{}>: {}", element.name, err);
            return false;
        }
    };
    element.set_attr("fill", fill);
    true
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:serif="http://www.serif.com/">"#;

    fn convert(body: &str, global: &[&str]) -> Document {
        let mut doc = Document::parse(&format!("{HEAD}{body}</svg>")).unwrap();
        let options = ConvertOptions {
            global: global.iter().map(|s| s.parse().unwrap()).collect(),
            ..ConvertOptions::default()
        };
        convert_document(&mut doc, &options);
        doc
    }

    /// Elements in document order, root excluded.
    fn elements(doc: &Document) -> Vec<&Element> {
        fn walk<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
            for child in element.child_elements() {
                out.push(child);
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        walk(doc.root().unwrap(), &mut out);
        out
    }

    fn shaper<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
        element.attr_ns(SHAPER_NS, name)
    }

    #[test]
    fn test_plain_element_defaults_to_outside() {
        let doc = convert(r#"<path id="old" d="M0 0"/>"#, &[]);
        let path = elements(&doc)[0];
        assert_eq!(shaper(path, "cutType"), Some("outside"));
        assert_eq!(path.attr("fill"), Some("#000000"));
        assert_eq!(path.attr("stroke-width"), Some("0.1"));
        let id = path.attr("id").unwrap();
        assert!(!id.is_empty());
        assert_ne!(id, "old");
    }

    #[test]
    fn test_own_tokens_pass_through_verbatim() {
        let doc = convert(
            r#"<rect serif:id="Pocket shaper:cutDepth=15mm shaper:cutType=pocket" style="fill:rgb(0,0,0)"/>"#,
            &[],
        );
        let rect = elements(&doc)[0];
        assert_eq!(shaper(rect, "cutDepth"), Some("15mm"));
        assert_eq!(rect.attr("shaper:cutDepth"), Some("15mm"));
        // explicit cut type outranks the black fill
        assert_eq!(shaper(rect, "cutType"), Some("pocket"));
        assert_eq!(rect.attr("fill"), Some("#7F7F7F"));
        assert_eq!(rect.attr("serif:id"), None);
        assert_eq!(rect.attr("style"), None);
    }

    #[test]
    fn test_group_beats_global() {
        let doc = convert(
            r#"<g serif:id="Holes shaper:cutType=inside"><circle r="1"/></g>"#,
            &["shaper:cutType=outside", "shaper:toolDia=6mm"],
        );
        let all = elements(&doc);
        let (group, circle) = (all[0], all[1]);

        assert_eq!(shaper(circle, "cutType"), Some("inside"));
        assert_eq!(circle.attr("fill"), Some("#FFFFFF"));
        assert_eq!(shaper(circle, "toolDia"), Some("6mm"));

        // groups carry no cut attributes themselves
        assert_eq!(group.attr("serif:id"), None);
        assert!(group.attr("id").is_some());
        assert_eq!(shaper(group, "cutType"), None);
    }

    #[test]
    fn test_own_beats_group() {
        let doc = convert(
            r#"<g serif:id="shaper:cutDepth=3mm shaper:cutType=inside"><path serif:id="shaper:cutDepth=9mm"/></g>"#,
            &["shaper:cutDepth=1mm"],
        );
        let path = elements(&doc)[1];
        assert_eq!(shaper(path, "cutDepth"), Some("9mm"));
        assert_eq!(shaper(path, "cutType"), Some("inside"));
    }

    #[test]
    fn test_group_scope_is_nearest_enclosing() {
        let doc = convert(
            r#"<g serif:id="shaper:cutDepth=1mm">
                 <g serif:id="Inner shaper:cutDepth=2mm"><path/></g>
                 <path/>
               </g>
               <path/>"#,
            &[],
        );
        let all = elements(&doc);
        let depths: Vec<_> = all
            .iter()
            .filter(|e| e.local_name() == "path")
            .map(|e| shaper(e, "cutDepth"))
            .collect();
        assert_eq!(depths, vec![Some("2mm"), Some("1mm"), None]);
    }

    #[test]
    fn test_group_without_tokens_clears_scope() {
        let doc = convert(
            r#"<g serif:id="shaper:cutDepth=1mm"><g><path/></g></g>"#,
            &[],
        );
        let path = elements(&doc)[2];
        assert_eq!(shaper(path, "cutDepth"), None);
    }

    #[test]
    fn test_style_inference() {
        let doc = convert(
            r#"<path style="fill:rgb(0,0,0);stroke:rgb(255,0,0)"/>
               <path style="fill:none;stroke:rgb(128,128,128)"/>
               <path style="fill:none;stroke:rgb(255,0,0)"/>"#,
            &[],
        );
        let all = elements(&doc);
        assert_eq!(shaper(all[0], "cutType"), Some("outside"));
        assert_eq!(all[0].attr("fill"), Some("#000000"));
        assert_eq!(shaper(all[1], "cutType"), Some("online"));
        assert_eq!(all[1].attr("fill"), Some("none"));
        assert_eq!(shaper(all[2], "cutType"), Some("anchor"));
        assert_eq!(all[2].attr("fill"), Some("#FF0000"));
    }

    #[test]
    fn test_unmapped_paint_is_counted_not_fatal() {
        let mut doc =
            Document::parse(&format!(r#"{HEAD}<path style="fill:none"/><rect/></svg>"#)).unwrap();
        let stats = convert_document(&mut doc, &ConvertOptions::default());
        assert_eq!(stats.unmapped, 1);
        assert_eq!(stats.drawables, 2);

        let all = elements(&doc);
        assert_eq!(shaper(all[0], "cutType"), None);
        assert_eq!(all[0].attr("fill"), None);
        assert_eq!(all[0].attr("stroke-width"), Some("0.1"));
        assert_eq!(all[0].attr("style"), None);
        assert_eq!(shaper(all[1], "cutType"), Some("outside"));
    }

    #[test]
    fn test_unknown_tokens_are_kept() {
        let doc = convert(r#"<path serif:id="shaper:cutType=engrave shaper:feed=9"/>"#, &[]);
        let path = elements(&doc)[0];
        assert_eq!(shaper(path, "cutType"), Some("engrave"));
        assert_eq!(shaper(path, "feed"), Some("9"));
        // fill follows the paint when the explicit cut type is unknown
        assert_eq!(path.attr("fill"), Some("#000000"));
    }

    #[test]
    fn test_namespace_declaration_is_idempotent() {
        let mut doc = Document::parse(&format!("{HEAD}<path/></svg>")).unwrap();
        let options = ConvertOptions::default();
        convert_document(&mut doc, &options);
        convert_document(&mut doc, &options);

        let xml = doc.to_xml().unwrap();
        assert_eq!(xml.matches("xmlns:shaper=").count(), 1);
        assert_eq!(
            doc.root().unwrap().attr("xmlns:shaper"),
            Some(SHAPER_NS)
        );
    }

    #[test]
    fn test_foreign_shaper_binding_is_left_alone() {
        let mut doc = Document::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:shaper="urn:other"/>"#,
        )
        .unwrap();
        convert_document(&mut doc, &ConvertOptions::default());
        assert_eq!(doc.root().unwrap().attr("xmlns:shaper"), Some("urn:other"));
    }

    #[test]
    fn test_custom_stroke_width() {
        let mut doc = Document::parse(&format!("{HEAD}<path/></svg>")).unwrap();
        let options = ConvertOptions {
            stroke_width: "0.25".to_string(),
            ..ConvertOptions::default()
        };
        convert_document(&mut doc, &options);
        assert_eq!(elements(&doc)[0].attr("stroke-width"), Some("0.25"));
    }

    #[test]
    fn test_serialized_output() {
        let doc = convert(
            r#"<path serif:id="shaper:cutDepth=2mm" style="fill:rgb(255,255,255);"/>"#,
            &[],
        );
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains(r#"xmlns:shaper="http://www.shapertools.com/namespaces/shaper""#));
        assert!(xml.contains(r#"shaper:cutDepth="2mm""#));
        assert!(xml.contains(r#"shaper:cutType="inside""#));
        assert!(xml.contains(r##"fill="#FFFFFF""##));
        assert!(!xml.contains("serif:id="));
        assert!(!xml.contains("style="));
    }
}
