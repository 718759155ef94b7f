//! Shaper Origin -> Affinity Designer.
//!
//! Collapses every `shaper:*` attribute of an element back into a token list
//! stored as its `id`, which Affinity Designer shows as the layer name.

use super::token::ShaperToken;
use crate::svg::{Document, Element, ElementKind, SHAPER_NS};

/// Revert a document in place. Returns the number of elements rewritten.
///
/// `<svg>` elements are left alone.
pub fn revert_document(doc: &mut Document) -> usize {
    doc.root_mut().map_or(0, revert_tree)
}

fn revert_tree(element: &mut Element) -> usize {
    let own = match ElementKind::of(element) {
        ElementKind::Root => 0,
        _ => usize::from(revert_element(element)),
    };
    own + element.child_elements_mut().map(revert_tree).sum::<usize>()
}

/// Move the shaper attributes of one element into its `id`.
///
/// Returns `false` when the element had none.
pub fn revert_element(element: &mut Element) -> bool {
    let attrs = element.take_attrs_ns(SHAPER_NS);
    if attrs.is_empty() {
        return false;
    }

    let layer_name = attrs
        .into_iter()
        .map(|attr| ShaperToken::new(attr.local_name(), attr.value.as_str()).to_string())
        .collect::<Vec<_>>()
        .join(" ");
    element.set_attr("id", layer_name);
    true
}
