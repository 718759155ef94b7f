//! Minimal mutable SVG/XML tree.
//!
//! # Module Structure
//!
//! ```text
//! svg/
//! ├── document   # Document, Element, Attribute, parse + serialize
//! ├── error      # SvgError
//! └── namespace  # namespace URIs, prefix scopes, element kinds
//! ```
//!
//! Only elements are modeled as nodes. Everything else the reader produces
//! (declaration, doctype, comments, text, CDATA, processing instructions)
//! passes through untouched so a converted file differs from its source only
//! where attributes were rewritten.

mod document;
mod error;
mod namespace;

pub use document::{Attribute, Document, Element, Node};
pub use error::SvgError;
pub use namespace::{
    ElementKind, NamespaceScope, SERIF_NS, SHAPER_NS, SHAPER_PREFIX, SVG_NS, XML_NS, XMLNS_NS,
};
