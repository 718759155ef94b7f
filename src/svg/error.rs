//! SVG parsing and serialization errors.

use thiserror::Error;

/// Errors raised while reading or writing an SVG document
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("utf8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("output is not valid utf8: {0}")]
    Output(#[from] std::string::FromUtf8Error),

    #[error("write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("closing tag `</{0}>` has no matching open tag")]
    Unbalanced(String),

    #[error("element `<{0}>` is never closed")]
    Unclosed(String),

    #[error("document has no root element")]
    NoRoot,
}
