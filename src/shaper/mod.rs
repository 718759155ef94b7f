//! Shaper Origin attribute handling.
//!
//! # Module Structure
//!
//! ```text
//! shaper/
//! ├── token    # shaper:<name>=<value> tokens, attribute/cut type vocabulary
//! ├── color    # rgb()/hex parsing, nearest palette color
//! ├── style    # fill/stroke -> cut type inference
//! ├── convert  # Affinity Designer -> Shaper Origin
//! └── revert   # Shaper Origin -> Affinity Designer
//! ```

mod color;
mod convert;
mod revert;
mod style;
mod token;

pub use convert::{ConvertOptions, ConvertStats, DEFAULT_STROKE_WIDTH, convert_document};
pub use revert::revert_document;
pub use token::{ShaperToken, TokenError};
