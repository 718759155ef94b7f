//! Configuration section definitions.
//!
//! Each module corresponds to a section in `shaper.toml`:
//!
//! | Module    | TOML Section  | Purpose                                |
//! |-----------|---------------|----------------------------------------|
//! | `output`  | `[output]`    | Naming of generated files              |
//! | `convert` | `[convert]`   | Stroke width and global shaper tokens  |

mod convert;
mod output;

pub use convert::ConvertConfig;
pub use output::OutputConfig;
