//! Output formatting
//!
//! - `text`: the per-walker and group-completion console lines
//! - `json`: optional completion report written to a file

pub mod json;
pub mod text;
