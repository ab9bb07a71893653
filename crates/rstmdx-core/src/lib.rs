//! rstmdx-core: document tree shared by the rstmdx reader and writer.
//!
//! This crate provides the block node types, the diagnostics channel and
//! the reader/writer traits. It has no parsing or rendering logic.

mod document;
mod fidelity;
mod node;
mod properties;
mod traits;

pub use document::*;
pub use fidelity::*;
pub use node::*;
pub use properties::*;
pub use traits::*;
