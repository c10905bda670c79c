//! Core types - pure abstractions shared across the codebase.

mod category;
mod driver;

pub use category::ModuleKind;
pub use driver::BuildMode;
