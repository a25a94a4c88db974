//! Test helpers for esdown.
//!
//! There is no parser in this repository, so tests build trees through
//! [`TreeBuilder`] (a `&str`-ergonomic layer over `esdown_ast::factory`)
//! and run them through the lower-and-print pipeline in [`lower`].

pub mod fixtures;
pub mod lower;

pub use fixtures::TreeBuilder;
pub use lower::{lower_to_string, lower_with_diagnostics};
